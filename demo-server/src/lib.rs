//! Stateless demo HTTP service.
//!
//! Four routes, each reading its input from a different part of the request
//! (query string, JSON body, path segment, header), plus a catch-all that
//! lists them. Nothing is stored between requests.

pub mod config;
pub mod error;
pub mod numbers;
pub mod routes;
pub mod usage;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig, DEFAULT_PORT};
pub use error::RouteError;

/// Read-only values handlers quote back in usage hints.
#[derive(Clone, Debug)]
pub struct AppState {
    pub public_url: Arc<str>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            public_url: config.public_url().into(),
        }
    }
}

pub fn app(config: &ServerConfig) -> Router {
    Router::new()
        .route("/greet", get(routes::greet).fallback(routes::not_found))
        .route(
            "/math/average",
            post(routes::average).fallback(routes::not_found),
        )
        .route("/shout/{word}", put(routes::shout).fallback(routes::not_found))
        .route(
            "/secure/resource",
            delete(routes::secure_delete).fallback(routes::not_found),
        )
        .fallback(routes::not_found)
        .with_state(AppState::new(config))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(&config)).await
}
