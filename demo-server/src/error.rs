//! Route failures and their JSON rendering.
//!
//! Every failure a handler can produce maps to exactly one status code and a
//! self-describing JSON body. Nothing escapes as a bare status or a 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::usage;

#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    /// Missing or malformed input. Carries the usage payload for the route.
    Validation(Value),

    /// Well-formed request from a role that may not perform the operation.
    Authorization { role: String },

    /// No route matched the method and path.
    NotFound,
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::Validation(_) => StatusCode::BAD_REQUEST,
            RouteError::Authorization { .. } => StatusCode::FORBIDDEN,
            RouteError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            RouteError::Validation(body) => body,
            RouteError::Authorization { role } => usage::forbidden(&role),
            RouteError::NotFound => usage::endpoint_directory(),
        };
        (status, Json(body)).into_response()
    }
}
