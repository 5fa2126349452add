//! Stateless HTTP request builder and response parser for the demo API.
//!
//! # Design
//! `DemoClient` holds only a base URL and carries no mutable state between
//! calls. Each route is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AverageReport, AverageRequest, DeleteReport, Greeting, ShoutReport};

pub const ROLE_HEADER: &str = "x-role";

/// Synchronous, stateless client for the demo API.
#[derive(Debug, Clone)]
pub struct DemoClient {
    base_url: Url,
}

impl DemoClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { base_url: parsed })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append route segments to the base path. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn build_greet(&self, name: &str, lang: Option<&str>) -> Result<HttpRequest, ApiError> {
        let mut url = self.endpoint(&["greet"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("name", name);
            if let Some(lang) = lang {
                query.append_pair("lang", lang);
            }
        }
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_average(&self, numbers: &[Value]) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&AverageRequest { numbers })
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint(&["math", "average"])?.into(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_shout(&self, word: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.endpoint(&["shout", word])?.into(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_delete_resource(&self, role: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: self.endpoint(&["secure", "resource"])?.into(),
            headers: vec![(ROLE_HEADER.to_string(), role.to_string())],
            body: None,
        })
    }

    pub fn parse_greet(&self, response: HttpResponse) -> Result<Greeting, ApiError> {
        parse_success(response)
    }

    pub fn parse_average(&self, response: HttpResponse) -> Result<AverageReport, ApiError> {
        parse_success(response)
    }

    pub fn parse_shout(&self, response: HttpResponse) -> Result<ShoutReport, ApiError> {
        parse_success(response)
    }

    pub fn parse_delete_resource(&self, response: HttpResponse) -> Result<DeleteReport, ApiError> {
        parse_success(response)
    }
}

fn parse_success<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    let status = response.status;
    if status == 200 {
        return Ok(());
    }
    if status == 404 {
        return Err(ApiError::NotFound);
    }
    let body: Option<Value> = serde_json::from_str(&response.body).ok();
    let message = body
        .as_ref()
        .and_then(|body| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string);
    match (message, body) {
        (Some(message), Some(body)) => Err(ApiError::Rejected {
            status,
            message,
            body,
        }),
        _ => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
