//! Route handlers.
//!
//! Each handler validates its own input and answers with either an
//! `Envelope` (echoed input + result) or a `RouteError`. Extractor
//! rejections are folded into the route's validation error so every
//! response body stays JSON.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, Method, Uri},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::RouteError;
use crate::numbers::{coerce_all, Stats};
use crate::usage;
use crate::AppState;

pub const ROLE_HEADER: &str = "x-role";
pub const ADMIN_ROLE: &str = "admin";
pub const DEFAULT_LANG: &str = "en";

const LONG_WORD_THRESHOLD: usize = 5;

/// Success body shared by every route.
#[derive(Debug, Serialize)]
pub struct Envelope<I, R> {
    pub input: I,
    pub result: R,
    pub info: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct GreetQuery {
    pub name: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GreetInput {
    pub name: String,
    pub lang: String,
}

#[derive(Debug, Serialize)]
pub struct AverageInput {
    pub numbers: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct WordInput {
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shout {
    pub uppercased: String,
    pub length: usize,
    pub is_long: bool,
}

#[derive(Debug, Serialize)]
pub struct RoleInput {
    pub role: String,
}

/// Pick the greeting template for `lang`. Unknown languages get English.
pub fn greeting(name: &str, lang: &str) -> String {
    match lang {
        "he" => format!("שלום, {name}!"),
        "es" => format!("¡Hola, {name}!"),
        _ => format!("Hello, {name}!"),
    }
}

pub fn shout_word(word: &str) -> Shout {
    let length = word.chars().count();
    Shout {
        uppercased: word.to_uppercase(),
        length,
        is_long: length > LONG_WORD_THRESHOLD,
    }
}

pub async fn greet(
    State(state): State<AppState>,
    query: Result<Query<GreetQuery>, QueryRejection>,
) -> Result<Json<Envelope<GreetInput, String>>, RouteError> {
    let GreetQuery { name, lang } = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            debug!(%rejection, "unreadable greet query");
            GreetQuery::default()
        }
    };
    let Some(name) = name.filter(|name| !name.is_empty()) else {
        debug!("greet called without a name");
        return Err(RouteError::Validation(usage::greet(&state.public_url)));
    };
    let lang = lang.unwrap_or_else(|| DEFAULT_LANG.to_string());
    let result = greeting(&name, &lang);

    Ok(Json(Envelope {
        input: GreetInput { name, lang },
        result,
        info: "This endpoint demonstrates reading data from query parameters.",
    }))
}

pub async fn average(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<AverageInput, Stats>>, RouteError> {
    let numbers = match body {
        Ok(Json(Value::Object(mut fields))) => fields.remove("numbers"),
        Ok(Json(_)) => None,
        Err(rejection) => {
            debug!(%rejection, "unreadable average body");
            None
        }
    };
    let numbers = match numbers {
        Some(Value::Array(numbers)) if !numbers.is_empty() => numbers,
        _ => return Err(RouteError::Validation(usage::average(&state.public_url))),
    };

    let values = coerce_all(&numbers).map_err(|invalid| {
        debug!(index = invalid.index, value = %invalid.value, "non-numeric element");
        RouteError::Validation(usage::non_numeric(&numbers, &invalid))
    })?;
    let stats = Stats::compute(&values)
        .ok_or_else(|| RouteError::Validation(usage::average(&state.public_url)))?;
    if !stats.is_finite() {
        debug!(count = stats.count, "sum out of range");
        return Err(RouteError::Validation(usage::out_of_range(&numbers)));
    }

    Ok(Json(Envelope {
        input: AverageInput { numbers },
        result: stats,
        info: "This endpoint demonstrates reading data from the JSON body.",
    }))
}

pub async fn shout(
    State(state): State<AppState>,
    word: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<WordInput, Shout>>, RouteError> {
    let word = match word {
        Ok(Path(word)) if !word.is_empty() => word,
        Ok(_) => return Err(RouteError::Validation(usage::shout(&state.public_url))),
        Err(rejection) => {
            debug!(%rejection, "unreadable shout path");
            return Err(RouteError::Validation(usage::shout(&state.public_url)));
        }
    };
    let result = shout_word(&word);

    Ok(Json(Envelope {
        input: WordInput { word },
        result,
        info: "This endpoint demonstrates reading data from a path parameter.",
    }))
}

pub async fn secure_delete(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<RoleInput, &'static str>>, RouteError> {
    let role = headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|role| !role.is_empty());
    let Some(role) = role else {
        debug!("delete called without a usable x-role header");
        return Err(RouteError::Validation(usage::secure_delete(&state.public_url)));
    };
    if role != ADMIN_ROLE {
        debug!(role, "delete refused");
        return Err(RouteError::Authorization {
            role: role.to_string(),
        });
    }

    Ok(Json(Envelope {
        input: RoleInput {
            role: role.to_string(),
        },
        result: "Resource deleted successfully (not really, this is just a demo).",
        info: "This endpoint demonstrates reading data from request headers.",
    }))
}

pub async fn not_found(method: Method, uri: Uri) -> RouteError {
    debug!(%method, %uri, "no route matched");
    RouteError::NotFound
}
