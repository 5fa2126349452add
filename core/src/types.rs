//! Response DTOs for the demo API.
//!
//! # Design
//! These types mirror the demo-server's JSON but are defined independently so
//! the client does not link against Axum. The integration test against the
//! live server catches any schema drift.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common success envelope: the echoed input, the result, and a short note.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Envelope<I, R> {
    pub input: I,
    pub result: R,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GreetInput {
    pub name: String,
    pub lang: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AverageInput {
    pub numbers: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct Average {
    pub count: usize,
    pub sum: f64,
    pub average: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WordInput {
    pub word: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Shout {
    pub uppercased: String,
    pub length: usize,
    pub is_long: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RoleInput {
    pub role: String,
}

pub type Greeting = Envelope<GreetInput, String>;
pub type AverageReport = Envelope<AverageInput, Average>;
pub type ShoutReport = Envelope<WordInput, Shout>;
pub type DeleteReport = Envelope<RoleInput, String>;

/// Request payload for the average route.
#[derive(Debug, Clone, Serialize)]
pub struct AverageRequest<'a> {
    pub numbers: &'a [Value],
}

/// Convert a command-line token into a JSON element for the average route.
///
/// Tokens that read as finite numbers become JSON numbers; everything else is
/// sent as a string so the service gets to decide whether it is numeric.
pub fn number_token(token: &str) -> Value {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .and_then(|n| {
            if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                Some(Value::from(n as i64))
            } else {
                serde_json::Number::from_f64(n).map(Value::Number)
            }
        })
        .unwrap_or_else(|| Value::String(token.to_string()))
}

/// One string element per character: `"12345"` becomes
/// `["1","2","3","4","5"]`.
pub fn split_chars(digits: &str) -> Vec<Value> {
    digits
        .chars()
        .map(|c| Value::String(c.to_string()))
        .collect()
}
