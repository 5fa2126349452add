//! Numeric coercion and summary statistics for the average route.
//!
//! Elements are parsed explicitly instead of being silently coerced: the
//! result is either the full numeric sequence or the first element that
//! could not be read as a number.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Largest integer an IEEE-754 double represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// The first element of the input that is not a usable number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidElement {
    pub index: usize,
    pub value: Value,
}

/// Read a single JSON value as a finite number.
///
/// Numbers are taken as-is; strings are accepted when their trimmed content
/// is a non-empty decimal literal. Anything else yields `None`. This is
/// stricter than JavaScript's `Number()`: `true`, `null`, `""` and hex
/// literals such as `"0x10"` are rejected rather than read as 1, 0, 0, 16.
pub fn coerce(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

pub fn coerce_all(values: &[Value]) -> Result<Vec<f64>, InvalidElement> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            coerce(value).ok_or_else(|| InvalidElement {
                index,
                value: value.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub count: usize,
    #[serde(serialize_with = "serialize_number")]
    pub sum: f64,
    #[serde(serialize_with = "serialize_number")]
    pub average: f64,
}

impl Stats {
    /// Left-to-right sum and arithmetic mean. `None` for an empty slice.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sum = values.iter().fold(0.0, |acc, n| acc + n);
        let count = values.len();
        Some(Self {
            count,
            sum,
            average: sum / count as f64,
        })
    }

    /// False when finite inputs added up past the range of `f64`.
    pub fn is_finite(&self) -> bool {
        self.sum.is_finite() && self.average.is_finite()
    }
}

/// Integral values within the exactly-representable range are written as JSON
/// integers (`100`, not `100.0`).
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
