use serde_json::Value;
use subtyper_core::models::input::PredictionInput;

use crate::error::PredictError;

/// Pull the six measurements out of a request body.
///
/// Each value may be a JSON number, a string holding a number, or a boolean
/// (`true` = 1). Anything else, a missing key, or a body that is not an
/// object yields [`PredictError::MalformedInput`].
pub fn extract(raw: &Value) -> Result<PredictionInput, PredictError> {
    let obj = raw.as_object().ok_or(PredictError::MalformedInput)?;
    let field = |key: &str| {
        obj.get(key)
            .and_then(to_f64)
            .ok_or(PredictError::MalformedInput)
    };

    Ok(PredictionInput {
        gad: field("gad")?,
        hba1c: field("hba1c")?,
        bmi: field("bmi")?,
        age: field("age")?,
        cpeptide: field("cpeptide")?,
        glucose: field("glucose")?,
    })
}

/// Lenient numeric coercion for a single JSON value.
pub fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
