use log::warn;
use serde_json::Value;

use crate::domain::email::Email;
use crate::mail::FetchError;

/// Decode the server's email list.
///
/// The body has to be a JSON array. Elements that don't have the shape of an
/// email are dropped (and logged) instead of failing the whole list.
pub fn decode_emails(raw: &[u8]) -> Result<Vec<Email>, FetchError> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let Value::Array(records) = value else {
        return Err(FetchError::Malformed(format!(
            "expected a JSON array, got {}",
            kind(&value)
        )));
    };

    let mut out = Vec::with_capacity(records.len());
    for (i, rec) in records.into_iter().enumerate() {
        match serde_json::from_value::<Email>(rec) {
            Ok(email) => out.push(email),
            Err(e) => warn!("skipping email record #{i}: {e}"),
        }
    }
    Ok(out)
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
