use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts identifiers that upstream systems emit either as strings or as bare numbers.
///
/// Structured values become `None`, validation then decides whether the record survives.
pub fn identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(_) => Ok(None)
    }
}

/// Keeps string values and nulls out everything else so a malformed field never rejects the record.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Ok(Some(value)),
        _ => Ok(None)
    }
}

/// Keeps booleans and nulls out anything else, a quoted `"false"` is not a flag.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(value)) => Ok(Some(value)),
        _ => Ok(None)
    }
}

/// Reads numbers and numeric strings as exact decimals, anything unreadable becomes `None`.
pub fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(value)) => value.to_string(),
        Some(Value::String(value)) => value.trim().to_string(),
        _ => return Ok(None)
    };

    Ok(Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)).ok())
}
