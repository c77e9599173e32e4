#![forbid(unsafe_code)]

use serde_json::Value;

pub(crate) fn require_string(args: &Value, key: &str) -> Result<String, String> {
    match args.get(key) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(format!("{key} is required")),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

pub(crate) fn optional_string(args: &Value, key: &str) -> Result<Option<String>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

pub(crate) fn optional_string_list(args: &Value, key: &str) -> Result<Option<Vec<String>>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(value) => out.push(value.clone()),
                    _ => return Err(format!("{key} must be an array of strings")),
                }
            }
            Ok(Some(out))
        }
        Some(_) => Err(format!("{key} must be an array of strings")),
    }
}

pub(crate) fn require_string_list(args: &Value, key: &str) -> Result<Vec<String>, String> {
    optional_string_list(args, key)?.ok_or_else(|| format!("{key} is required"))
}

pub(crate) fn optional_integer(args: &Value, key: &str) -> Result<Option<i64>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) if number.as_i64().is_some() => Ok(number.as_i64()),
        Some(_) => Err(format!("{key} must be an integer")),
    }
}

pub(crate) fn optional_limit(args: &Value, key: &str) -> Result<Option<usize>, String> {
    match optional_integer(args, key)? {
        None => Ok(None),
        Some(value) if value >= 1 => Ok(Some(value as usize)),
        Some(_) => Err(format!("{key} must be a positive integer")),
    }
}
