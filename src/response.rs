// ===============================
// src/response.rs
// ===============================
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, TransportError, YunxinError};

pub const SUCCESS_CODE: i64 = 200;

/// Decoded top-level JSON object of a successful call (`code == 200`).
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    inner: Map<String, Value>,
}

impl ResponseEnvelope {
    pub fn code(&self) -> Option<i64> {
        self.inner.get("code").and_then(code_of)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.inner
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.inner
    }

    /// Deserialize the whole envelope into an action-specific type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.inner.clone())).map_err(|e| {
            YunxinError::Decode {
                reason: e.to_string(),
                body: Value::Object(self.inner.clone()).to_string(),
            }
        })
    }
}

// `code` boleh number 200, 200.0, atau string "200"
fn code_of(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Classify one HTTP exchange into an envelope or an error.
pub fn validate(status: u16, body: &str) -> Result<ResponseEnvelope> {
    if status != 200 {
        return Err(TransportError::Status {
            status,
            body: body.to_string(),
        }
        .into());
    }

    let value: Value = serde_json::from_str(body).map_err(|e| YunxinError::Decode {
        reason: e.to_string(),
        body: body.to_string(),
    })?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(YunxinError::Decode {
                reason: format!("expected JSON object, got {}", json_kind(&other)),
                body: body.to_string(),
            })
        }
    };

    let code = map.get("code").and_then(code_of);
    if code != Some(SUCCESS_CODE) {
        let msg = map
            .get("msg")
            .or_else(|| map.get("desc"))
            .and_then(|m| m.as_str())
            .map(str::to_string);
        return Err(YunxinError::Business {
            code,
            msg,
            body: Value::Object(map),
        });
    }

    Ok(ResponseEnvelope { inner: map })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
