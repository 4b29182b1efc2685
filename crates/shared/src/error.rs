use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body the board API attaches to rejected requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
        }
    }

    /// Human-readable detail. Falsy values (`null`, `false`, `0`, `""`) count as
    /// absent; structured details (validation error lists) are rendered as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::Number(number) if number.as_f64() == Some(0.0) => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}
