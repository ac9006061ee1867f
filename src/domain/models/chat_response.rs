use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// Structured error object returned by the chat-completions API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub param: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplyMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Choice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: ReplyMessage,
}

/// Decoded response body. Neither field is guaranteed by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<Choice>,

    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

impl ChatResponse {
    /// Decode a response body. Only a top-level JSON object is accepted.
    pub fn from_body(body: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| DomainError::decode(format!("failed to parse response body: {e}")))?;

        if !value.is_object() {
            return Err(DomainError::decode(format!(
                "expected a JSON object in response body, got: {body}"
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| DomainError::decode(format!("unexpected response shape: {e}")))
    }

    /// The service-reported error, when it carries a non-empty message.
    pub fn api_error(&self) -> Option<&ApiErrorDetail> {
        self.error.as_ref().filter(|e| !e.message.is_empty())
    }

    /// Resolve the response into the reply text.
    ///
    /// A populated `error.message` wins over any choices. No choices and no
    /// error yields an empty string.
    pub fn into_reply(self) -> Result<String, DomainError> {
        if self.api_error().is_some() {
            let detail = self.error.unwrap_or_default();
            return Err(DomainError::RemoteApiError(detail));
        }

        Ok(self
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Some compatible servers send numeric codes.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
