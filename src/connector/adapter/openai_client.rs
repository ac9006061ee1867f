use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{ChatRequest, ChatResponse, DomainError, DEFAULT_MODEL};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "OPENAI_MODEL";

/// Settings for [`OpenAiClient`].
///
/// | Variable          | Default                  | Purpose                     |
/// |-------------------|--------------------------|-----------------------------|
/// | `OPENAI_API_KEY`  | none                     | Bearer credential, required |
/// | `OPENAI_BASE_URL` | `https://api.openai.com` | Any compatible server       |
/// | `OPENAI_MODEL`    | `gpt-4o-mini-2024-07-18` | Model sent with the request |
///
/// A missing key is not rejected here; [`OpenAiClient::complete`] reports it
/// before touching the network.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_key: get(API_KEY_VAR),
            base_url: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full endpoint URL (base + `/v1/chat/completions`).
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), COMPLETIONS_PATH)
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for the OpenAI chat-completions API (and compatible servers).
///
/// Implements [`ChatClient`]. Each call sends exactly one POST with a bearer
/// credential and decodes the body into the first choice's content.
///
/// A populated `error.message` in the body is reported as
/// [`DomainError::RemoteApiError`] whatever the HTTP status. A non-2xx status
/// without one becomes [`DomainError::UnexpectedStatus`].
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("OpenAiClient: failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            url: config.endpoint(),
            client,
            api_key: config.api_key,
            model: config.model,
            timeout: config.timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::transport(format!(
                "request to {} timed out after {:?}",
                self.url, self.timeout
            ))
        } else if e.is_connect() {
            DomainError::transport(format!("could not connect to {}: {e}", self.url))
        } else {
            DomainError::transport(format!("request to {} failed: {e}", self.url))
        }
    }
}

/// Turn a status and raw body into the reply text or the matching error.
fn decode_reply(status: StatusCode, body: &str) -> Result<String, DomainError> {
    if status.is_success() {
        return ChatResponse::from_body(body)?.into_reply();
    }

    if let Ok(parsed) = ChatResponse::from_body(body) {
        if let Some(detail) = parsed.api_error() {
            return Err(DomainError::RemoteApiError(detail.clone()));
        }
    }

    warn!("OpenAiClient: API returned {status}");
    Err(DomainError::UnexpectedStatus {
        status: status.as_u16(),
        body: body.to_string(),
    })
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, message: &str) -> Result<String, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::configuration(format!("API key is not set; export {API_KEY_VAR}"))
        })?;

        let request = ChatRequest::user_message(&self.model, message);
        let payload = request
            .to_json()
            .map_err(|e| DomainError::serialization(format!("failed to encode request: {e}")))?;

        debug!("Sending request to {} with payload {}", self.url, payload);

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(api_key)
            .body(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!("Received response ({status}): {body}");

        decode_reply(status, &body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn config_defaults_when_environment_is_empty() {
        let config = OpenAiConfig::from_lookup(lookup(&[]));

        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn config_reads_overrides_and_trims_trailing_slash() {
        let config = OpenAiConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "sk-test"),
            (BASE_URL_VAR, "http://localhost:8080/"),
            (MODEL_VAR, "local-model"),
        ]));

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "local-model");
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let config = OpenAiConfig::from_lookup(lookup(&[(API_KEY_VAR, "")]));
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = OpenAiConfig::default().with_api_key("sk-secret");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn decode_reply_reads_success_body() {
        let reply = decode_reply(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"hello"}}]}"#,
        )
        .unwrap();
        assert_eq!(reply, "hello");
    }

    #[test]
    fn decode_reply_prefers_api_error_on_failure_status() {
        let err = decode_reply(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#,
        )
        .unwrap_err();

        assert_eq!(
            err.remote_detail().unwrap().message,
            "Incorrect API key provided"
        );
    }

    #[test]
    fn failure_status_warning_leaves_body_out() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            decode_reply(StatusCode::BAD_GATEWAY, "<html>upstream detail</html>")
        });

        assert!(result.is_err());
        let output = logs.contents();
        assert!(output.contains("502"), "warning missing: {output}");
        assert!(!output.contains("upstream detail"), "body leaked: {output}");
    }

    #[test]
    fn decode_reply_reports_bare_failure_status() {
        let err = decode_reply(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();

        match err {
            DomainError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>bad gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
