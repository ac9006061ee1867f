use serde::{Deserialize, Serialize};

/// Model used when neither `--model` nor `OPENAI_MODEL` is given.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini-2024-07-18";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Sampling knobs sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 256,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// Body of a `POST /v1/chat/completions` call.
///
/// Built once per invocation and never mutated afterwards; the sampling
/// parameters are flattened into the top-level JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(flatten)]
    sampling: SamplingParams,
}

impl ChatRequest {
    /// A request carrying exactly one `user` message and the default sampling parameters.
    pub fn user_message(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(content)],
            sampling: SamplingParams::default(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn sampling(&self) -> SamplingParams {
        self.sampling
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn user_message_holds_a_single_user_entry() {
        for input in ["hello", "  padded  ", "multi\nline", "{\"looks\": \"like json\"}"] {
            let request = ChatRequest::user_message(DEFAULT_MODEL, input);

            assert_eq!(request.messages().len(), 1);
            assert_eq!(request.messages()[0].role(), Role::User);
            assert_eq!(request.messages()[0].content(), input);
            assert_eq!(request.sampling(), SamplingParams::default());
        }
    }

    #[test]
    fn serializes_to_the_wire_shape() {
        let request = ChatRequest::user_message("gpt-test", "hi there");
        let value: Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "gpt-test",
                "messages": [{"role": "user", "content": "hi there"}],
                "temperature": 1.0,
                "max_tokens": 256,
                "top_p": 1.0,
                "frequency_penalty": 0.0,
                "presence_penalty": 0.0
            })
        );
    }

    #[test]
    fn sampling_defaults_are_fixed() {
        let params = SamplingParams::default();
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.max_tokens, 256);
        assert_eq!(params.top_p, 1.0);
        assert_eq!(params.frequency_penalty, 0.0);
        assert_eq!(params.presence_penalty, 0.0);
    }
}
