use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model endpoint returned an error: {status}")]
    Api { status: u16 },

    #[error("completion reply carried no message content")]
    MalformedReply,

    #[error("model returned an empty completion")]
    EmptyCompletion,
}

/// Blocking client for an OpenAI-compatible chat-completions endpoint.
pub struct ChatClient {
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system + user message pair and returns the completion text.
    pub fn complete(&self, instructions: &str, input: &str) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);
        log::debug!("requesting completion from {} with model {}", url, self.model);

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": instructions },
                { "role": "user", "content": input },
            ],
        });

        let response = ureq::post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => GenerationError::Api { status: code },
                other => GenerationError::Http(other),
            })?;

        let body: Value = response.into_json()?;

        let content = body
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or(GenerationError::MalformedReply)?;

        let content = content.trim();
        if content.is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }

        Ok(content.to_string())
    }
}
