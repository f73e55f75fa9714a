use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::RelayError;
use super::interface::{ChatCompletion, Message};

/// OpenAI-compatible completion client. Works against any endpoint that
/// speaks the `/chat/completions` protocol (Groq, OpenAI, vLLM, ...).
pub struct OpenAiCompatibleLlm {
    model: String,
    base_url: String,
    api_key: String,
    temperature: f32,
    client: Client,
}

impl OpenAiCompatibleLlm {
    pub fn new(model: String, base_url: String, api_key: String, temperature: f32) -> Self {
        info!(
            "Initialized OpenAiCompatibleLlm: model={}, base_url={}",
            model, base_url
        );
        Self {
            model,
            base_url,
            api_key,
            temperature,
            client: Client::new(),
        }
    }
}

/// Assemble the request body. The system instruction, when present, is
/// prepended as a `system` message exactly as given.
pub fn build_request_body(
    model: &str,
    temperature: f32,
    messages: &[Message],
    system: Option<&str>,
) -> Value {
    let mut wire_messages = Vec::with_capacity(messages.len() + 1);
    if let Some(sys) = system {
        wire_messages.push(json!({"role": "system", "content": sys}));
    }
    for msg in messages {
        wire_messages.push(json!({"role": msg.role, "content": msg.content}));
    }
    json!({
        "model": model,
        "messages": wire_messages,
        "temperature": temperature,
    })
}

#[async_trait]
impl ChatCompletion for OpenAiCompatibleLlm {
    async fn complete(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
    ) -> Result<String, RelayError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = build_request_body(&self.model, self.temperature, &messages, system);

        debug!(model = %self.model, "requesting chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Completion(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RelayError::Completion(format!(
                "endpoint returned HTTP {}: {}",
                status, detail
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| RelayError::Completion(e.to_string()))?;

        let content = payload
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|choice| choice.pointer("/message/content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                RelayError::Completion("response contained no completion choices".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_instruction_is_passed_unchanged() {
        let system = crate::config::LlmConfig::default().system_prompt;
        let body = build_request_body(
            "openai/gpt-oss-20b",
            1.0,
            &[Message::user("hello there")],
            Some(&system),
        );

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], Value::String(system));
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "hello there");
    }

    #[test]
    fn omits_system_message_when_absent() {
        let body = build_request_body("m", 0.5, &[Message::user("hi")], None);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(body["temperature"], 0.5);
    }
}
