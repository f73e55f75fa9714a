use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Interface for a stateless completion service. Stateless means the service
/// stores no memory or system prompt between calls; everything travels with
/// the request.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Generate a completion for the given messages, returning the first
    /// choice's trimmed text.
    async fn complete(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
    ) -> Result<String, RelayError>;
}
