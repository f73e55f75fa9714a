use std::sync::Arc;
use anyhow::{bail, Result};
use tracing::info;

use crate::config::LlmConfig;
use super::interface::ChatCompletion;
use super::openai_compatible::OpenAiCompatibleLlm;

/// Create a completion client based on configuration. The API key is passed
/// in by the caller, already resolved from the environment.
pub fn create_llm(config: &LlmConfig, api_key: String) -> Result<Arc<dyn ChatCompletion>> {
    info!("Initializing LLM provider: {}", config.provider);

    match config.provider.as_str() {
        "openai_compatible" | "groq" | "openai" => Ok(Arc::new(OpenAiCompatibleLlm::new(
            config.model.clone(),
            config.base_url.clone(),
            api_key,
            config.temperature,
        ))),
        other => bail!("Unsupported LLM provider: {}", other),
    }
}
