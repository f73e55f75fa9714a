use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use crate::config::AsrConfig;
use super::google::GoogleRecognizer;
use super::interface::SpeechRecognizer;

/// Create the speech-recognition client from configuration.
pub fn create_recognizer(config: &AsrConfig) -> Result<Arc<dyn SpeechRecognizer>> {
    info!(
        endpoint = %config.endpoint,
        language = %config.language,
        "initializing speech recognizer"
    );
    Ok(Arc::new(GoogleRecognizer::new(config.clone())))
}
