use std::sync::Arc;

use crate::asr::{self, SpeechRecognizer};
use crate::config::Config;
use crate::llm::{self, ChatCompletion};
use crate::tts::{self, SpeechSynthesizer};

/// Shared application state. All service handles are constructed once at
/// startup and injected here; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub llm: Arc<dyn ChatCompletion>,
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api_key = config.resolve_api_key()?;
        let recognizer = asr::create_recognizer(&config.asr)?;
        let llm = llm::create_llm(&config.llm, api_key)?;
        let synthesizer = tts::probe_synthesizer(&config.tts);

        Ok(Self {
            config,
            recognizer,
            llm,
            synthesizer,
        })
    }

    /// Build state around pre-constructed service handles. Used by tests to
    /// drive the router with stub services.
    pub fn with_services(
        config: Config,
        recognizer: Arc<dyn SpeechRecognizer>,
        llm: Arc<dyn ChatCompletion>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        Self {
            config,
            recognizer,
            llm,
            synthesizer,
        }
    }
}
