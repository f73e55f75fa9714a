use async_trait::async_trait;
use std::path::Path;

use crate::error::RelayError;

/// Interface for an external speech-recognition service.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe a 16 kHz mono PCM WAV file.
    ///
    /// Returns `RelayError::UnrecognizedSpeech` when the service resolves no
    /// speech in the audio, and `RelayError::RecognitionUnavailable` when the
    /// service cannot be reached.
    async fn transcribe(&self, wav_path: &Path) -> Result<String, RelayError>;
}
