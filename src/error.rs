use thiserror::Error;

use crate::config::ErrorReporting;

/// Everything that can go wrong inside one voice round-trip. All variants
/// are caught at the handler boundary and turned into a JSON error payload;
/// nothing surfaces to the transport layer as a non-200 response.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no recognizable speech in the audio")]
    UnrecognizedSpeech,

    #[error("speech recognition service unavailable: {0}")]
    RecognitionUnavailable(String),

    #[error("audio transcoding failed: {0}")]
    Transcode(String),

    #[error("uploaded audio clip is empty")]
    EmptyUpload,

    #[error("multipart upload is missing the 'file' field")]
    MissingAudioField,

    #[error("completion request failed: {0}")]
    Completion(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RelayError {
    /// The string that goes into the `{"error": ...}` payload. Strict mode
    /// keeps the two recognition failures user-facing; generic mode reports
    /// the display string for everything.
    pub fn user_message(&self, mode: ErrorReporting) -> String {
        match (mode, self) {
            (ErrorReporting::Strict, RelayError::UnrecognizedSpeech) => {
                "Couldn't understand your voice.".to_string()
            }
            (ErrorReporting::Strict, RelayError::RecognitionUnavailable(_)) => {
                "Speech Recognition service unavailable.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
