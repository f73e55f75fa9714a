use async_trait::async_trait;

/// Interface for a local text-to-speech engine.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak the text aloud, returning once playback has finished.
    async fn speak(&self, text: &str) -> Result<(), anyhow::Error>;

    fn name(&self) -> &str;
}
