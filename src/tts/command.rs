use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::interface::SpeechSynthesizer;

/// Synthesizer backed by a system speech command (`say`, `espeak-ng`,
/// PowerShell's speech synthesizer, ...). The text travels as the final
/// argument; the command is expected to block until playback completes.
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Check whether the program can be spawned at all.
    pub fn is_available(program: &str) -> bool {
        std::process::Command::new(program)
            .arg("--version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .is_ok()
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn speak(&self, text: &str) -> Result<(), anyhow::Error> {
        debug!(program = %self.program, chars = text.len(), "speaking reply");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .status()
            .await?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}
