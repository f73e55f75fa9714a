use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use crate::error::RelayError;

/// A browser-recorded clip transcoded to 16 kHz mono PCM. Owns both the
/// uploaded container and the transcoded WAV; dropping the value deletes the
/// temporary files on every path, success or failure.
#[derive(Debug)]
pub struct PcmClip {
    // Held so the uploaded container is deleted together with the WAV when
    // the clip is dropped.
    input: NamedTempFile,
    output: NamedTempFile,
}

impl PcmClip {
    pub fn wav_path(&self) -> &std::path::Path {
        self.output.path()
    }

    pub fn container_path(&self) -> &std::path::Path {
        self.input.path()
    }
}

/// Write the uploaded bytes to a temp file and run ffmpeg to produce a
/// 16 kHz mono WAV next to it. The upload is assumed to be in a
/// browser-recordable container (webm by default); ffmpeg sniffs the actual
/// format from the content.
pub async fn transcode_to_pcm(data: &[u8], sample_rate: u32) -> Result<PcmClip, RelayError> {
    if data.is_empty() {
        return Err(RelayError::EmptyUpload);
    }

    let input = tempfile::Builder::new()
        .prefix("voice-relay-")
        .suffix(".webm")
        .tempfile()
        .map_err(|e| RelayError::Transcode(format!("creating temp file: {}", e)))?;
    tokio::fs::write(input.path(), data)
        .await
        .map_err(|e| RelayError::Transcode(format!("writing upload: {}", e)))?;

    let output = tempfile::Builder::new()
        .prefix("voice-relay-")
        .suffix(".wav")
        .tempfile()
        .map_err(|e| RelayError::Transcode(format!("creating temp file: {}", e)))?;

    debug!(
        input = %input.path().display(),
        output = %output.path().display(),
        "transcoding upload to {} Hz mono WAV", sample_rate
    );

    let result = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(input.path())
        .args(["-ar", &sample_rate.to_string(), "-ac", "1", "-f", "wav"])
        .arg(output.path())
        .output()
        .await
        .map_err(|e| {
            RelayError::Transcode(format!(
                "failed to run ffmpeg, is it installed? {}",
                e
            ))
        })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let tail: String = stderr.lines().last().unwrap_or("").to_string();
        return Err(RelayError::Transcode(format!(
            "ffmpeg exited with {}: {}",
            result.status, tail
        )));
    }

    Ok(PcmClip { input, output })
}
