use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use tracing::debug;

use crate::config::AsrConfig;
use crate::error::RelayError;
use super::interface::SpeechRecognizer;

/// Client for the Google Web Speech API (the full-utterance `recognize`
/// endpoint). Audio is submitted as raw signed 16-bit little-endian samples
/// with an `audio/l16` content type.
pub struct GoogleRecognizer {
    client: Client,
    config: AsrConfig,
}

impl GoogleRecognizer {
    pub fn new(config: AsrConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleRecognizer {
    async fn transcribe(&self, wav_path: &Path) -> Result<String, RelayError> {
        let wav_bytes = tokio::fs::read(wav_path)
            .await
            .map_err(|e| RelayError::RecognitionUnavailable(e.to_string()))?;
        let samples = pcm_payload(&wav_bytes);

        debug!(
            bytes = samples.len(),
            language = %self.config.language,
            "submitting audio for recognition"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[
                ("client", "chromium"),
                ("lang", self.config.language.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .header(
                "Content-Type",
                format!("audio/l16; rate={}", self.config.sample_rate),
            )
            .body(samples.to_vec())
            .send()
            .await
            .map_err(|e| RelayError::RecognitionUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RelayError::RecognitionUnavailable(format!(
                "endpoint returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RelayError::RecognitionUnavailable(e.to_string()))?;

        parse_response(&body)
    }
}

/// Strip the RIFF framing from a WAV file, returning the raw sample bytes.
/// Falls back to the whole buffer when no `data` chunk is found.
fn pcm_payload(wav: &[u8]) -> &[u8] {
    let mut pos = 12; // past "RIFF<size>WAVE"
    while pos + 8 <= wav.len() {
        let id = &wav[pos..pos + 4];
        let size = u32::from_le_bytes([wav[pos + 4], wav[pos + 5], wav[pos + 6], wav[pos + 7]])
            as usize;
        if id == b"data" {
            let start = pos + 8;
            let end = (start + size).min(wav.len());
            return &wav[start..end];
        }
        pos += 8 + size + (size & 1);
    }
    wav
}

/// The endpoint answers with one JSON document per line; the first line is
/// usually an empty `{"result":[]}` placeholder. The transcript is the first
/// alternative of the first non-empty result. No usable line means the
/// service resolved no speech.
fn parse_response(body: &str) -> Result<String, RelayError> {
    for line in body.lines() {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };
        let Some(results) = value.get("result").and_then(|r| r.as_array()) else {
            continue;
        };
        if results.is_empty() {
            continue;
        }
        if let Some(transcript) = results[0]
            .get("alternative")
            .and_then(|a| a.as_array())
            .and_then(|a| a.first())
            .and_then(|alt| alt.get("transcript"))
            .and_then(|t| t.as_str())
        {
            let transcript = transcript.trim();
            if !transcript.is_empty() {
                return Ok(transcript.to_string());
            }
        }
    }
    Err(RelayError::UnrecognizedSpeech)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transcript_from_second_line() {
        let body = concat!(
            "{\"result\":[]}\n",
            "{\"result\":[{\"alternative\":[{\"transcript\":\"hello there\",\"confidence\":0.98}],\"final\":true}],\"result_index\":0}\n",
        );
        assert_eq!(parse_response(body).unwrap(), "hello there");
    }

    #[test]
    fn empty_results_mean_unrecognized_speech() {
        let body = "{\"result\":[]}\n";
        assert!(matches!(
            parse_response(body),
            Err(RelayError::UnrecognizedSpeech)
        ));
    }

    #[test]
    fn blank_body_means_unrecognized_speech() {
        assert!(matches!(
            parse_response(""),
            Err(RelayError::UnrecognizedSpeech)
        ));
    }

    #[test]
    fn pcm_payload_skips_riff_header() {
        // Minimal WAV: RIFF header, "fmt " chunk (16 bytes), "data" chunk.
        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&36u32.to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&[0u8; 16]);
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&4u32.to_le_bytes());
        wav.extend_from_slice(&[1, 2, 3, 4]);

        assert_eq!(pcm_payload(&wav), &[1, 2, 3, 4]);
    }

    #[test]
    fn pcm_payload_falls_back_to_whole_buffer() {
        let not_wav = [9u8, 9, 9];
        assert_eq!(pcm_payload(&not_wav), &not_wav);
    }
}
