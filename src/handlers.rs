use axum::{
    extract::{Multipart, State},
    response::Html,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::llm::Message;
use crate::state::AppState;
use crate::transcode;

/// One completed voice round-trip: what the user said and what the model
/// answered. Serialized as the success body of `/process-voice/`.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceTurn {
    pub text: String,
    pub reply: String,
}

/// Serve the embedded microphone-capture page.
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "synthesis": state.synthesizer.as_ref().map(|s| s.name().to_string()),
    }))
}

/// Handle one audio upload from the browser microphone.
///
/// Every failure is converted to a `{"error": ...}` body; the endpoint
/// always answers 200 and never propagates an error to the transport layer.
pub async fn process_voice(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Json<Value> {
    match run_pipeline(&state, multipart).await {
        Ok(turn) => {
            info!("You: {}", turn.text);
            info!("Bot: {}", turn.reply);
            Json(json!({ "text": turn.text, "reply": turn.reply }))
        }
        Err(err) => {
            warn!("voice request failed: {}", err);
            let message = err.user_message(state.config.relay.error_reporting);
            Json(json!({ "error": message }))
        }
    }
}

/// The relay pipeline: upload -> transcode -> transcribe -> generate ->
/// speak. Strictly sequential; the first failing stage short-circuits.
async fn run_pipeline(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<VoiceTurn, RelayError> {
    let audio = read_audio_field(&mut multipart).await?;

    let clip = transcode::transcode_to_pcm(&audio, state.config.asr.sample_rate).await?;
    let text = state.recognizer.transcribe(clip.wav_path()).await?;
    drop(clip);

    let reply = state
        .llm
        .complete(
            vec![Message::user(text.clone())],
            Some(&state.config.llm.system_prompt),
        )
        .await?;

    // Playback runs detached from the response so concurrent requests do not
    // serialize on the local audio device.
    if let Some(synthesizer) = &state.synthesizer {
        let synthesizer = synthesizer.clone();
        let spoken = reply.clone();
        tokio::spawn(async move {
            if let Err(e) = synthesizer.speak(&spoken).await {
                error!("speech synthesis failed: {}", e);
            }
        });
    } else {
        tracing::debug!("no speech engine available, skipping playback");
    }

    Ok(VoiceTurn { text, reply })
}

/// Pull the `file` field's bytes out of the multipart body.
async fn read_audio_field(multipart: &mut Multipart) -> Result<Vec<u8>, RelayError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RelayError::Other(anyhow::anyhow!("reading multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| RelayError::Other(anyhow::anyhow!("reading upload: {}", e)))?;
            if data.is_empty() {
                return Err(RelayError::EmptyUpload);
            }
            return Ok(data.to_vec());
        }
    }
    Err(RelayError::MissingAudioField)
}
