use std::sync::Arc;
use tracing::info;

use crate::config::{TtsConfig, TtsMode};
use super::command::CommandSynthesizer;
use super::interface::SpeechSynthesizer;

/// Candidate speech commands for the current platform, tried in order.
fn platform_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["say"]
    } else if cfg!(target_os = "linux") {
        &["espeak-ng", "espeak"]
    } else if cfg!(target_os = "windows") {
        &["powershell"]
    } else {
        &[]
    }
}

/// Fixed arguments for a speech command. `say` and espeak take the text
/// directly; PowerShell has no speech verb of its own, so the script block
/// drives the System.Speech synthesizer with the appended text as its
/// arguments.
fn speech_args(program: &str) -> Vec<String> {
    if program.eq_ignore_ascii_case("powershell") {
        vec![
            "-NoProfile".to_string(),
            "-Command".to_string(),
            "& {Add-Type -AssemblyName System.Speech; \
             (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak(($args -join ' '))}"
                .to_string(),
        ]
    } else {
        Vec::new()
    }
}

/// Resolve the local synthesis capability once at startup.
///
/// `auto` probes the platform's candidate commands and returns `None` when
/// none can be spawned; `on` trusts the configured (or first candidate)
/// program without probing; `off` disables synthesis.
pub fn probe_synthesizer(config: &TtsConfig) -> Option<Arc<dyn SpeechSynthesizer>> {
    match config.mode {
        TtsMode::Off => {
            info!("speech synthesis disabled by configuration");
            None
        }
        TtsMode::On => {
            let Some(program) = config
                .program
                .clone()
                .or_else(|| platform_candidates().first().map(|p| p.to_string()))
            else {
                info!("speech synthesis forced on but no speech command exists for this platform");
                return None;
            };
            info!(%program, "speech synthesis forced on");
            let args = speech_args(&program);
            Some(Arc::new(CommandSynthesizer::new(program, args)))
        }
        TtsMode::Auto => {
            if let Some(program) = &config.program {
                if CommandSynthesizer::is_available(program) {
                    info!(%program, "speech synthesis available");
                    let args = speech_args(program);
                    return Some(Arc::new(CommandSynthesizer::new(program.clone(), args)));
                }
                info!(%program, "configured speech program not available");
                return None;
            }
            for candidate in platform_candidates() {
                if CommandSynthesizer::is_available(candidate) {
                    info!(program = %candidate, "speech synthesis available");
                    let args = speech_args(candidate);
                    return Some(Arc::new(CommandSynthesizer::new(*candidate, args)));
                }
            }
            info!("no local speech engine found, replies will not be spoken");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_mode_disables_synthesis() {
        let config = TtsConfig {
            mode: TtsMode::Off,
            program: Some("say".to_string()),
        };
        assert!(probe_synthesizer(&config).is_none());
    }

    #[test]
    fn on_mode_uses_configured_program_without_probing() {
        let config = TtsConfig {
            mode: TtsMode::On,
            program: Some("definitely-not-installed-tts".to_string()),
        };
        let engine = probe_synthesizer(&config).unwrap();
        assert_eq!(engine.name(), "definitely-not-installed-tts");
    }

    #[test]
    fn every_desktop_platform_has_a_speech_candidate() {
        if cfg!(any(
            target_os = "macos",
            target_os = "linux",
            target_os = "windows"
        )) {
            assert!(!platform_candidates().is_empty());
        }
    }

    #[test]
    fn powershell_speaks_through_system_speech() {
        let args = speech_args("powershell");
        assert!(args.contains(&"-Command".to_string()));
        assert!(args.iter().any(|a| a.contains("System.Speech")));
        // Direct speech commands take the text as their only argument.
        assert!(speech_args("say").is_empty());
        assert!(speech_args("espeak-ng").is_empty());
    }

    #[test]
    fn auto_mode_skips_unavailable_configured_program() {
        let config = TtsConfig {
            mode: TtsMode::Auto,
            program: Some("definitely-not-installed-tts".to_string()),
        };
        assert!(probe_synthesizer(&config).is_none());
    }
}
