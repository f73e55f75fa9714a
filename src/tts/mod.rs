pub mod command;
pub mod factory;
pub mod interface;

pub use factory::probe_synthesizer;
pub use interface::SpeechSynthesizer;
