pub mod factory;
pub mod google;
pub mod interface;

pub use factory::create_recognizer;
pub use interface::SpeechRecognizer;
