pub mod factory;
pub mod interface;
pub mod openai_compatible;

pub use factory::create_llm;
pub use interface::{ChatCompletion, Message};
