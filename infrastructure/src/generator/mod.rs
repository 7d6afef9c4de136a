//! Answer generator adapters

mod openai;

pub use openai::{OpenAiGenerator, OpenAiGeneratorConfig};
