//! Prompt domain
//!
//! Fixed instruction templates for each model call in the pipeline.

mod entities;
mod template;

pub use entities::Prompt;
pub use template::PromptTemplate;
