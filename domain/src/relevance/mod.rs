//! Relevance subdomain: picking the few sentences worth showing the model.

pub mod extractor;

pub use extractor::{RankedSentence, extract_relevant_sentences};
