//! Search subdomain: documents returned by a web search provider.

pub mod reference;

pub use reference::{Reference, SearchResponse};
