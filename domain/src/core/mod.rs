//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: one riddle-style question from the input collection
//! - [`string`]: character-based length and truncation helpers

pub mod question;
pub mod string;
