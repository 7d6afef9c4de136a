//! Question input loading

mod loader;

pub use loader::{InputError, load_questions, parse_questions};
