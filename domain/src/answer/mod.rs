//! Answer subdomain: turning a raw model reply into a short canonical answer.
//!
//! - [`normalizer`]: the six-stage `clean_answer_aggressive` transform
//! - [`entities`]: [`Answer`](entities::Answer), [`AnswerRecord`](entities::AnswerRecord)
//!   and the post-generation quality gate

pub mod entities;
pub mod normalizer;
