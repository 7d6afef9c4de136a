//! Run summary output

pub mod summary;
