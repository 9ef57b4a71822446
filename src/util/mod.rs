//! Small shared helpers

pub mod age;

pub use age::{age_since, format_age};
