pub mod answers;
pub mod commands;
pub mod config;
pub mod filters;
pub mod paths;
pub mod prompt;
pub mod questions;
pub mod render;

// Re-export commonly used types
pub use answers::{Answers, Language};
pub use filters::{Filter, Normalized, RawValue};
pub use questions::Question;
