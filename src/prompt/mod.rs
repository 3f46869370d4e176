//! Resolve every question to a normalized answer
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): the [`Prompter`] seam and [`resolve`]
//! - Internal implementation: resolution order and selection parsing in internal.rs
//!
//! Each question is answered from the first source that has a value:
//!
//! 1. **Flag** - applied through the question's filter; an invalid value is fatal
//! 2. **Prompt** - when interactive; an invalid answer is reported and asked again
//! 3. **Default** - `[defaults]` from the config file, then the built-in default;
//!    used as the empty-input answer when prompting, or directly otherwise
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use webscript_gen::{config::Config, prompt};
//!
//! let mut flags = HashMap::new();
//! flags.insert("id", "My Web Script".to_string());
//!
//! // Non-interactive: everything else must have a default
//! let answers = prompt::resolve(&flags, &Config::default(), None)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;
mod terminal;

use anyhow::Result;
use std::collections::HashMap;

use crate::config::Config;
use crate::filters::RawValue;
use crate::questions::{AnswerSet, Question};

pub use terminal::TerminalPrompter;

/// Flag values keyed by question name
pub type Flags = HashMap<&'static str, String>;

/// Times a question is asked before giving up
pub const MAX_ATTEMPTS: usize = 5;

/// Interactive question asking
pub trait Prompter {
    /// Ask a question and return the line typed, untrimmed
    ///
    /// `default` is what an empty answer stands for, if anything.
    fn ask(&mut self, question: &Question, default: Option<&RawValue>) -> Result<String>;

    /// Report that the last answer to `question` was rejected
    fn reject(&mut self, question: &Question) -> Result<()>;
}

/// Resolve the whole catalogue
///
/// Pass `None` as the prompter to run non-interactively.
pub fn resolve(
    flags: &Flags,
    config: &Config,
    prompter: Option<&mut dyn Prompter>,
) -> Result<AnswerSet> {
    internal::resolve(flags, config, prompter)
}
