//! Prompting on the terminal

use anyhow::{Context, Result};
use console::{style, Term};

use super::Prompter;
use crate::filters::RawValue;
use crate::questions::{Question, QuestionKind};

/// Asks questions on stderr and reads answers from stdin
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Whether someone is at the terminal to answer
    pub fn is_attended() -> bool {
        console::user_attended_stderr()
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn highlighted(question: &Question) -> String {
    match question.highlight {
        Some(part) => question
            .message
            .replacen(part, &style(part).yellow().to_string(), 1),
        None => question.message.to_string(),
    }
}

fn describe_default(default: &RawValue) -> Option<String> {
    match default {
        RawValue::Text(text) if !text.is_empty() => Some(text.clone()),
        RawValue::List(items) if !items.is_empty() => Some(items.join(", ")),
        _ => None,
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &Question, default: Option<&RawValue>) -> Result<String> {
        self.term.write_line(&format!(
            "{} {}",
            style("?").green().bold(),
            highlighted(question)
        ))?;

        let choices = question.choices();
        for (i, choice) in choices.iter().enumerate() {
            self.term
                .write_line(&format!("  {}) {}", style(i + 1).cyan(), choice))?;
        }

        let hint = match question.kind {
            QuestionKind::MultiSelect => "numbers or names, comma separated",
            QuestionKind::Select => "number or name",
            QuestionKind::Input => "",
        };
        let mut prompt = String::from("  ");
        if !hint.is_empty() {
            prompt.push_str(&format!("({}) ", style(hint).dim()));
        }
        if let Some(shown) = default.and_then(describe_default) {
            prompt.push_str(&format!("[{}] ", shown));
        }
        prompt.push_str("> ");
        self.term.write_str(&prompt)?;

        self.term
            .read_line()
            .with_context(|| format!("Failed to read answer for '{}'", question.name))
    }

    fn reject(&mut self, question: &Question) -> Result<()> {
        self.term
            .write_line(&format!("  {} {}", style(">>").red(), question.invalid))?;
        Ok(())
    }
}
