//! Internal implementation for the prompt module

use anyhow::Result;
use tracing::{debug, warn};

use super::{Flags, Prompter, MAX_ATTEMPTS};
use crate::config::Config;
use crate::filters::{Normalized, RawValue};
use crate::questions::{self, AnswerSet, Question, QuestionKind};

pub fn resolve(
    flags: &Flags,
    config: &Config,
    mut prompter: Option<&mut dyn Prompter>,
) -> Result<AnswerSet> {
    let mut answers = AnswerSet::new();

    for question in questions::catalogue() {
        if !question.applies(&answers) {
            debug!(question = question.name, "skipped");
            continue;
        }

        let question = question.bind(&answers);
        let default =
            config_default(&question, config).or_else(|| question.effective_default());

        let value = if let Some(flag) = flags.get(question.name) {
            from_flag(&question, flag)?
        } else if let Some(prompter) = prompter.as_deref_mut() {
            from_prompt(&question, default.as_ref(), prompter)?
        } else {
            from_default(&question, default.as_ref())?
        };

        debug!(question = question.name, value = ?value, "resolved");
        answers.push((question.name, value));
    }

    Ok(answers)
}

/// Configured default, unless it falls outside choices bound to earlier answers
fn config_default(question: &Question, config: &Config) -> Option<RawValue> {
    let default = config.default_for(question.name)?;
    if question.choices_from.is_some() && question.filter.apply(&default).is_none() {
        warn!(
            question = question.name,
            "configured default is not among the choices, using the first choice"
        );
        return None;
    }
    Some(default)
}

fn from_flag(question: &Question, flag: &str) -> Result<Normalized> {
    match question.filter.apply(&RawValue::from(flag)) {
        Some(value) => Ok(value),
        None => anyhow::bail!(
            "Invalid value '{}' for --{}: {}",
            flag,
            question.flag,
            question.invalid
        ),
    }
}

fn from_default(question: &Question, default: Option<&RawValue>) -> Result<Normalized> {
    let Some(default) = default else {
        anyhow::bail!(
            "No value for '{}'. Pass --{} or run interactively.",
            question.name,
            question.flag
        );
    };

    match question.filter.apply(default) {
        Some(value) => Ok(value),
        None => anyhow::bail!(
            "Default for '{}' is not valid: {}",
            question.name,
            question.invalid
        ),
    }
}

fn from_prompt(
    question: &Question,
    default: Option<&RawValue>,
    prompter: &mut dyn Prompter,
) -> Result<Normalized> {
    for attempt in 1..=MAX_ATTEMPTS {
        let input = prompter.ask(question, default)?;
        let raw = interpret(question, &input, default);

        if let Some(value) = question.filter.apply(&raw) {
            return Ok(value);
        }

        debug!(question = question.name, attempt, "answer rejected");
        prompter.reject(question)?;
    }

    anyhow::bail!(
        "Gave up on '{}' after {} invalid answers",
        question.name,
        MAX_ATTEMPTS
    )
}

/// Turn a typed line into the raw value the filter sees
///
/// Empty input stands for the default. For selections, a choice number
/// stands for that choice; multi-select takes comma separated numbers or names.
pub(super) fn interpret(question: &Question, input: &str, default: Option<&RawValue>) -> RawValue {
    let input = input.trim();
    if input.is_empty() {
        return default.cloned().unwrap_or_else(|| RawValue::from(input));
    }

    let choices = question.choices();
    let by_number = |token: &str| -> Option<String> {
        let n: usize = token.parse().ok()?;
        n.checked_sub(1)
            .and_then(|i| choices.get(i))
            .map(|c| c.to_string())
    };

    match question.kind {
        QuestionKind::Input => RawValue::from(input),
        QuestionKind::Select => RawValue::from(by_number(input).unwrap_or_else(|| input.to_string())),
        QuestionKind::MultiSelect => RawValue::List(
            input
                .split(',')
                .map(str::trim)
                .map(|token| by_number(token).unwrap_or_else(|| token.to_string()))
                .collect(),
        ),
    }
}
