//! Typed answers, built once every question has been resolved

use anyhow::{Context, Result};
use serde::Serialize;

use crate::filters::Normalized;
use crate::questions::{self, AnswerSet};

/// Implementation language for generated controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    #[serde(rename = "Java")]
    Java,
    #[serde(rename = "JavaScript")]
    JavaScript,
    #[serde(rename = "Both Java & JavaScript")]
    Both,
}

impl Language {
    /// Parse a canonical language value as produced by the language filter
    pub fn from_canonical(value: &str) -> Option<Self> {
        match value {
            questions::LANGUAGE_JAVA => Some(Language::Java),
            questions::LANGUAGE_JAVASCRIPT => Some(Language::JavaScript),
            questions::LANGUAGE_BOTH => Some(Language::Both),
            _ => None,
        }
    }

    pub fn includes_java(self) -> bool {
        self != Language::JavaScript
    }

    pub fn includes_javascript(self) -> bool {
        self != Language::Java
    }
}

/// Everything the renderer needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answers {
    pub id: String,
    pub language: Language,
    pub methods: Vec<String>,
    pub template_formats: Vec<String>,
    pub shortname: String,
    pub description: String,
    pub url_templates: Vec<String>,
    pub format_selector: String,
    pub format_default: String,
    pub authentication: String,
    pub authentication_runas: String,
    pub class_package: String,
}

impl Answers {
    /// Build typed answers from the resolved answer set
    ///
    /// Optional questions that were skipped take their catalogue default.
    pub fn from_set(set: &AnswerSet) -> Result<Self> {
        let language = text(set, "language")?;

        Ok(Self {
            id: text(set, "id")?,
            language: Language::from_canonical(&language)
                .with_context(|| format!("Unknown language '{}'", language))?,
            methods: list(set, "methods")?,
            template_formats: list(set, "template_formats")?,
            shortname: text(set, "shortname")?,
            description: text_or(set, "description", ""),
            url_templates: list(set, "url_templates")?,
            format_selector: text(set, "format_selector")?,
            format_default: text(set, "format_default")?,
            authentication: text(set, "authentication")?,
            authentication_runas: text_or(set, "authentication_runas", ""),
            class_package: text_or(set, "class_package", questions::DEFAULT_CLASS_PACKAGE),
        })
    }
}

fn text(set: &AnswerSet, name: &str) -> Result<String> {
    questions::answer(set, name)
        .and_then(Normalized::as_text)
        .map(str::to_string)
        .with_context(|| format!("Missing answer for '{}'", name))
}

fn text_or(set: &AnswerSet, name: &str, fallback: &str) -> String {
    text(set, name).unwrap_or_else(|_| fallback.to_string())
}

fn list(set: &AnswerSet, name: &str) -> Result<Vec<String>> {
    questions::answer(set, name)
        .and_then(Normalized::as_list)
        .map(<[String]>::to_vec)
        .with_context(|| format!("Missing answer for '{}'", name))
}
