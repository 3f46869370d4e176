//! Input normalization for generator answers
//!
//! Every filter is a pure function from a [`RawValue`] to a normalized value.
//! `None` is the invalid sentinel: it means the input could not be turned into
//! a valid answer. It is distinct from an empty string, which is a valid result
//! for optional text.
//!
//! Raw input arrives either as text (a flag value or a typed answer) or as an
//! already-split list (a multi-select answer, a TOML array). List filters work
//! on the list shape; [`RawValue::split_items`] does the text-to-list split at
//! the boundary.
//!
//! # Example
//!
//! ```
//! use webscript_gen::filters::{self, RawValue, StartsWith};
//!
//! assert_eq!(filters::id(&RawValue::from("My Web Script!!")).as_deref(), Some("my-web-script"));
//!
//! let auth = StartsWith::new(["none", "guest", "user", "admin"]);
//! assert_eq!(auth.filter(&RawValue::from("us")).as_deref(), Some("user"));
//! assert_eq!(auth.filter(&RawValue::from("zz")), None);
//! ```

use convert_case::{Case, Casing};
use serde::Serialize;

/// Separator for URL template lists
pub const URL_TEMPLATE_SEPARATOR: char = '|';

// =============================================================================
// Raw input
// =============================================================================

/// An answer as received, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RawValue {
    #[default]
    Absent,
    Text(String),
    List(Vec<String>),
}

impl RawValue {
    /// The text, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Produce the list shape: lists pass through, text is split on `separator`
    pub fn split_items(&self, separator: char) -> Option<Vec<String>> {
        match self {
            RawValue::Absent => None,
            RawValue::Text(text) => Some(text.split(separator).map(str::to_string).collect()),
            RawValue::List(items) => Some(items.clone()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        RawValue::List(items)
    }
}

impl From<Option<String>> for RawValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawValue::Absent, RawValue::Text)
    }
}

// =============================================================================
// Text filters
// =============================================================================

/// Trimmed text; invalid when not text or blank
pub fn required_text(raw: &RawValue) -> Option<String> {
    raw.as_text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Trimmed text; anything that is not text becomes the empty string
pub fn optional_text(raw: &RawValue) -> String {
    raw.as_text().map(str::trim).unwrap_or_default().to_string()
}

/// Kebab-cased identifier; invalid when not text or nothing survives casing
///
/// Words break on punctuation, case changes and letter/digit changes;
/// apostrophes are dropped without breaking (`don't` -> `dont`).
pub fn id(raw: &RawValue) -> Option<String> {
    raw.as_text()
        .map(|text| identifier_words(text).to_case(Case::Kebab))
        .filter(|id| !id.is_empty())
}

/// Space separated alphanumeric runs, ready for case conversion
fn identifier_words(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .collect::<String>()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// List filters
// =============================================================================

/// Trim, drop empties, drop duplicates keeping the first occurrence
///
/// Invalid when nothing is left.
pub fn unique_items<S: AsRef<str>>(items: &[S]) -> Option<Vec<String>> {
    let mut result: Vec<String> = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        if !item.is_empty() && !result.iter().any(|seen| seen == item) {
            result.push(item.to_string());
        }
    }
    Some(result).filter(|r| !r.is_empty())
}

/// [`unique_items`] over text split on `separator` or an existing list
pub fn required_text_list(raw: &RawValue, separator: char) -> Option<Vec<String>> {
    raw.split_items(separator)
        .and_then(|items| unique_items(&items))
}

/// `|`-separated URL templates, each guaranteed to start with `/`
pub fn url_templates(raw: &RawValue) -> Option<Vec<String>> {
    let templates = required_text_list(raw, URL_TEMPLATE_SEPARATOR)?;
    let prefixed: Vec<String> = templates
        .into_iter()
        .map(|t| if t.starts_with('/') { t } else { format!("/{t}") })
        .collect();
    // "foo" and "/foo" collapse once prefixed
    unique_items(&prefixed)
}

/// A list filter whose elements must resolve to one of a fixed set of choices
///
/// An element resolves to a choice when it equals it ignoring case, or
/// when it is a case-insensitive prefix of exactly one choice. Elements that
/// resolve to nothing, or to several choices, are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceList {
    separator: char,
    choices: Vec<String>,
}

impl ChoiceList {
    pub fn new<I, S>(separator: char, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            separator,
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn filter(&self, raw: &RawValue) -> Option<Vec<String>> {
        raw.split_items(self.separator)
            .and_then(|items| self.resolve_all(&items))
    }

    /// Resolve every element, dropping the ones that do not resolve
    pub fn resolve_all<S: AsRef<str>>(&self, items: &[S]) -> Option<Vec<String>> {
        let resolved: Vec<&str> = items
            .iter()
            .filter_map(|item| self.resolve(item.as_ref()))
            .collect();
        unique_items(&resolved)
    }

    /// Resolve one element to its canonical choice
    pub fn resolve(&self, item: &str) -> Option<&str> {
        let needle = item.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(exact) = self.choices.iter().find(|c| c.to_lowercase() == needle) {
            return Some(exact.as_str());
        }

        let mut candidates = self
            .choices
            .iter()
            .filter(|c| c.to_lowercase().starts_with(&needle));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(only.as_str()),
            _ => None,
        }
    }
}

// =============================================================================
// Single-choice filters
// =============================================================================

/// Pick the first choice, in declared order, starting with the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartsWith {
    choices: Vec<String>,
}

impl StartsWith {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn filter(&self, raw: &RawValue) -> Option<String> {
        let needle = lowercase_needle(raw)?;
        self.choices
            .iter()
            .find(|c| c.to_lowercase().starts_with(&needle))
            .cloned()
    }
}

/// Pick through an alias table: `java` -> `Java`
///
/// Entries are tried in declared order. An entry matches when its alias or
/// its canonical value starts with the input, so both typed abbreviations and
/// answers picked from the canonical list resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasStartsWith {
    entries: Vec<(String, String)>,
}

impl AliasStartsWith {
    pub fn new<I, A, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(alias, canonical)| (alias.into(), canonical.into()))
                .collect(),
        }
    }

    /// Canonical values in declared order
    pub fn canonical_values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, canonical)| canonical.as_str())
    }

    pub fn filter(&self, raw: &RawValue) -> Option<String> {
        let needle = lowercase_needle(raw)?;
        self.entries
            .iter()
            .find(|(alias, canonical)| {
                alias.to_lowercase().starts_with(&needle)
                    || canonical.to_lowercase().starts_with(&needle)
            })
            .map(|(_, canonical)| canonical.clone())
    }
}

fn lowercase_needle(raw: &RawValue) -> Option<String> {
    required_text(raw).map(|text| text.to_lowercase())
}

// =============================================================================
// Filter as data
// =============================================================================

/// A normalized answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    Text(String),
    List(Vec<String>),
}

impl Normalized {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Normalized::Text(text) => Some(text),
            Normalized::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Normalized::List(items) => Some(items),
            Normalized::Text(_) => None,
        }
    }
}

impl From<Normalized> for RawValue {
    fn from(value: Normalized) -> Self {
        match value {
            Normalized::Text(text) => RawValue::Text(text),
            Normalized::List(items) => RawValue::List(items),
        }
    }
}

/// The filter a question's answer goes through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    RequiredText,
    OptionalText,
    Id,
    TextList { separator: char },
    ChoiceList(ChoiceList),
    StartsWith(StartsWith),
    AliasStartsWith(AliasStartsWith),
    UrlTemplates,
}

impl Filter {
    pub fn apply(&self, raw: &RawValue) -> Option<Normalized> {
        match self {
            Filter::RequiredText => required_text(raw).map(Normalized::Text),
            Filter::OptionalText => Some(Normalized::Text(optional_text(raw))),
            Filter::Id => id(raw).map(Normalized::Text),
            Filter::TextList { separator } => {
                required_text_list(raw, *separator).map(Normalized::List)
            }
            Filter::ChoiceList(list) => list.filter(raw).map(Normalized::List),
            Filter::StartsWith(choose) => choose.filter(raw).map(Normalized::Text),
            Filter::AliasStartsWith(choose) => choose.filter(raw).map(Normalized::Text),
            Filter::UrlTemplates => url_templates(raw).map(Normalized::List),
        }
    }
}
