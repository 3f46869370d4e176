//! The question catalogue
//!
//! One file shows every answer the generator collects, the flag that can
//! supply it, how it is prompted and which filter normalizes it. The
//! catalogue has no I/O; [`crate::prompt`] walks it in order.

use crate::filters::{AliasStartsWith, ChoiceList, Filter, Normalized, RawValue, StartsWith};

pub const LANGUAGES: [(&str, &str); 3] = [
    ("java", LANGUAGE_JAVA),
    ("javascript", LANGUAGE_JAVASCRIPT),
    ("both", LANGUAGE_BOTH),
];
pub const LANGUAGE_JAVA: &str = "Java";
pub const LANGUAGE_JAVASCRIPT: &str = "JavaScript";
pub const LANGUAGE_BOTH: &str = "Both Java & JavaScript";

pub const METHODS: [&str; 4] = ["get", "post", "put", "delete"];
pub const TEMPLATE_FORMATS: [&str; 6] = ["html", "json", "xml", "csv", "atom", "rss"];
pub const FORMAT_SELECTORS: [&str; 3] = ["any", "argument", "extension"];
pub const AUTHENTICATIONS: [&str; 4] = ["none", "guest", "user", "admin"];

pub const DEFAULT_CLASS_PACKAGE: &str = "org.example.webscripts";

/// Answers resolved so far, in catalogue order
pub type AnswerSet = Vec<(&'static str, Normalized)>;

/// Look up an earlier answer by question name
pub fn answer<'a>(answers: &'a AnswerSet, name: &str) -> Option<&'a Normalized> {
    answers.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
}

/// How a question is presented interactively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text
    Input,
    /// Pick one of the choices
    Select,
    /// Pick any number of the choices
    MultiSelect,
}

/// A question and everything needed to resolve it
#[derive(Debug, Clone)]
pub struct Question {
    /// Answer key, also the key in the config file's `[defaults]` table
    pub name: &'static str,
    /// Long flag name, without dashes
    pub flag: &'static str,
    pub short: char,
    /// Flag help text
    pub help: &'static str,
    /// Interactive prompt
    pub message: &'static str,
    /// Part of `message` rendered highlighted
    pub highlight: Option<&'static str>,
    pub kind: QuestionKind,
    pub filter: Filter,
    pub default: Option<RawValue>,
    /// Shown when an answer fails its filter
    pub invalid: &'static str,
    /// Choices come from an earlier list answer instead of the filter
    pub choices_from: Option<&'static str>,
    /// Skip the question unless this holds for the answers so far
    pub when: Option<fn(&AnswerSet) -> bool>,
}

impl Question {
    fn new(
        name: &'static str,
        flag: &'static str,
        short: char,
        kind: QuestionKind,
        filter: Filter,
    ) -> Self {
        Self {
            name,
            flag,
            short,
            help: "",
            message: "",
            highlight: None,
            kind,
            filter,
            default: None,
            invalid: "",
            choices_from: None,
            when: None,
        }
    }

    fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    fn message(mut self, message: &'static str, highlight: Option<&'static str>) -> Self {
        self.message = message;
        self.highlight = highlight;
        self
    }

    fn default(mut self, default: impl Into<RawValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn invalid(mut self, invalid: &'static str) -> Self {
        self.invalid = invalid;
        self
    }

    /// Choices in display order; empty for free text
    pub fn choices(&self) -> Vec<&str> {
        match &self.filter {
            Filter::ChoiceList(list) => list.choices().iter().map(String::as_str).collect(),
            Filter::StartsWith(choose) => choose.choices().iter().map(String::as_str).collect(),
            Filter::AliasStartsWith(choose) => choose.canonical_values().collect(),
            _ => Vec::new(),
        }
    }

    /// Whether the question applies given the answers so far
    pub fn applies(&self, answers: &AnswerSet) -> bool {
        self.when.map_or(true, |when| when(answers))
    }

    /// Bind choices that depend on earlier answers
    ///
    /// Returns the question unchanged when it has no dependency. A dependent
    /// question gets a [`StartsWith`] over the earlier list answer and, if it
    /// has no default of its own, defaults to the first of them.
    pub fn bind(&self, answers: &AnswerSet) -> Question {
        let mut bound = self.clone();
        let Some(source) = self.choices_from else {
            return bound;
        };

        let choices: Vec<String> = answer(answers, source)
            .and_then(Normalized::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        if bound.default.is_none() {
            bound.default = choices.first().cloned().map(RawValue::Text);
        }
        bound.filter = Filter::StartsWith(StartsWith::new(choices));
        bound
    }

    /// Built-in default, falling back to the first choice for selections
    pub fn effective_default(&self) -> Option<RawValue> {
        if self.default.is_some() {
            return self.default.clone();
        }
        match self.kind {
            QuestionKind::Select => self.choices().first().map(|c| RawValue::from(*c)),
            _ => None,
        }
    }
}

fn includes_java(answers: &AnswerSet) -> bool {
    answer(answers, "language")
        .and_then(Normalized::as_text)
        .map_or(true, |language| language != LANGUAGE_JAVASCRIPT)
}

/// All questions, in the order they are asked
pub fn catalogue() -> Vec<Question> {
    use QuestionKind::*;

    vec![
        Question::new("id", "id", 'i', Input, Filter::Id)
            .help("Webscript id")
            .message("What webscript id should we use?", Some("webscript id"))
            .invalid("The id needs at least one letter or digit"),
        Question::new(
            "language",
            "language",
            'l',
            Select,
            Filter::AliasStartsWith(AliasStartsWith::new(LANGUAGES)),
        )
        .help("Language for webscript: java, javascript or both")
        .message("Which language would you like to develop your script in?", None)
        .invalid("Choose java, javascript or both"),
        Question::new(
            "methods",
            "methods",
            'M',
            MultiSelect,
            Filter::ChoiceList(ChoiceList::new(',', METHODS)),
        )
        .help("A comma separated list of: get, put, post and/or delete")
        .message("Which HTTP methods would you like to support?", None)
        .default(vec!["get".to_string()])
        .invalid("Choose at least one of get, post, put or delete"),
        Question::new(
            "template_formats",
            "template-formats",
            't',
            MultiSelect,
            Filter::ChoiceList(ChoiceList::new(',', TEMPLATE_FORMATS)),
        )
        .help("A comma separated list of: html, json, xml, csv, atom and/or rss")
        .message("Which response formats would you like to support?", None)
        .default(vec!["html".to_string()])
        .invalid("Choose at least one of html, json, xml, csv, atom or rss"),
        Question::new("shortname", "shortname", 's', Input, Filter::RequiredText)
            .help("Shortname for webscript")
            .message("What <shortname> should we use?", Some("<shortname>"))
            .invalid("The shortname cannot be empty"),
        Question::new(
            "description",
            "description",
            'd',
            Input,
            Filter::OptionalText,
        )
        .help("Description for webscript")
        .message("What <description> should we use?", Some("<description>"))
        .default(""),
        Question::new(
            "url_templates",
            "url-templates",
            'u',
            Input,
            Filter::UrlTemplates,
        )
        .help("Vertical bar '|' separated list of url templates")
        .message("Provide an <url> value", Some("<url>"))
        .invalid("Provide at least one url template, separate several with '|'"),
        Question::new(
            "format_selector",
            "format-selector",
            'f',
            Select,
            Filter::StartsWith(StartsWith::new(FORMAT_SELECTORS)),
        )
        .help("Format selection technique: any, argument or extension")
        .message("How will the <format> be specified?", Some("<format>"))
        .invalid("Choose any, argument or extension"),
        Question {
            choices_from: Some("template_formats"),
            ..Question::new(
                "format_default",
                "format-default",
                'F',
                Select,
                Filter::StartsWith(StartsWith::new(TEMPLATE_FORMATS)),
            )
            .help("Default format to use if no selection is made")
            .message("Which <format @default> should we use?", Some("@default"))
            .invalid("The default format must be one of the chosen template formats")
        },
        Question::new(
            "authentication",
            "authentication",
            'a',
            Select,
            Filter::StartsWith(StartsWith::new(AUTHENTICATIONS)),
        )
        .help("Type of authentication required: none, guest, user or admin")
        .message(
            "What level of <authentication> is required to run the webscript?",
            Some("<authentication>"),
        )
        .invalid("Choose none, guest, user or admin"),
        Question::new(
            "authentication_runas",
            "authentication-runas",
            'r',
            Input,
            Filter::OptionalText,
        )
        .help("User webscript should run as")
        .message(
            "Which user should the webscript <authentication @runas>? (leave empty for the calling user)",
            Some("@runas"),
        )
        .default(""),
        Question {
            when: Some(includes_java),
            ..Question::new(
                "class_package",
                "class-package",
                'p',
                Input,
                Filter::RequiredText,
            )
            .help("Java package for generated controller classes")
            .message("Which Java <package> should controller classes go in?", Some("<package>"))
            .default(DEFAULT_CLASS_PACKAGE)
            .invalid("The package cannot be empty")
        },
    ]
}

/// Find a question by name
#[cfg(test)]
pub(crate) fn find(name: &str) -> Option<Question> {
    catalogue().into_iter().find(|q| q.name == name)
}
