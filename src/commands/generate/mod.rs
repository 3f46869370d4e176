//! Generate webscript files from flags, prompts and config defaults
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): CLI arguments and entry points
//! - Internal implementation: the generate pipeline in internal.rs
//!
//! # Process
//!
//! 1. **Config**: load `--config`, `./webscript-gen.toml` or the user config
//! 2. **Answers**: resolve every question (flag, prompt, default)
//! 3. **Plan**: render every file in memory
//! 4. **Write**: write into `--output`, unless `--dry-run`
//!
//! # Example
//!
//! ```no_run
//! use webscript_gen::commands::generate::{self, GenerateArgs};
//!
//! let args = GenerateArgs {
//!     id: Some("user-profile".to_string()),
//!     shortname: Some("User profile".to_string()),
//!     url_templates: Some("/users/{user}".to_string()),
//!     non_interactive: true,
//!     output: "out".into(),
//!     ..Default::default()
//! };
//! let generated = generate::generate(&args, None)?;
//! println!("{} files", generated.written.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::answers::Answers;
use crate::prompt::{Flags, Prompter};
use crate::render::GeneratedFile;

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Webscript id
    #[arg(short = 'i', long)]
    pub id: Option<String>,

    /// Language for webscript: java, javascript or both
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// A comma separated list of: get, put, post and/or delete
    #[arg(short = 'M', long)]
    pub methods: Option<String>,

    /// A comma separated list of: html, json, xml, csv, atom and/or rss
    #[arg(short = 't', long)]
    pub template_formats: Option<String>,

    /// Shortname for webscript
    #[arg(short = 's', long)]
    pub shortname: Option<String>,

    /// Description for webscript
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// Vertical bar '|' separated list of url templates
    #[arg(short = 'u', long)]
    pub url_templates: Option<String>,

    /// Format selection technique: any, argument or extension
    #[arg(short = 'f', long)]
    pub format_selector: Option<String>,

    /// Default format to use if no selection is made
    #[arg(short = 'F', long)]
    pub format_default: Option<String>,

    /// Type of authentication required: none, guest, user or admin
    #[arg(short = 'a', long)]
    pub authentication: Option<String>,

    /// User webscript should run as
    #[arg(short = 'r', long)]
    pub authentication_runas: Option<String>,

    /// Java package for generated controller classes
    #[arg(short = 'p', long)]
    pub class_package: Option<String>,

    /// Directory to write generated files into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Config file (default: ./webscript-gen.toml, then the user config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Never prompt; unanswered questions use their defaults
    #[arg(long)]
    pub non_interactive: bool,

    /// Replace files that already exist
    #[arg(long)]
    pub force: bool,

    /// Show what would be generated without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Output answers and files as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Flag values keyed by question name
    pub fn flags(&self) -> Flags {
        let values = [
            ("id", &self.id),
            ("language", &self.language),
            ("methods", &self.methods),
            ("template_formats", &self.template_formats),
            ("shortname", &self.shortname),
            ("description", &self.description),
            ("url_templates", &self.url_templates),
            ("format_selector", &self.format_selector),
            ("format_default", &self.format_default),
            ("authentication", &self.authentication),
            ("authentication_runas", &self.authentication_runas),
            ("class_package", &self.class_package),
        ];

        values
            .into_iter()
            .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
            .collect()
    }
}

/// Result of a generate run
#[derive(Debug)]
pub struct Generated {
    pub answers: Answers,
    pub files: Vec<GeneratedFile>,
    /// Paths written; empty on a dry run
    pub written: Vec<PathBuf>,
    /// Config file used, if any
    pub config_source: Option<PathBuf>,
}

/// Run the generate command on the terminal
pub fn execute(args: GenerateArgs) -> Result<()> {
    internal::execute(args)
}

/// Generate with an explicit prompter (`None` for non-interactive)
pub fn generate(args: &GenerateArgs, prompter: Option<&mut dyn Prompter>) -> Result<Generated> {
    internal::generate(args, prompter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    #[test]
    fn test_short_aliases() {
        let cli = TestCli::parse_from([
            "webscript-gen",
            "-i",
            "orders",
            "-M",
            "get,put",
            "-F",
            "json",
            "-r",
            "admin",
        ]);
        let flags = cli.args.flags();

        assert_eq!(flags.get("id").map(String::as_str), Some("orders"));
        assert_eq!(flags.get("methods").map(String::as_str), Some("get,put"));
        assert_eq!(flags.get("format_default").map(String::as_str), Some("json"));
        assert_eq!(flags.get("authentication_runas").map(String::as_str), Some("admin"));
        assert!(!flags.contains_key("language"));
        assert_eq!(cli.args.output, PathBuf::from("."));
    }

    #[test]
    fn test_long_flags_match_question_flags() {
        let mut argv = vec!["webscript-gen".to_string()];
        for question in crate::questions::catalogue() {
            argv.push(format!("--{}", question.flag));
            argv.push("x".to_string());
        }

        let cli = TestCli::try_parse_from(argv).expect("every question has a flag");
        assert_eq!(cli.args.flags().len(), crate::questions::catalogue().len());
    }
}
