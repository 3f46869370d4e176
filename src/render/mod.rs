//! Render answers into webscript files
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): file plan and writing
//! - Internal implementation: templates and naming in internal.rs
//!
//! For every chosen method `m` the plan contains:
//!
//! ```text
//! {id}.{m}.desc.xml                   # descriptor
//! {id}.{m}.{format}.ftl               # one per template format
//! {id}.{m}.properties                 # en, plus {id}.{m}_{locale}.properties
//! {id}.{m}.js                         # unless the language is Java only
//! {ClassName}.java                    # unless the language is JavaScript only
//! webscript-{id}-{m}-context.xml      # unless the language is JavaScript only
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use webscript_gen::{answers::Answers, render};
//!
//! # fn answers() -> Answers { unimplemented!() }
//! let answers = answers();
//! let files = render::plan(&answers, &["en".to_string()])?;
//! render::write(&files, Path::new("out"), false)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::answers::Answers;

/// Locales with embedded property templates
pub const LOCALES: [&str; 3] = ["en", "ar", "fr"];

/// A rendered file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    /// Template the file was rendered from
    pub template: &'static str,
    #[serde(skip)]
    pub content: String,
}

/// Render every file for the answers, without touching the filesystem
pub fn plan(answers: &Answers, locales: &[String]) -> Result<Vec<GeneratedFile>> {
    internal::plan(answers, locales)
}

/// Write planned files into `output_dir`
///
/// Refuses to write anything if one of the files exists, unless `overwrite`,
/// or if a directory sits at one of the paths. Files are staged beside their
/// targets and renamed into place only once all of them are written, so a
/// failed write leaves existing files untouched. Returns the paths written.
pub fn write(files: &[GeneratedFile], output_dir: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    internal::write(files, output_dir, overwrite)
}

/// Java controller class name: `my-script` + `get` -> `MyScriptGet`
pub fn class_name(id: &str, method: &str) -> String {
    internal::class_name(id, method)
}
