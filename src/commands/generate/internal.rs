//! Internal implementation for the generate command

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::{GenerateArgs, Generated};
use crate::answers::Answers;
use crate::config::Config;
use crate::prompt::{self, Prompter, TerminalPrompter};
use crate::render::{self, GeneratedFile};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let interactive = !args.non_interactive && TerminalPrompter::is_attended();
    let mut terminal = TerminalPrompter::new();
    let prompter: Option<&mut dyn Prompter> = if interactive {
        Some(&mut terminal)
    } else {
        None
    };

    let generated = generate(&args, prompter)?;

    if args.json {
        let report = Report {
            answers: &generated.answers,
            output: &args.output,
            dry_run: args.dry_run,
            files: &generated.files,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.dry_run {
        println!(
            "Dry run - would generate {} files in {}:",
            generated.files.len(),
            args.output.display()
        );
        for file in &generated.files {
            println!("  {}", file.path.display());
        }
        return Ok(());
    }

    println!(
        "✓ Generated {} files in {}",
        generated.written.len(),
        args.output.display()
    );
    for file in &generated.files {
        println!("  {}", file.path.display());
    }
    Ok(())
}

pub fn generate(args: &GenerateArgs, prompter: Option<&mut dyn Prompter>) -> Result<Generated> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let (config, config_source) = Config::load(args.config.as_deref(), &cwd)?;
    if let Some(source) = &config_source {
        info!("Using config {}", source.display());
    }

    let set = prompt::resolve(&args.flags(), &config, prompter)?;
    let answers = Answers::from_set(&set)?;
    let files = render::plan(&answers, &config.output.locales)?;

    let written = if args.dry_run {
        Vec::new()
    } else {
        let overwrite = args.force || config.output.overwrite;
        render::write(&files, &args.output, overwrite)?
    };

    Ok(Generated {
        answers,
        files,
        written,
        config_source,
    })
}

#[derive(Serialize)]
struct Report<'a> {
    answers: &'a Answers,
    output: &'a Path,
    dry_run: bool,
    files: &'a [GeneratedFile],
}
