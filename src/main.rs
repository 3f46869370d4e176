use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use webscript_gen::commands::generate::{self, GenerateArgs};

#[derive(Parser)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate webscript descriptors, templates and controllers",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    args: GenerateArgs,

    /// Increase logging (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    generate::execute(cli.args)
}
