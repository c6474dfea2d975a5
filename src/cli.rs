use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

/// fnscan - list the function declarations in JavaScript sources
#[derive(Parser, Debug)]
#[command(name = "fnscan", version, about)]
pub struct Cli {
    /// Source files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format (defaults to `output.default_format` from config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub debug: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
