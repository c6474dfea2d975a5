use anyhow::Context;

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::AppError;
use crate::output::Formatter;
use crate::pipeline;

/// Run one invocation: load config, extract, print.
pub fn dispatch(cli: Cli) -> Result<(), AppError> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let config = Config::load(Some(&cwd))?;
    let format = cli.format.unwrap_or(config.output.default_format);

    let reports = pipeline::extract_paths(&cli.paths, &config)?;
    log::info!(
        "{} function(s) in {} file(s)",
        reports.iter().map(|r| r.functions.len()).sum::<usize>(),
        reports.len()
    );

    let stdout = std::io::stdout().lock();
    Formatter::new(stdout, format)
        .write_reports(&reports)
        .context("failed to write output")?;
    Ok(())
}
