//! Extraction pipeline: read -> parse -> collect, for one file or many.
//!
//! Files named explicitly are required to extract cleanly; files found by
//! walking a directory are skipped with a warning when they cannot be read
//! or parsed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::collector::collect;
use crate::config::Config;
use crate::errors::{AppError, ExtractError};
use crate::parser;
use crate::source::read_source;
use crate::types::{FileReport, FunctionSignature};
use crate::walker::Walker;

/// Extract signatures from source text.
pub fn extract_source(source: &str) -> Result<Vec<FunctionSignature>, ExtractError> {
    let root = parser::parse(source)?;
    Ok(collect(&root)?)
}

/// Extract signatures from one file.
pub fn extract_file(path: &Path, config: &Config) -> Result<FileReport, AppError> {
    let source = read_source(path, config.scan.max_file_size_bytes())?;
    let functions = extract_source(&source).map_err(|e| AppError::in_file(path, e))?;
    log::debug!("{}: {} function(s)", path.display(), functions.len());
    Ok(FileReport {
        file: path.to_string_lossy().into_owned(),
        functions,
    })
}

/// A file to extract, and whether the user named it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    path: PathBuf,
    explicit: bool,
}

/// Expand directory arguments into the script files beneath them.
fn expand(paths: &[PathBuf], config: &Config) -> Result<Vec<Target>, AppError> {
    let mut targets = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = Walker::new(path)
                .ignore_patterns(&config.ignore.patterns)
                .additional_extensions(&config.scan.additional_extensions)
                .collect_paths()
                .with_context(|| format!("failed to walk {}", path.display()))?;
            log::debug!("{}: {} script file(s)", path.display(), found.len());
            targets.extend(found.into_iter().map(|path| Target {
                path,
                explicit: false,
            }));
        } else {
            targets.push(Target {
                path: path.clone(),
                explicit: true,
            });
        }
    }
    Ok(targets)
}

/// Extract signatures from every file and directory in `paths`.
///
/// Reports come back in argument order, with each directory's files sorted
/// by path. Files are processed in parallel.
pub fn extract_paths(paths: &[PathBuf], config: &Config) -> Result<Vec<FileReport>, AppError> {
    let targets = expand(paths, config)?;
    let results: Vec<Result<FileReport, AppError>> = targets
        .par_iter()
        .map(|t| extract_file(&t.path, config))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    for (target, result) in targets.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(err) if !target.explicit => log::warn!("skipping {err}"),
            Err(err) => return Err(err),
        }
    }
    Ok(reports)
}
