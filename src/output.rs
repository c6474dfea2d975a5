//! Output formatting: pretty JSON (default), JSON Lines, and plain text.
//!
//! All result data flows through a [`Formatter`] which writes to an
//! arbitrary [`std::io::Write`] destination (typically stdout).
//! Hints and errors always go to stderr via [`print_hint`] and [`print_error`].

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::types::{FileReport, FunctionSignature};

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed JSON document.
    #[default]
    Json,
    /// One JSON object per function.
    Ndjson,
    /// `file: name(params)` lines.
    Text,
}

// ---------------------------------------------------------------------------
// Serializable output types
// ---------------------------------------------------------------------------

/// Document for a single scanned file: `{"functions": [...]}`.
#[derive(Debug, Serialize)]
struct FunctionsDocument<'a> {
    functions: &'a [FunctionSignature],
}

/// Document for several scanned files: `{"files": [...]}`.
#[derive(Debug, Serialize)]
struct FilesDocument<'a> {
    files: &'a [FileReport],
}

/// One JSON Lines record.
#[derive(Debug, Serialize)]
struct SignatureLine<'a> {
    file: &'a str,
    #[serde(flatten)]
    signature: &'a FunctionSignature,
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Output formatter for extraction reports.
pub struct Formatter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter.
    ///
    /// * `writer` - The destination for output (e.g. `std::io::stdout()`).
    /// * `format` - How to render reports.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Render all reports.
    ///
    /// In JSON mode a single report is written as `{"functions": [...]}`,
    /// the document shape for one source file; any other count is
    /// written as `{"files": [{"file": ..., "functions": [...]}]}`.
    pub fn write_reports(&mut self, reports: &[FileReport]) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                match reports {
                    [single] => serde_json::to_writer_pretty(
                        &mut self.writer,
                        &FunctionsDocument {
                            functions: &single.functions,
                        },
                    ),
                    _ => serde_json::to_writer_pretty(
                        &mut self.writer,
                        &FilesDocument { files: reports },
                    ),
                }
                .map_err(std::io::Error::from)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Ndjson => {
                for report in reports {
                    for signature in &report.functions {
                        let line = serde_json::to_string(&SignatureLine {
                            file: &report.file,
                            signature,
                        })
                        .map_err(std::io::Error::from)?;
                        writeln!(self.writer, "{line}")?;
                    }
                }
            }
            OutputFormat::Text => {
                for report in reports {
                    for signature in &report.functions {
                        writeln!(self.writer, "{}: {}", report.file, signature)?;
                    }
                }
            }
        }
        self.writer.flush()
    }
}

// ---------------------------------------------------------------------------
// Stderr helpers
// ---------------------------------------------------------------------------

/// Print a hint message to stderr.
pub fn print_hint(msg: &str) {
    eprintln!("hint: {msg}");
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}

/// Format an [`AppError`] to stderr with structured `error:` / `hint:` lines.
///
/// * Always prints `error: <message>` to stderr.
/// * When the error carries a contextual hint, also prints
///   `hint: <suggestion>` to stderr.
/// * Returns the appropriate process exit code.
pub fn format_error(err: &AppError) -> i32 {
    // `{:#}` keeps anyhow's context chain on one line.
    match err {
        AppError::Other(inner) => print_error(&format!("{inner:#}")),
        _ => print_error(&format!("{err}")),
    }
    if let Some(hint) = err.hint() {
        print_hint(hint);
    }
    err.exit_code()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
