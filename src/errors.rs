//! Application error types and user-facing error formatting.
//!
//! Provides structured error types for each layer:
//! - [`SourceError`] for reading source files
//! - [`SyntaxError`] for sources the parser rejects
//! - [`MalformedNodeError`] for ASTs the collector cannot use
//! - [`ExtractError`] for either of the two above, before a path is known
//! - [`AppError`] as the unified top-level error type
//!
//! The [`AppError`] type carries contextual hints and exit codes so that
//! `main()` can present human-readable diagnostics on stderr without ever
//! exposing raw panics or debug formatting.

use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

/// Process exit codes.
///
/// * `0` - success
/// * `1` - runtime error (I/O, syntax, malformed AST, config)
///
/// Usage errors exit with `2` from clap before any of our code runs.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

// ---------------------------------------------------------------------------
// Layer-specific error types
// ---------------------------------------------------------------------------

/// Errors arising while loading a source file.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: file is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("{}: file is {size} bytes, limit is {limit} bytes", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

/// Source text the grammar does not accept.
///
/// `line` is 1-based and `column` 0-based, matching the position format of
/// JavaScript toolchains (`Unexpected token (1:9)`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} ({line}:{column})")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// A node shape the collector cannot turn into a signature record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedNodeError {
    #[error("function declaration without a name ({line}:{column})")]
    MissingIdentifier { line: usize, column: usize },
}

/// Failure to turn source text into signatures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Malformed(#[from] MalformedNodeError),
}

// ---------------------------------------------------------------------------
// Unified application error
// ---------------------------------------------------------------------------

/// Unified error type for the entire application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{}: {error}", path.display())]
    Syntax { path: PathBuf, error: SyntaxError },

    #[error("{}: {error}", path.display())]
    Malformed {
        path: PathBuf,
        error: MalformedNodeError,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Attach the file an extraction failure came from.
    pub fn in_file(path: &Path, error: ExtractError) -> Self {
        let path = path.to_path_buf();
        match error {
            ExtractError::Syntax(error) => AppError::Syntax { path, error },
            ExtractError::Malformed(error) => AppError::Malformed { path, error },
        }
    }

    /// Return the appropriate process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }

    /// Return an optional human-readable hint that may help the user fix
    /// the problem.  Returns `None` when no specific guidance applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Source(SourceError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Some("verify the file or directory exists")
            }
            AppError::Source(SourceError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                Some("check file permissions")
            }
            AppError::Source(SourceError::TooLarge { .. }) => {
                Some("raise `scan.max_file_size_kb` in .fnscan/config.toml")
            }
            AppError::Malformed { .. } => {
                Some("anonymous default exports have no name to report; name the function")
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error(kind: std::io::ErrorKind) -> AppError {
        AppError::Source(SourceError::Io {
            path: PathBuf::from("src/app.js"),
            source: std::io::Error::new(kind, "boom"),
        })
    }

    fn syntax_error() -> AppError {
        AppError::Syntax {
            path: PathBuf::from("bad.js"),
            error: SyntaxError {
                message: "Unexpected token".into(),
                line: 1,
                column: 9,
            },
        }
    }

    #[test]
    fn exit_code_general() {
        assert_eq!(syntax_error().exit_code(), EXIT_ERROR);
        assert_eq!(io_error(std::io::ErrorKind::NotFound).exit_code(), EXIT_ERROR);
    }

    #[test]
    fn hint_io_not_found() {
        let err = io_error(std::io::ErrorKind::NotFound);
        assert!(err.hint().unwrap().contains("exists"));
    }

    #[test]
    fn hint_io_permission() {
        let err = io_error(std::io::ErrorKind::PermissionDenied);
        assert!(err.hint().unwrap().contains("permissions"));
    }

    #[test]
    fn hint_too_large() {
        let err = AppError::Source(SourceError::TooLarge {
            path: PathBuf::from("big.js"),
            size: 10,
            limit: 5,
        });
        assert!(err.hint().unwrap().contains("max_file_size_kb"));
    }

    #[test]
    fn hint_none_for_syntax() {
        assert!(syntax_error().hint().is_none());
    }

    #[test]
    fn hint_none_for_other() {
        let err = AppError::Other(anyhow::anyhow!("something went wrong"));
        assert!(err.hint().is_none());
    }

    #[test]
    fn syntax_error_display_has_position() {
        assert_eq!(format!("{}", syntax_error()), "bad.js: Unexpected token (1:9)");
    }

    #[test]
    fn malformed_display_no_debug_formatting() {
        let err = AppError::Malformed {
            path: PathBuf::from("mod.js"),
            error: MalformedNodeError::MissingIdentifier { line: 2, column: 15 },
        };
        let msg = format!("{err}");
        assert_eq!(msg, "mod.js: function declaration without a name (2:15)");
        assert!(!msg.contains("MissingIdentifier"));
    }

    #[test]
    fn source_error_display() {
        let err = SourceError::TooLarge {
            path: PathBuf::from("big.js"),
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            format!("{err}"),
            "big.js: file is 2048 bytes, limit is 1024 bytes"
        );
    }

    #[test]
    fn app_error_from_source_error() {
        let err: AppError = SourceError::NotUtf8 {
            path: PathBuf::from("x.js"),
        }
        .into();
        assert!(matches!(err, AppError::Source(SourceError::NotUtf8 { .. })));
    }

    #[test]
    fn in_file_keeps_variant() {
        let path = Path::new("lib/util.js");
        let err = AppError::in_file(
            path,
            ExtractError::Malformed(MalformedNodeError::MissingIdentifier { line: 1, column: 15 }),
        );
        assert!(matches!(err, AppError::Malformed { .. }));
        assert!(err.to_string().starts_with("lib/util.js: "));

        let err = AppError::in_file(
            path,
            SyntaxError {
                message: "Unexpected token".into(),
                line: 1,
                column: 0,
            }
            .into(),
        );
        assert!(matches!(err, AppError::Syntax { .. }));
    }

    #[test]
    fn other_errors_exit_with_general_code() {
        let err = AppError::Other(anyhow::anyhow!("failed to parse config file: x"));
        assert_eq!(err.exit_code(), EXIT_ERROR);
        assert_ne!(EXIT_ERROR, EXIT_SUCCESS);
    }
}
