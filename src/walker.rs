//! Script file discovery with gitignore support and default exclusions.
//!
//! Wraps the `ignore` crate's `WalkBuilder` to provide a file walker that:
//! - Respects `.gitignore` rules
//! - Skips dependency, build and coverage directories by default
//! - Skips hidden files/directories
//! - Applies extra exclusion globs from configuration
//! - Yields only script files, sorted by path

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;

use crate::parser::is_script_path;

/// Directories that are always excluded from walks, regardless of `.gitignore`.
const DEFAULT_EXCLUSIONS: &[&str] = &[
    "node_modules",
    "bower_components",
    "vendor",
    "target",
    "build",
    "dist",
    "coverage",
];

/// A file-system walker that respects `.gitignore` and applies default
/// exclusions.
pub struct Walker {
    root: PathBuf,
    ignore_patterns: Vec<String>,
    additional_extensions: Vec<String>,
}

impl Walker {
    /// Create a new walker rooted at the given directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ignore_patterns: Vec::new(),
            additional_extensions: Vec::new(),
        }
    }

    /// Exclude paths matching these globs, in addition to the defaults.
    pub fn ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns.to_vec();
        self
    }

    /// Treat files with these extensions as scripts too.
    pub fn additional_extensions(mut self, extensions: &[String]) -> Self {
        self.additional_extensions = extensions.to_vec();
        self
    }

    /// Build the underlying `WalkBuilder` with all our configuration applied.
    fn make_builder(&self) -> Result<WalkBuilder, ignore::Error> {
        let mut builder = WalkBuilder::new(&self.root);

        // .gitignore, .ignore, hidden files, etc.
        builder.standard_filters(true);

        // In the overrides system a glob WITH `!` means "exclude".
        let mut overrides = OverrideBuilder::new(&self.root);
        for dir in DEFAULT_EXCLUSIONS {
            overrides.add(&format!("!{dir}/"))?;
        }
        for pattern in &self.ignore_patterns {
            overrides.add(&format!("!{pattern}"))?;
        }
        builder.overrides(overrides.build()?);

        Ok(builder)
    }

    /// Walk the tree and collect script file paths, sorted.
    ///
    /// Entries that cannot be read (e.g. permission errors) are skipped.
    pub fn collect_paths(&self) -> Result<Vec<PathBuf>, ignore::Error> {
        let builder = self.make_builder()?;
        let mut paths = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    log::debug!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            if is_file && is_script_path(entry.path(), &self.additional_extensions) {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}
