//! Configuration file parsing, defaults, and merging.
//!
//! Configuration is loaded in layers (last wins):
//! 1. Built-in defaults
//! 2. Global config from `~/.fnscan/config.toml`
//! 3. Project config from `<project_dir>/.fnscan/config.toml`
//!
//! Each layer only overrides fields it explicitly sets; absent fields
//! are left at their previous value.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::output::OutputFormat;

/// Name of the per-user and per-project configuration directory.
const CONFIG_DIR: &str = ".fnscan";

// ---------------------------------------------------------------------------
// Public config types (fully resolved, no Options)
// ---------------------------------------------------------------------------

/// Top-level configuration, fully resolved with defaults applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub ignore: IgnoreConfig,
}

/// Source scanning settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Maximum file size (in KiB) that will be parsed.
    pub max_file_size_kb: u64,
    /// Extra file extensions to treat as scripts beyond the built-in set.
    pub additional_extensions: Vec<String>,
}

/// Output / display settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given.
    pub default_format: OutputFormat,
}

/// Ignore / exclusion settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IgnoreConfig {
    /// Extra glob patterns to exclude from directory walks.
    pub patterns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size_kb: 1024,
            additional_extensions: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// The size limit in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }
}

// ---------------------------------------------------------------------------
// Option-based overlay types (for partial deserialization)
// ---------------------------------------------------------------------------

/// Mirror of [`Config`] where every field is `Option`, so we can
/// deserialize a partial TOML file and overlay only the keys that are
/// present.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigOverlay {
    scan: Option<ScanOverlay>,
    output: Option<OutputOverlay>,
    ignore: Option<IgnoreOverlay>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ScanOverlay {
    max_file_size_kb: Option<u64>,
    additional_extensions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputOverlay {
    default_format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct IgnoreOverlay {
    patterns: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Merge helpers
// ---------------------------------------------------------------------------

impl Config {
    /// Apply an overlay on top of this config, replacing only the fields
    /// that are `Some` in the overlay.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(scan) = overlay.scan {
            if let Some(v) = scan.max_file_size_kb {
                self.scan.max_file_size_kb = v;
            }
            if let Some(v) = scan.additional_extensions {
                self.scan.additional_extensions = v;
            }
        }
        if let Some(out) = overlay.output
            && let Some(v) = out.default_format
        {
            self.output.default_format = v;
        }
        if let Some(ign) = overlay.ignore
            && let Some(v) = ign.patterns
        {
            self.ignore.patterns = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Return the user's home directory.
fn home_dir() -> Option<PathBuf> {
    #[allow(deprecated)]
    std::env::home_dir()
}

/// Parse a TOML string into a [`ConfigOverlay`], producing a clear error
/// message on malformed input.
fn parse_overlay(contents: &str, path: &Path) -> Result<ConfigOverlay> {
    toml::from_str(contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

/// Try to read a config file and parse it as an overlay.
/// Returns `Ok(None)` if the file does not exist.
fn load_overlay(path: &Path) -> Result<Option<ConfigOverlay>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            log::debug!("loading config from {}", path.display());
            let overlay = parse_overlay(&contents, path)?;
            Ok(Some(overlay))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::anyhow!(
            "failed to read config file {}: {}",
            path.display(),
            e
        )),
    }
}

impl Config {
    /// Load configuration by merging layers:
    /// defaults -> global (`~/.fnscan/config.toml`) -> project
    /// (`<project_dir>/.fnscan/config.toml`).
    pub fn load(project_dir: Option<&Path>) -> Result<Config> {
        let global_dir = home_dir().map(|h| h.join(CONFIG_DIR));
        Self::load_with_global_dir(global_dir.as_deref(), project_dir)
    }

    /// Internal: load config with an explicit global config directory.
    ///
    /// This allows tests to supply a temporary directory instead of the
    /// real `~/.fnscan` without mutating environment variables.
    fn load_with_global_dir(
        global_dir: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Config> {
        let mut config = Config::default();

        if let Some(dir) = global_dir
            && let Some(overlay) = load_overlay(&dir.join("config.toml"))?
        {
            config.apply_overlay(overlay);
        }

        if let Some(root) = project_dir
            && let Some(overlay) = load_overlay(&root.join(CONFIG_DIR).join("config.toml"))?
        {
            config.apply_overlay(overlay);
        }

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Temporary global and project directories.  Does NOT touch
    /// environment variables, so tests are safe to run in parallel.
    struct TestEnv {
        _global_dir: tempfile::TempDir,
        _project_dir: tempfile::TempDir,
        global_path: PathBuf,
        project_path: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let global = tempfile::tempdir().unwrap();
            let project = tempfile::tempdir().unwrap();
            Self {
                global_path: global.path().to_path_buf(),
                project_path: project.path().to_path_buf(),
                _global_dir: global,
                _project_dir: project,
            }
        }

        fn write_global_config(&self, toml_content: &str) {
            fs::write(self.global_path.join("config.toml"), toml_content).unwrap();
        }

        fn write_project_config(&self, toml_content: &str) {
            let dir = self.project_path.join(CONFIG_DIR);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("config.toml"), toml_content).unwrap();
        }

        fn load(&self) -> Result<Config> {
            Config::load_with_global_dir(Some(&self.global_path), Some(&self.project_path))
        }
    }

    #[test]
    fn defaults_applied_when_no_config_exists() {
        let env = TestEnv::new();
        let config = env.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scan.max_file_size_kb, 1024);
        assert_eq!(config.scan.max_file_size_bytes(), 1024 * 1024);
        assert!(config.scan.additional_extensions.is_empty());
        assert_eq!(config.output.default_format, OutputFormat::Json);
        assert!(config.ignore.patterns.is_empty());
    }

    #[test]
    fn global_config_overrides_defaults() {
        let env = TestEnv::new();
        env.write_global_config(
            r#"
[output]
default_format = "ndjson"
"#,
        );

        let config = env.load().unwrap();
        assert_eq!(config.output.default_format, OutputFormat::Ndjson);
        assert_eq!(config.scan.max_file_size_kb, 1024);
    }

    #[test]
    fn project_config_overrides_global() {
        let env = TestEnv::new();
        env.write_global_config(
            r#"
[scan]
max_file_size_kb = 64

[output]
default_format = "text"
"#,
        );
        env.write_project_config(
            r#"
[scan]
max_file_size_kb = 512
additional_extensions = ["es6"]
"#,
        );

        let config = env.load().unwrap();
        assert_eq!(config.scan.max_file_size_kb, 512);
        assert_eq!(config.scan.additional_extensions, vec!["es6".to_string()]);
        // Global value not overridden by the project should still be present.
        assert_eq!(config.output.default_format, OutputFormat::Text);
    }

    #[test]
    fn ignore_patterns_replace_whole_list() {
        let env = TestEnv::new();
        env.write_global_config("[ignore]\npatterns = [\"*.min.js\", \"fixtures/\"]\n");
        env.write_project_config("[ignore]\npatterns = [\"*.test.js\"]\n");

        let config = env.load().unwrap();
        assert_eq!(config.ignore.patterns, vec!["*.test.js".to_string()]);
    }

    #[test]
    fn invalid_toml_produces_clear_error() {
        let env = TestEnv::new();
        env.write_global_config("this is [[[not valid toml");

        let err_msg = format!("{:#}", env.load().unwrap_err());
        assert!(
            err_msg.contains("failed to parse config file"),
            "error should mention parsing failure, got: {err_msg}"
        );
    }

    #[test]
    fn unknown_format_is_an_error() {
        let env = TestEnv::new();
        env.write_project_config("[output]\ndefault_format = \"yaml\"\n");

        let err_msg = format!("{:#}", env.load().unwrap_err());
        assert!(err_msg.contains("failed to parse config file"), "got: {err_msg}");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let env = TestEnv::new();
        env.write_global_config(
            r#"
[scan]
max_file_size_kb = 32
some_future_key = true

[some_future_section]
value = 42
"#,
        );

        assert_eq!(env.load().unwrap().scan.max_file_size_kb, 32);
    }

    #[test]
    fn wrong_type_produces_error() {
        let env = TestEnv::new();
        env.write_global_config("[scan]\nmax_file_size_kb = \"big\"\n");
        assert!(env.load().is_err());
    }

    #[test]
    fn empty_config_files_are_fine() {
        let env = TestEnv::new();
        env.write_global_config("");
        env.write_project_config("");
        assert_eq!(env.load().unwrap(), Config::default());
    }

    #[test]
    fn no_dirs_uses_only_defaults() {
        let config = Config::load_with_global_dir(None, None).unwrap();
        assert_eq!(config, Config::default());
    }
}
