//! Shared configuration loader for the astview tools.
//!
//! `defaults/astview.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AstviewConfig`].

use astview_tree::{DisplayRules, TagKeys, Variant};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/astview.default.toml");

/// File picked up from the working directory when no `--config` is given
pub const USER_CONFIG_FILE: &str = "astview.toml";

/// Top-level configuration consumed by astview applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AstviewConfig {
    pub tree: TreeConfig,
    pub workbench: WorkbenchConfig,
    pub logging: LoggingConfig,
}

/// Defaults for the display rules of a render root.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeConfig {
    pub variant: Variant,
    pub initial_open_depth: i32,
    pub whitelist: Vec<String>,
    pub tag_keys: TagKeys,
}

impl TreeConfig {
    /// Display rules carrying these settings, with no active kind or source text
    pub fn display_rules(&self) -> DisplayRules {
        DisplayRules::new()
            .with_variant(self.variant)
            .with_initial_open_depth(self.initial_open_depth)
            .with_whitelist(self.whitelist.iter().cloned())
            .with_tag_keys(self.tag_keys.clone())
    }
}

/// Recompute timing and the external collaborators.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkbenchConfig {
    pub debounce_ms: u64,
    pub error_debounce_ms: u64,
    #[serde(default)]
    pub parser_command: Option<String>,
    #[serde(default)]
    pub transform_command: Option<String>,
}

impl WorkbenchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn error_debounce(&self) -> Duration {
        Duration::from_millis(self.error_debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    pub file: PathBuf,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `--config` when given, otherwise `./astview.toml` if present.
    pub fn with_user_file(self, explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => self.with_file(path),
            None => self.with_optional_file(USER_CONFIG_FILE),
        }
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AstviewConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AstviewConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use astview_tree::DisplayPath;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.tree.variant, Variant::Filtered);
        assert_eq!(config.tree.initial_open_depth, 1);
        assert_eq!(config.tree.whitelist, vec!["name", "value", "kind", "operator"]);
        assert_eq!(config.tree.tag_keys, TagKeys::default());
        assert_eq!(config.workbench.debounce(), Duration::from_millis(500));
        assert_eq!(config.workbench.error_debounce(), Duration::from_millis(750));
        assert!(config.workbench.parser_command.is_none());
        assert_eq!(config.logging.file, PathBuf::from("astv.log"));
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("tree.variant", "all")
            .expect("override to apply")
            .set_override("tree.initial_open_depth", -1i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.tree.variant, Variant::All);
        let rules = config.tree.display_rules();
        assert!(!rules.starts_open(&DisplayPath::root()));
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[workbench]\ntransform_command = \"node transform.js {{rule}}\"\n\n[tree]\nwhitelist = [\"name\"]"
        )
        .expect("write config");

        let config = Loader::new()
            .with_user_file(Some(file.path()))
            .build()
            .expect("config to build");
        assert_eq!(
            config.workbench.transform_command.as_deref(),
            Some("node transform.js {rule}")
        );
        assert_eq!(config.tree.whitelist, vec!["name"]);
        // Untouched keys keep their defaults
        assert_eq!(config.workbench.debounce_ms, 500);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Loader::new()
            .with_user_file(Some(Path::new("/nonexistent/astview.toml")))
            .build();
        assert!(result.is_err());
    }
}
