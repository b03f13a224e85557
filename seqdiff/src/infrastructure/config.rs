//! Layered settings: built-in defaults, an optional TOML file, then `SEQDIFF__*`
//! environment variables.

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::text::MAX_CONTEXT_LENGTH;

/// Top-level settings.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// String compaction.
    pub text: TextSettings,
    /// Sequence reconciliation.
    pub reconcile: ReconcileSettings,
    /// Logging.
    pub telemetry: TelemetrySettings,
}

/// Settings for string difference rendering.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TextSettings {
    /// Shared characters kept on each side of a difference.
    pub max_context: usize,
    /// Escape `\r`, `\n` and `\t` in the differing part.
    pub render_whitespace: bool,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            max_context: MAX_CONTEXT_LENGTH,
            render_whitespace: true,
        }
    }
}

/// Settings for the reconciliation engine.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ReconcileSettings {
    /// Pair removals with insertions of the same item as moves.
    pub detect_moves: bool,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self { detect_moves: true }
    }
}

/// Settings for log output.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TelemetrySettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            json: false,
        }
    }
}

impl Settings {
    /// Loads settings from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment override cannot be parsed.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Loads settings from defaults, then `path` if given, then the environment.
    ///
    /// Environment variables use the `SEQDIFF` prefix and `__` between keys,
    /// e.g. `SEQDIFF__TEXT__MAX_CONTEXT=40`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or if a value has
    /// the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        builder
            .add_source(
                Environment::with_prefix("SEQDIFF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("text.max_context", defaults.text.max_context as u64)?
            .set_default("text.render_whitespace", defaults.text.render_whitespace)?
            .set_default("reconcile.detect_moves", defaults.reconcile.detect_moves)?
            .set_default("telemetry.log_level", defaults.telemetry.log_level)?
            .set_default("telemetry.json", defaults.telemetry.json)
    }
}
