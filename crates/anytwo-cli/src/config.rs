//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anytwo_core::{DEFAULT_THRESHOLD_SECS, LoadOptions, RowPolicy};
use anytwo_io::ColumnNames;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one coding sheet per observer.
    pub input_dir: PathBuf,

    /// Directory receiving the exported CSV tables.
    pub output_dir: PathBuf,

    /// Tolerance window added on both sides of every breakdown, in seconds.
    pub threshold_secs: u32,

    /// What to do with rows that fail validation.
    pub on_invalid_row: RowPolicy,

    /// Header names of the columns read from each sheet.
    pub columns: ColumnNames,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("threshold_secs", &self.threshold_secs)
            .field("on_invalid_row", &self.on_invalid_row)
            .field("columns", &self.columns)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("results"),
            threshold_secs: DEFAULT_THRESHOLD_SECS,
            on_invalid_row: RowPolicy::Abort,
            columns: ColumnNames::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ANYTWO_*, nested keys split on "__")
        figment = figment.merge(Env::prefixed("ANYTWO_").split("__"));

        figment.extract()
    }

    /// Options for building evaluations from this configuration.
    pub const fn load_options(&self) -> LoadOptions {
        LoadOptions {
            threshold_secs: self.threshold_secs,
            policy: self.on_invalid_row,
        }
    }
}

/// Returns the platform-specific config directory for anytwo.
///
/// On Linux: `~/.config/anytwo`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("anytwo"))
}
