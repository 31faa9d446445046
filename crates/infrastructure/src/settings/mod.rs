//! Run configuration.
//!
//! Settings are resolved once, before the run starts, from three layers
//! (later wins):
//!
//! 1. built-in defaults (`Fixture::default()`, `RunSettings::default()`)
//! 2. a config file: `$POSTCHECK_CONFIG` if set (must exist), otherwise
//!    `postcheck.toml` in the working directory if present
//! 3. `POSTCHECK__*` environment variables, `__` separating nested keys,
//!    e.g. `POSTCHECK__TOKENS__PRIMARY` or `POSTCHECK__RUN__ONLY=login,register`

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use postcheck_application::RunOptions;
use postcheck_domain::Fixture;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "POSTCHECK_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "postcheck.toml";

const ENV_PREFIX: &str = "POSTCHECK";
const ENV_SEPARATOR: &str = "__";

/// Errors raised while resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or did not deserialize.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is not acceptable.
    #[error("invalid setting {key}: {message}")]
    Invalid {
        /// Dotted key of the setting.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// How the run report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One line per case plus a summary.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

/// Case selection, either as a list or as a comma-separated string (the
/// form it takes when it comes from an environment variable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseSelection {
    /// `only = ["login", "register"]`
    List(Vec<String>),
    /// `only = "login,register"`
    Csv(String),
}

impl CaseSelection {
    /// Returns the selected names, trimmed, without empties.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let names: Vec<&str> = match self {
            Self::List(names) => names.iter().map(String::as_str).collect(),
            Self::Csv(csv) => csv.split(',').collect(),
        };
        names
            .into_iter()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// The `[run]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Cases to run; all when absent.
    pub only: Option<CaseSelection>,
    /// Stop after the first failed or errored case.
    pub stop_on_failure: bool,
    /// Per-request timeout in milliseconds; none when absent.
    pub timeout_ms: Option<u64>,
    /// Output format.
    pub report: ReportFormat,
}

impl RunSettings {
    /// Converts to the runner's options.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Invalid` for a zero timeout or an empty
    /// selection.
    pub fn to_options(&self) -> Result<RunOptions, SettingsError> {
        let only = match &self.only {
            None => None,
            Some(selection) => {
                let names = selection.names();
                if names.is_empty() {
                    return Err(SettingsError::Invalid {
                        key: "run.only",
                        message: "selects no cases".to_string(),
                    });
                }
                Some(names)
            }
        };

        let timeout = match self.timeout_ms {
            Some(0) => {
                return Err(SettingsError::Invalid {
                    key: "run.timeout_ms",
                    message: "must be greater than zero".to_string(),
                });
            }
            other => other.map(Duration::from_millis),
        };

        Ok(RunOptions {
            only,
            stop_on_failure: self.stop_on_failure,
            timeout,
        })
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Fixture for the service under test.
    pub fixture: Fixture,
    /// Runner settings.
    pub run: RunSettings,
}

/// Builds `Settings` from the configured layers.
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    file: Option<(PathBuf, bool)>,
    env: Option<HashMap<String, String>>,
}

impl SettingsLoader {
    /// Creates a loader with no file and the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the loader the binary uses: `$POSTCHECK_CONFIG` (required)
    /// or `postcheck.toml` (optional), plus the process environment.
    #[must_use]
    pub fn from_process_env() -> Self {
        match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::new().with_file(PathBuf::from(path)),
            None => Self::new().with_optional_file(DEFAULT_CONFIG_FILE),
        }
    }

    /// Reads the given file, which must exist.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some((path.as_ref().to_path_buf(), true));
        self
    }

    /// Reads the given file if it exists.
    #[must_use]
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some((path.as_ref().to_path_buf(), false));
        self
    }

    /// Uses the given variables instead of the process environment.
    #[must_use]
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Resolves the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a source does not
    /// parse, or a value has the wrong type.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let mut builder = Config::builder();

        if let Some((path, required)) = &self.file {
            debug!(path = %path.display(), required, "reading config file");
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .source(self.env.clone()),
        );

        let config = builder.build()?;

        let fixture: Fixture = config.clone().try_deserialize()?;
        let run = match config.get::<RunSettings>("run") {
            Ok(run) => run,
            Err(config::ConfigError::NotFound(_)) => RunSettings::default(),
            Err(e) => return Err(e.into()),
        };

        debug!(base_url = %fixture.base_url, tokens = ?fixture.tokens, "settings resolved");
        Ok(Settings { fixture, run })
    }
}
