//! Configuration loading via `ortho-config`.

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::fixture::{
    DEFAULT_APPLICATION_PATH, DEFAULT_NODE_ID, DEFAULT_TEMP_DIR, FixtureError, RUN_ROOT_DIR_NAME,
    RuntimeFixture,
};

/// Harness configuration derived from environment variables, configuration
/// files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "DRYDOCK",
    discovery(
        app_name = "drydock",
        env_var = "DRYDOCK_CONFIG_PATH",
        config_file_name = "drydock.toml",
        dotfile_name = ".drydock.toml",
        project_file_name = "drydock.toml"
    )
)]
pub struct HarnessConfig {
    /// Scratch directory exported to node processes. Defaults to `/tmp`.
    #[ortho_config(default = DEFAULT_TEMP_DIR.to_owned())]
    pub temp_dir: String,
    /// Install root of the deployed application. Defaults to `/application`.
    #[ortho_config(default = DEFAULT_APPLICATION_PATH.to_owned())]
    pub application_path: String,
    /// Identifier of the simulated node. Defaults to `dummy`.
    #[ortho_config(default = DEFAULT_NODE_ID.to_owned())]
    pub node_id: String,
    /// Run-root override. When unset the run root is derived from the anchor
    /// directory as `<anchor>/artifacts`.
    pub run_root: Option<String>,
    /// Whether `drydock run` persists the JSON report under the run root.
    #[ortho_config(default = false)]
    pub write_report: bool,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }
}

impl HarnessConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to drydock.toml",
                metadata.description, metadata.env_var, metadata.toml_key
            )));
        }
        Ok(())
    }

    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags in
    /// that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("drydock")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Builds the [`RuntimeFixture`] for a run anchored at `anchor`.
    ///
    /// The anchor only matters when no run-root override is configured; the
    /// CLI anchors at the working directory. Tilde prefixes in configured
    /// paths expand against `HOME`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails or the resolved values
    /// cannot form a valid fixture.
    pub fn fixture(&self, anchor: &Utf8Path) -> Result<RuntimeFixture, ConfigError> {
        self.validate()?;
        let run_root = self
            .run_root
            .as_deref()
            .map_or_else(|| anchor.join(RUN_ROOT_DIR_NAME).into_string(), expand_tilde);
        let fixture = RuntimeFixture::builder()
            .temp_dir(expand_tilde(&self.temp_dir))
            .application_path(expand_tilde(&self.application_path))
            .node_id(self.node_id.as_str())
            .run_root(run_root)
            .build()?;
        Ok(fixture)
    }

    /// Performs semantic validation on required fields. Error messages include
    /// guidance on how to provide missing values via environment variables or
    /// configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.temp_dir,
            &FieldMetadata::new("scratch directory", "DRYDOCK_TEMP_DIR", "temp_dir"),
        )?;
        Self::require_field(
            &self.application_path,
            &FieldMetadata::new(
                "application root",
                "DRYDOCK_APPLICATION_PATH",
                "application_path",
            ),
        )?;
        Self::require_field(
            &self.node_id,
            &FieldMetadata::new("node identifier", "DRYDOCK_NODE_ID", "node_id"),
        )?;
        if let Some(run_root) = &self.run_root {
            Self::require_field(
                run_root,
                &FieldMetadata::new("run-root override", "DRYDOCK_RUN_ROOT", "run_root"),
            )?;
        }
        Ok(())
    }
}

/// Expands a leading `~/` prefix to the user's home directory.
///
/// If the `HOME` environment variable is not set, the function returns the
/// input string unchanged (i.e., the leading `~` is not expanded). Callers
/// should handle this case if they need a different fallback.
///
/// # Examples
///
/// ```
/// # use drydock::config::expand_tilde;
/// let home = std::env::var("HOME").expect("HOME should be set");
/// assert_eq!(expand_tilde("~/runs/artifacts"), format!("{home}/runs/artifacts"));
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return format!("{}/{rest}", home.to_string_lossy());
    }
    path.to_owned()
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
    /// Indicates resolved values cannot form a valid fixture.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
