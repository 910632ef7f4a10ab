//! Runtime fixture mirroring the variables a workflow runner exports to
//! processing-node jobs.
//!
//! Node code under test reads its scratch space, application root, node
//! identity, and run root from the environment. The fixture pins those
//! variables to deterministic values so the same checks pass on a laptop and
//! in CI. None of the referenced paths are required to exist.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::environment::{Environment, ProcessEnvironment};

/// Variable naming the scratch directory granted to a node.
pub const TEMP_DIR_VAR: &str = "TMPDIR";
/// Variable naming the install root of the deployed application.
pub const APPLICATION_PATH_VAR: &str = "_CIOP_APPLICATION_PATH";
/// Variable carrying the node's identifier within the workflow.
pub const NODE_ID_VAR: &str = "ciop_job_nodeid";
/// Variable naming the root directory for the run's outputs.
pub const RUN_ROOT_VAR: &str = "ciop_wf_run_root";

/// Default scratch directory exported as [`TEMP_DIR_VAR`].
pub const DEFAULT_TEMP_DIR: &str = "/tmp";
/// Default application root exported as [`APPLICATION_PATH_VAR`].
pub const DEFAULT_APPLICATION_PATH: &str = "/application";
/// Default node identifier exported as [`NODE_ID_VAR`].
pub const DEFAULT_NODE_ID: &str = "dummy";
/// Directory name joined onto the anchor when deriving the run root.
pub const RUN_ROOT_DIR_NAME: &str = "artifacts";

/// Deterministic variable set applied to the environment before any case
/// executes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuntimeFixture {
    /// Scratch directory exported as [`TEMP_DIR_VAR`].
    pub temp_dir: Utf8PathBuf,
    /// Application root exported as [`APPLICATION_PATH_VAR`].
    pub application_path: Utf8PathBuf,
    /// Node identifier exported as [`NODE_ID_VAR`].
    pub node_id: String,
    /// Run output root exported as [`RUN_ROOT_VAR`].
    pub run_root: Utf8PathBuf,
}

impl RuntimeFixture {
    /// Starts a builder for a [`RuntimeFixture`].
    #[must_use]
    pub fn builder() -> RuntimeFixtureBuilder {
        RuntimeFixtureBuilder::new()
    }

    /// Builds the default fixture for a run anchored at `anchor`.
    ///
    /// The run root becomes `<anchor>/artifacts`; the remaining variables
    /// take their defaults. The CLI anchors at the working directory, while
    /// embedders typically anchor at their manifest directory.
    #[must_use]
    pub fn anchored(anchor: impl AsRef<Utf8Path>) -> Self {
        Self {
            temp_dir: Utf8PathBuf::from(DEFAULT_TEMP_DIR),
            application_path: Utf8PathBuf::from(DEFAULT_APPLICATION_PATH),
            node_id: DEFAULT_NODE_ID.to_owned(),
            run_root: anchor.as_ref().join(RUN_ROOT_DIR_NAME),
        }
    }

    /// Returns the exported variables as name/value pairs in a stable order.
    #[must_use]
    pub fn vars(&self) -> [(&'static str, &str); 4] {
        [
            (TEMP_DIR_VAR, self.temp_dir.as_str()),
            (APPLICATION_PATH_VAR, self.application_path.as_str()),
            (NODE_ID_VAR, self.node_id.as_str()),
            (RUN_ROOT_VAR, self.run_root.as_str()),
        ]
    }

    /// Validates the fixture, returning a descriptive error when a value is
    /// blank or cannot be exported.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::BlankField`] when a value is empty after
    /// trimming and [`FixtureError::UnexportableField`] when a value contains
    /// a NUL byte.
    pub fn validate(&self) -> Result<(), FixtureError> {
        require_exportable(self.temp_dir.as_str(), "temp_dir")?;
        require_exportable(self.application_path.as_str(), "application_path")?;
        require_exportable(&self.node_id, "node_id")?;
        require_exportable(self.run_root.as_str(), "run_root")?;
        Ok(())
    }

    /// Validates the fixture and writes every variable into `env`.
    ///
    /// Applying twice is a no-op beyond rewriting identical values, so the
    /// bootstrap may run before every suite without corrupting state.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when validation fails; nothing is written in
    /// that situation.
    pub fn apply_to<E: Environment + ?Sized>(&self, env: &mut E) -> Result<(), FixtureError> {
        self.validate()?;
        for (name, value) in self.vars() {
            env.set(name, value);
        }
        Ok(())
    }

    /// Applies the fixture to the real process environment.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when validation fails.
    pub fn apply(&self) -> Result<(), FixtureError> {
        self.apply_to(&mut ProcessEnvironment)
    }

    /// Reports whether `env` already holds every fixture variable with the
    /// expected value.
    #[must_use]
    pub fn is_applied<E: Environment + ?Sized>(&self, env: &E) -> bool {
        self.vars()
            .iter()
            .all(|(name, value)| env.get(name).is_some_and(|current| current == *value))
    }
}

fn require_exportable(value: &str, field: &'static str) -> Result<(), FixtureError> {
    if value.trim().is_empty() {
        return Err(FixtureError::BlankField { field });
    }
    if value.contains('\0') {
        return Err(FixtureError::UnexportableField { field });
    }
    Ok(())
}

/// Builder for [`RuntimeFixture`] that defers trimming and validation to
/// construction.
///
/// Every field except the run root starts at its default; the run root must
/// be provided because no portable default exists for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuntimeFixtureBuilder {
    temp_dir: String,
    application_path: String,
    node_id: String,
    run_root: String,
}

impl Default for RuntimeFixtureBuilder {
    fn default() -> Self {
        Self {
            temp_dir: DEFAULT_TEMP_DIR.to_owned(),
            application_path: DEFAULT_APPLICATION_PATH.to_owned(),
            node_id: DEFAULT_NODE_ID.to_owned(),
            run_root: String::new(),
        }
    }
}

impl RuntimeFixtureBuilder {
    /// Creates a builder preloaded with the default variable values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scratch directory.
    #[must_use]
    pub fn temp_dir(mut self, value: impl Into<String>) -> Self {
        self.temp_dir = value.into();
        self
    }

    /// Sets the application root.
    #[must_use]
    pub fn application_path(mut self, value: impl Into<String>) -> Self {
        self.application_path = value.into();
        self
    }

    /// Sets the node identifier.
    #[must_use]
    pub fn node_id(mut self, value: impl Into<String>) -> Self {
        self.node_id = value.into();
        self
    }

    /// Sets the run output root.
    #[must_use]
    pub fn run_root(mut self, value: impl Into<String>) -> Self {
        self.run_root = value.into();
        self
    }

    /// Builds and validates the [`RuntimeFixture`], trimming string inputs.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when any field is blank or unexportable.
    pub fn build(self) -> Result<RuntimeFixture, FixtureError> {
        let fixture = RuntimeFixture {
            temp_dir: Utf8PathBuf::from(self.temp_dir.trim()),
            application_path: Utf8PathBuf::from(self.application_path.trim()),
            node_id: self.node_id.trim().to_owned(),
            run_root: Utf8PathBuf::from(self.run_root.trim()),
        };
        fixture.validate()?;
        Ok(fixture)
    }
}

/// Errors raised while validating a fixture.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum FixtureError {
    /// Indicates a fixture value is empty after trimming.
    #[error("fixture field {field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Indicates a fixture value cannot pass through the process environment.
    #[error("fixture field {field} contains a NUL byte")]
    UnexportableField {
        /// Name of the offending field.
        field: &'static str,
    },
}
