//! Core library for the Drydock node-runtime harness.
//!
//! Drydock simulates the environment a workflow runner exports to
//! processing-node jobs and executes deterministic smoke checks against it.
//! The crate exposes the runtime fixture, an explicit case registry, a
//! sequential runner with per-case isolation, and report rendering; the
//! `drydock` binary wires these together into a CLI.

pub mod artifact;
pub mod check;
pub mod config;
pub mod environment;
pub mod fixture;
pub mod report;
pub mod runner;
pub mod smoke;
pub mod suite;
pub mod test_support;

pub use artifact::{ArtifactError, REPORT_FILE_NAME, write_json_report};
pub use check::CheckFailure;
pub use config::{ConfigError, HarnessConfig};
pub use environment::{Environment, ProcessEnvironment};
pub use fixture::{
    APPLICATION_PATH_VAR, DEFAULT_APPLICATION_PATH, DEFAULT_NODE_ID, DEFAULT_TEMP_DIR,
    FixtureError, NODE_ID_VAR, RUN_ROOT_DIR_NAME, RUN_ROOT_VAR, RuntimeFixture,
    RuntimeFixtureBuilder, TEMP_DIR_VAR,
};
pub use report::{ReportError, render_json, write_text};
pub use runner::{CaseOutcome, CaseStatus, RunSummary, SuiteRunner};
pub use smoke::SMOKE_CASE_NAME;
pub use suite::{CaseBody, CaseContext, Suite, SuiteBuilder, SuiteError, TestCase};
