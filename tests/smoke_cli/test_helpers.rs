//! Shared fixtures for smoke-suite CLI behavioural tests.

use std::process::Output;
use std::sync::{Arc, LazyLock};

use escargot::CargoBuild;
use rstest::fixture;
use tempfile::TempDir;

#[derive(Clone, Debug)]
pub struct CliOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    pub fn from_process_output(output: Output) -> Self {
        let Output {
            status,
            stdout: raw_stdout,
            stderr: raw_stderr,
        } = output;
        let status_code = status.code().unwrap_or(1);
        let stdout = String::from_utf8_lossy(&raw_stdout).into_owned();
        let stderr = String::from_utf8_lossy(&raw_stderr).into_owned();
        Self {
            status_code,
            stdout,
            stderr,
        }
    }
}

/// Context threaded through the CLI scenarios. Every run executes inside a
/// scratch working directory so configuration discovery and artifacts stay
/// isolated from the host checkout.
#[derive(Clone, Debug)]
pub struct SmokeCliContext {
    pub workdir: Option<Arc<TempDir>>,
    pub output: Option<CliOutput>,
}

#[expect(
    clippy::expect_used,
    reason = "test setup requires panic on build failure"
)]
static DRYDOCK_BIN: LazyLock<escargot::CargoRun> = LazyLock::new(|| {
    CargoBuild::new()
        .bin("drydock")
        .features("test-backdoors")
        .run()
        .expect("failed to build drydock with test-backdoors feature")
});

pub fn drydock_cmd() -> assert_cmd::Command {
    DRYDOCK_BIN.command().into()
}

impl SmokeCliContext {
    pub fn base_command(&self) -> assert_cmd::Command {
        let mut cmd = drydock_cmd();
        if let Some(workdir) = &self.workdir {
            cmd.current_dir(workdir.path());
        }
        cmd
    }
}

#[fixture]
pub fn smoke_cli_context() -> SmokeCliContext {
    SmokeCliContext {
        workdir: None,
        output: None,
    }
}
