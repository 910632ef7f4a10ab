//! Shared fixtures for suite-runner behavioural tests.

use drydock::RuntimeFixture;
use drydock::runner::{RunSummary, SuiteRunner};
use drydock::test_support::MapEnvironment;
use rstest::fixture;

/// Context threaded through the runner scenarios. The runner is kept after
/// the run so assertions can inspect the bootstrapped environment.
#[derive(Clone, Debug)]
pub struct HarnessContext {
    pub fixture: Option<RuntimeFixture>,
    pub runner: Option<SuiteRunner<MapEnvironment>>,
    pub summary: Option<RunSummary>,
}

#[fixture]
pub fn harness_context() -> HarnessContext {
    HarnessContext {
        fixture: None,
        runner: None,
        summary: None,
    }
}
