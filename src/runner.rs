//! Sequential suite execution against a bootstrapped fixture.
//!
//! The runner applies the fixture once, then executes every registered case
//! in order on the calling thread. Failed checks and panics are recorded
//! against their case; neither stops the cases that follow. Determinism
//! comes from the fixed execution order and the absence of shared mutable
//! state between cases.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::check::CheckFailure;
use crate::environment::{Environment, ProcessEnvironment};
use crate::fixture::{FixtureError, RuntimeFixture};
use crate::suite::{CaseBody, CaseContext, Suite, TestCase};

/// Final status recorded for a single case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CaseStatus {
    /// Every check in the case held.
    Passed,
    /// A check failed; the failure is recorded verbatim.
    Failed(CheckFailure),
    /// The case panicked, or its setup failed or panicked.
    Errored(String),
}

/// Result recorded for one executed case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaseOutcome {
    /// Case name as registered.
    pub name: String,
    /// Final status of the case.
    pub status: CaseStatus,
    /// Wall-clock time spent in the case, setup included.
    pub elapsed: Duration,
}

/// Aggregated outcome of a full suite run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// Per-case outcomes in execution order.
    pub outcomes: Vec<CaseOutcome>,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Number of cases executed.
    #[must_use]
    pub const fn executed(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of cases whose checks all held.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|status| matches!(status, CaseStatus::Passed))
    }

    /// Number of cases that recorded a failed check.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.count(|status| matches!(status, CaseStatus::Failed(_)))
    }

    /// Number of cases that errored through a panic or failed setup.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.count(|status| matches!(status, CaseStatus::Errored(_)))
    }

    /// Reports whether the run recorded no failures and no errors.
    ///
    /// An empty run counts as a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures() == 0 && self.errors() == 0
    }

    /// Process exit code for this summary: `0` on success, `1` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    fn count(&self, predicate: impl Fn(&CaseStatus) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| predicate(&outcome.status))
            .count()
    }
}

/// Executes suites sequentially after bootstrapping the fixture.
#[derive(Clone, Debug)]
pub struct SuiteRunner<E: Environment> {
    fixture: RuntimeFixture,
    env: E,
}

impl SuiteRunner<ProcessEnvironment> {
    /// Creates a runner wired to the real process environment.
    #[must_use]
    pub const fn with_process_environment(fixture: RuntimeFixture) -> Self {
        Self::new(fixture, ProcessEnvironment)
    }
}

impl<E: Environment> SuiteRunner<E> {
    /// Creates a runner that bootstraps `fixture` into `env`.
    #[must_use]
    pub const fn new(fixture: RuntimeFixture, env: E) -> Self {
        Self { fixture, env }
    }

    /// Fixture this runner bootstraps.
    #[must_use]
    pub const fn fixture(&self) -> &RuntimeFixture {
        &self.fixture
    }

    /// Environment the runner writes into.
    #[must_use]
    pub const fn environment(&self) -> &E {
        &self.env
    }

    /// Validates the fixture and writes its variables into the environment.
    ///
    /// Bootstrapping is idempotent; [`SuiteRunner::run`] calls it before
    /// every suite.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the fixture fails validation.
    pub fn bootstrap(&mut self) -> Result<(), FixtureError> {
        self.fixture.apply_to(&mut self.env)
    }

    /// Bootstraps the fixture, then executes every case in registration
    /// order.
    ///
    /// A failing or panicking case never stops the cases that follow; each
    /// outcome is recorded separately. An empty suite yields a successful
    /// summary with zero executed cases.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the fixture fails validation; no case
    /// executes in that situation.
    pub fn run(&mut self, suite: &Suite) -> Result<RunSummary, FixtureError> {
        self.bootstrap()?;
        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(suite.len());
        for case in suite.cases() {
            outcomes.push(self.run_case(case));
        }
        Ok(RunSummary {
            outcomes,
            elapsed: started.elapsed(),
        })
    }

    fn run_case(&self, case: &TestCase) -> CaseOutcome {
        let started = Instant::now();
        let ctx = CaseContext::new(&self.fixture, &self.env);
        let status = execute_case(case, &ctx);
        CaseOutcome {
            name: case.name().to_owned(),
            status,
            elapsed: started.elapsed(),
        }
    }
}

fn execute_case(case: &TestCase, ctx: &CaseContext<'_>) -> CaseStatus {
    if let Some(setup) = case.setup_body() {
        match run_body(setup, ctx) {
            Ok(Ok(())) => {}
            Ok(Err(failure)) => return CaseStatus::Errored(format!("setup failed: {failure}")),
            Err(message) => return CaseStatus::Errored(format!("setup panicked: {message}")),
        }
    }
    match run_body(case.run_body(), ctx) {
        Ok(Ok(())) => CaseStatus::Passed,
        Ok(Err(failure)) => CaseStatus::Failed(failure),
        Err(message) => CaseStatus::Errored(format!("panicked: {message}")),
    }
}

/// Runs one body, translating an unwind into the panic payload text.
fn run_body(body: &CaseBody, ctx: &CaseContext<'_>) -> Result<Result<(), CheckFailure>, String> {
    panic::catch_unwind(AssertUnwindSafe(|| body(ctx)))
        .map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload.downcast_ref::<&str>().map_or_else(
        || {
            payload
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| String::from("non-string panic payload"))
        },
        |message| (*message).to_owned(),
    )
}
