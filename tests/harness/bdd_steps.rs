//! BDD step definitions for suite-runner behaviour.

use std::fmt;

use rstest_bdd_macros::{given, then, when};

use drydock::runner::{CaseStatus, RunSummary, SuiteRunner};
use drydock::smoke;
use drydock::suite::{Suite, TestCase};
use drydock::test_support::{MapEnvironment, failing_case, panicking_case, passing_case};
use drydock::{Environment, RuntimeFixture};

use super::test_helpers::HarnessContext;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
    #[error("suite construction failed: {0}")]
    Suite(String),
    #[error("suite run failed: {0}")]
    Run(String),
}

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Clone, Debug, Eq, PartialEq)]
        struct $name(String);

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Ok(Self(value.to_owned()))
            }
        }
    };
}

string_newtype!(AnchorPath);
string_newtype!(VariableName);
string_newtype!(VariableValue);
string_newtype!(FailureDetail);

fn build_suite(cases: Vec<TestCase>) -> Result<Suite, StepError> {
    let mut builder = Suite::builder();
    for case in cases {
        builder = builder
            .register(case)
            .map_err(|err| StepError::Suite(err.to_string()))?;
    }
    Ok(builder.build())
}

fn run_suite(
    mut harness_context: HarnessContext,
    suite: &Suite,
) -> Result<HarnessContext, StepError> {
    let fixture = harness_context
        .fixture
        .clone()
        .ok_or_else(|| StepError::Assertion(String::from("missing runtime fixture")))?;
    let mut runner = SuiteRunner::new(fixture, MapEnvironment::new());
    let summary = runner
        .run(suite)
        .map_err(|err| StepError::Run(err.to_string()))?;
    harness_context.summary = Some(summary);
    harness_context.runner = Some(runner);
    Ok(harness_context)
}

fn summary_of(harness_context: &HarnessContext) -> Result<&RunSummary, StepError> {
    harness_context
        .summary
        .as_ref()
        .ok_or_else(|| StepError::Assertion(String::from("missing run summary")))
}

#[given("a runtime fixture anchored at \"{anchor}\"")]
fn runtime_fixture_anchored(
    mut harness_context: HarnessContext,
    anchor: AnchorPath,
) -> HarnessContext {
    harness_context.fixture = Some(RuntimeFixture::anchored(anchor.as_ref()));
    harness_context
}

#[when("I run the built-in smoke suite")]
fn run_builtin_smoke_suite(harness_context: HarnessContext) -> Result<HarnessContext, StepError> {
    let suite = smoke::suite().map_err(|err| StepError::Suite(err.to_string()))?;
    run_suite(harness_context, &suite)
}

#[when("I run a suite with a failing check followed by a passing case")]
fn run_failing_then_passing(harness_context: HarnessContext) -> Result<HarnessContext, StepError> {
    let suite = build_suite(vec![failing_case("broken"), passing_case("survivor")])?;
    run_suite(harness_context, &suite)
}

#[when("I run a suite with a panicking case")]
fn run_panicking(harness_context: HarnessContext) -> Result<HarnessContext, StepError> {
    let suite = build_suite(vec![panicking_case("explode")])?;
    run_suite(harness_context, &suite)
}

#[when("I run a suite with a panicking case followed by a passing case")]
fn run_panicking_then_passing(
    harness_context: HarnessContext,
) -> Result<HarnessContext, StepError> {
    let suite = build_suite(vec![panicking_case("explode"), passing_case("survivor")])?;
    run_suite(harness_context, &suite)
}

#[when("I run an empty suite")]
fn run_empty(harness_context: HarnessContext) -> Result<HarnessContext, StepError> {
    run_suite(harness_context, &Suite::builder().build())
}

#[then("the summary reports tests={tests:u32}, failures={failures:u32}, errors={errors:u32}")]
fn summary_reports(
    harness_context: &HarnessContext,
    tests: u32,
    failures: u32,
    errors: u32,
) -> Result<(), StepError> {
    let summary = summary_of(harness_context)?;
    let matches = summary.executed() == tests as usize
        && summary.failures() == failures as usize
        && summary.errors() == errors as usize;
    if matches {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected tests={tests}, failures={failures}, errors={errors}, \
             got tests={}, failures={}, errors={}",
            summary.executed(),
            summary.failures(),
            summary.errors()
        )))
    }
}

#[then("the run exits with code {code:i32}")]
fn run_exits_with(harness_context: &HarnessContext, code: i32) -> Result<(), StepError> {
    let summary = summary_of(harness_context)?;
    if summary.exit_code() == code {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected exit code {code}, got {}",
            summary.exit_code()
        )))
    }
}

#[then("the failure detail reads \"{detail}\"")]
fn failure_detail_reads(
    harness_context: &HarnessContext,
    detail: FailureDetail,
) -> Result<(), StepError> {
    let summary = summary_of(harness_context)?;
    let failure = summary
        .outcomes
        .iter()
        .find_map(|outcome| {
            if let CaseStatus::Failed(failure) = &outcome.status {
                Some(failure.to_string())
            } else {
                None
            }
        })
        .ok_or_else(|| StepError::Assertion(String::from("no failed case recorded")))?;
    if failure == detail.as_ref() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected failure detail '{detail}', got '{failure}'"
        )))
    }
}

#[then("the errored case mentions \"{detail}\"")]
fn errored_case_mentions(
    harness_context: &HarnessContext,
    detail: FailureDetail,
) -> Result<(), StepError> {
    let summary = summary_of(harness_context)?;
    let message = summary
        .outcomes
        .iter()
        .find_map(|outcome| {
            if let CaseStatus::Errored(message) = &outcome.status {
                Some(message.clone())
            } else {
                None
            }
        })
        .ok_or_else(|| StepError::Assertion(String::from("no errored case recorded")))?;
    if message.contains(detail.as_ref()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected errored case to mention '{detail}', got '{message}'"
        )))
    }
}

#[then("the bootstrapped environment records \"{name}\" as \"{value}\"")]
fn environment_records(
    harness_context: &HarnessContext,
    name: VariableName,
    value: VariableValue,
) -> Result<(), StepError> {
    let Some(runner) = &harness_context.runner else {
        return Err(StepError::Assertion(String::from("missing suite runner")));
    };
    let actual = runner
        .environment()
        .get(name.as_ref())
        .ok_or_else(|| StepError::Assertion(format!("environment missing {name}")))?;
    if actual == value.as_ref() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {name}={value}, got {name}={actual}"
        )))
    }
}
