//! BDD scenarios for the suite runner.

use rstest_bdd_macros::scenario;

use super::test_helpers::{HarnessContext, harness_context};

#[scenario(
    path = "tests/features/harness.feature",
    name = "Bootstrap the node contract and pass the built-in smoke case"
)]
fn scenario_builtin_smoke_case(harness_context: HarnessContext) {
    let _ = harness_context;
}

#[scenario(
    path = "tests/features/harness.feature",
    name = "Record a failing check without stopping later cases"
)]
fn scenario_failing_check(harness_context: HarnessContext) {
    let _ = harness_context;
}

#[scenario(
    path = "tests/features/harness.feature",
    name = "Convert a panicking case into an errored outcome"
)]
fn scenario_panicking_case(harness_context: HarnessContext) {
    let _ = harness_context;
}

#[scenario(
    path = "tests/features/harness.feature",
    name = "Record a panicking case without stopping later cases"
)]
fn scenario_panicking_case_with_survivor(harness_context: HarnessContext) {
    let _ = harness_context;
}

#[scenario(
    path = "tests/features/harness.feature",
    name = "Treat an empty suite as a passing run"
)]
fn scenario_empty_suite(harness_context: HarnessContext) {
    let _ = harness_context;
}
