//! BDD scenarios for the smoke-suite CLI.

use rstest_bdd_macros::scenario;

use super::test_helpers::{SmokeCliContext, smoke_cli_context};

#[scenario(
    path = "tests/features/smoke_cli.feature",
    name = "Report a passing smoke suite"
)]
fn scenario_passing_smoke_suite(smoke_cli_context: SmokeCliContext) {
    let _ = smoke_cli_context;
}

#[scenario(
    path = "tests/features/smoke_cli.feature",
    name = "Report a forced check failure"
)]
fn scenario_forced_failure(smoke_cli_context: SmokeCliContext) {
    let _ = smoke_cli_context;
}

#[scenario(
    path = "tests/features/smoke_cli.feature",
    name = "Report a forced panic as an error"
)]
fn scenario_forced_panic(smoke_cli_context: SmokeCliContext) {
    let _ = smoke_cli_context;
}
