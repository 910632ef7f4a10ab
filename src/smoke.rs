//! Built-in node smoke suite.
//!
//! The suite holds a single case that reads every fixture variable back out
//! of the bootstrapped environment and checks it equals the value the
//! fixture injected. Passing it means a node process launched in this
//! environment would see the runtime contract it expects.

use crate::check::{self, CheckFailure};
use crate::suite::{CaseContext, Suite, SuiteError, TestCase};

/// Name the smoke case registers under.
pub const SMOKE_CASE_NAME: &str = "environment_roundtrip";

/// Builds the built-in node smoke suite.
///
/// # Errors
///
/// Returns [`SuiteError`] when registration fails; with the fixed case set
/// this indicates a defect rather than a user mistake.
pub fn suite() -> Result<Suite, SuiteError> {
    Ok(Suite::builder()
        .register(TestCase::new(SMOKE_CASE_NAME, environment_roundtrip))?
        .build())
}

fn environment_roundtrip(ctx: &CaseContext<'_>) -> Result<(), CheckFailure> {
    for (name, expected) in ctx.fixture().vars() {
        let want = format!("{name}={expected}");
        let got = format!(
            "{name}={}",
            ctx.env_var(name)
                .unwrap_or_else(|| String::from("<unset>"))
        );
        check::equal(&want, &got)?;
    }
    Ok(())
}
