//! Environment abstraction used when bootstrapping node runtimes.
//!
//! The harness writes fixture variables through this seam so unit tests can
//! exercise bootstrap logic against an in-memory table instead of the
//! process-wide environment.

use std::env;

/// Read and write access to a named-variable table.
pub trait Environment {
    /// Returns the current value of `name`, or `None` when unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Sets `name` to `value`, replacing any previous value.
    ///
    /// # Panics
    ///
    /// Process-backed implementations panic when the platform rejects the
    /// pair (for example a NUL byte in `value`).
    /// [`crate::fixture::RuntimeFixture::apply_to`] screens values before
    /// calling this.
    fn set(&mut self, name: &str, value: &str);
}

/// Environment backed by the real process table.
///
/// Mutation must be serialised by the caller. The runner applies the fixture
/// once before any case executes, and the in-repo tests hold
/// [`crate::test_support::ENV_LOCK`] while mutating.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn set(&mut self, name: &str, value: &str) {
        // SAFETY: Callers serialise environment mutation; the runner writes
        // once before cases execute and tests hold `ENV_LOCK`.
        unsafe { env::set_var(name, value) };
    }
}
