//! Check helpers used inside test cases.
//!
//! Checks report failures as values instead of panicking: each helper
//! returns a [`CheckFailure`] so case bodies compose with `?` and the runner
//! records the first failed check against its case without unwinding. Panics
//! remain reserved for genuine defects and are reported separately as
//! errors.

use std::fmt::Debug;

use thiserror::Error;

/// Failure raised by a check inside a test case.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CheckFailure {
    /// Two values expected to be equal were not.
    #[error("expected {expected}, got {actual}")]
    NotEqual {
        /// Expected value rendered with `Debug`.
        expected: String,
        /// Actual value rendered with `Debug`.
        actual: String,
    },
    /// A named condition did not hold.
    #[error("condition not met: {0}")]
    Unmet(String),
}

/// Checks that two values compare equal.
///
/// # Errors
///
/// Returns [`CheckFailure::NotEqual`] when the values differ.
pub fn equal<T: Debug + PartialEq>(expected: &T, actual: &T) -> Result<(), CheckFailure> {
    if expected == actual {
        return Ok(());
    }
    Err(CheckFailure::NotEqual {
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    })
}

/// Checks that `condition` holds.
///
/// # Errors
///
/// Returns [`CheckFailure::Unmet`] carrying `description` when it does not.
pub fn that(condition: bool, description: impl Into<String>) -> Result<(), CheckFailure> {
    if condition {
        Ok(())
    } else {
        Err(CheckFailure::Unmet(description.into()))
    }
}
