//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Environment variable that forces the built-in smoke case to misbehave.
///
/// Only honoured by binaries built with the `test-backdoors` feature.
pub const SMOKE_RESULT_ENV: &str = "DRYDOCK_SMOKE_RESULT";
