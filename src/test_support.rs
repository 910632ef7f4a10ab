//! Test support utilities shared across unit and integration tests.

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::ffi::OsString;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::check::{self, CheckFailure};
use crate::environment::Environment;
use crate::suite::TestCase;

/// In-memory environment used to exercise bootstrap logic without touching
/// process state.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MapEnvironment {
    values: BTreeMap<String, String>,
}

impl MapEnvironment {
    /// Creates an empty environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Returns a snapshot of every stored variable.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }
}

impl Environment for MapEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_owned(), value.to_owned());
    }
}

/// Builds a case whose checks always hold.
#[must_use]
pub fn passing_case(name: &str) -> TestCase {
    TestCase::new(name, |_ctx| Ok(()))
}

/// Builds a case that fails a deliberate `1 == 2` equality check.
#[must_use]
pub fn failing_case(name: &str) -> TestCase {
    TestCase::new(name, |_ctx| check::equal(&1, &2))
}

/// Builds a case that panics when executed.
#[must_use]
pub fn panicking_case(name: &str) -> TestCase {
    TestCase::new(name, |_ctx| -> Result<(), CheckFailure> {
        panic!("scripted panic")
    })
}

/// Builds a case that appends its name to `log` when executed.
#[must_use]
pub fn recording_case(name: &str, log: &Arc<Mutex<Vec<String>>>) -> TestCase {
    let sink = Arc::clone(log);
    let recorded = name.to_owned();
    TestCase::new(name, move |_ctx| {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(recorded.clone());
        Ok(())
    })
}

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Guard that holds the env mutex and cleans up variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets multiple environment variables while holding a global mutex.
    #[must_use]
    pub fn set_vars(pairs: &[(&str, &str)]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                pairs.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard::set_vars"
        );

        let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut previous = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe { env::set_var(key, value) };
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
