//! Explicit registry of node test cases.
//!
//! Cases are registered by hand rather than discovered by reflection or
//! naming convention, so the set of cases and their execution order are
//! visible at the registration site. The builder rejects blank and duplicate
//! names; execution order is registration order.

use std::fmt;

use thiserror::Error;

use crate::check::CheckFailure;
use crate::environment::Environment;
use crate::fixture::RuntimeFixture;

/// Execution context handed to setup and run bodies.
///
/// The context exposes the bootstrapped fixture and a read-only view of the
/// environment the runner populated. Cases cannot mutate the environment.
pub struct CaseContext<'a> {
    fixture: &'a RuntimeFixture,
    env: &'a dyn Environment,
}

impl<'a> CaseContext<'a> {
    /// Creates a context borrowing the fixture and environment view.
    #[must_use]
    pub const fn new(fixture: &'a RuntimeFixture, env: &'a dyn Environment) -> Self {
        Self { fixture, env }
    }

    /// Fixture the runner applied before the suite started.
    #[must_use]
    pub const fn fixture(&self) -> &'a RuntimeFixture {
        self.fixture
    }

    /// Reads a variable from the bootstrapped environment.
    #[must_use]
    pub fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name)
    }
}

impl fmt::Debug for CaseContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseContext")
            .field("fixture", &self.fixture)
            .finish_non_exhaustive()
    }
}

/// Body executed for a case's setup or run phase.
pub type CaseBody = dyn Fn(&CaseContext<'_>) -> Result<(), CheckFailure>;

/// Named unit of behaviour verification.
pub struct TestCase {
    name: String,
    setup: Option<Box<CaseBody>>,
    run: Box<CaseBody>,
}

impl TestCase {
    /// Creates a case with the given name and run body.
    ///
    /// Surrounding whitespace is trimmed from the name; the builder rejects
    /// names that are blank after trimming.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        run: impl Fn(&CaseContext<'_>) -> Result<(), CheckFailure> + 'static,
    ) -> Self {
        Self {
            name: name.into().trim().to_owned(),
            setup: None,
            run: Box::new(run),
        }
    }

    /// Attaches a setup body executed before the run body.
    ///
    /// A setup that fails or panics marks the case as errored and the run
    /// body is skipped.
    #[must_use]
    pub fn with_setup(
        mut self,
        setup: impl Fn(&CaseContext<'_>) -> Result<(), CheckFailure> + 'static,
    ) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Name the case registers and reports under.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) fn setup_body(&self) -> Option<&CaseBody> {
        self.setup.as_deref()
    }

    pub(crate) fn run_body(&self) -> &CaseBody {
        self.run.as_ref()
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("has_setup", &self.setup.is_some())
            .finish_non_exhaustive()
    }
}

/// Ordered collection of cases produced by [`SuiteBuilder`].
#[derive(Debug, Default)]
pub struct Suite {
    cases: Vec<TestCase>,
}

impl Suite {
    /// Starts an empty suite builder.
    #[must_use]
    pub fn builder() -> SuiteBuilder {
        SuiteBuilder::new()
    }

    /// Number of registered cases.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cases.len()
    }

    /// Reports whether the suite has no cases.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Iterates the cases in execution order.
    #[must_use]
    pub fn cases(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    /// Case names in execution order.
    #[must_use]
    pub fn case_names(&self) -> Vec<&str> {
        self.cases.iter().map(TestCase::name).collect()
    }
}

/// Builder enforcing the registry's naming rules.
#[derive(Debug, Default)]
pub struct SuiteBuilder {
    cases: Vec<TestCase>,
}

impl SuiteBuilder {
    /// Creates a builder with no registered cases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a case at the end of the execution order.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::BlankName`] when the case name is empty and
    /// [`SuiteError::DuplicateName`] when the name is already registered.
    pub fn register(mut self, case: TestCase) -> Result<Self, SuiteError> {
        if case.name().is_empty() {
            return Err(SuiteError::BlankName);
        }
        if self.cases.iter().any(|existing| existing.name() == case.name()) {
            return Err(SuiteError::DuplicateName {
                name: case.name().to_owned(),
            });
        }
        self.cases.push(case);
        Ok(self)
    }

    /// Finishes the builder, yielding the suite.
    #[must_use]
    pub fn build(self) -> Suite {
        Suite { cases: self.cases }
    }
}

/// Errors raised while assembling a suite.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SuiteError {
    /// Indicates a case was registered with a blank name.
    #[error("case name must not be blank")]
    BlankName,
    /// Indicates a case name was registered twice.
    #[error("duplicate case name: {name}")]
    DuplicateName {
        /// Name that was registered a second time.
        name: String,
    },
}
