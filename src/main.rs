//! Binary entry point for the Drydock CLI.

use std::io::{self, Write};
use std::process;

use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;

use drydock::artifact::{self, ArtifactError};
use drydock::config::{ConfigError, HarnessConfig, expand_tilde};
use drydock::fixture::FixtureError;
use drydock::report::{self, ReportError};
use drydock::runner::{RunSummary, SuiteRunner};
use drydock::smoke;
use drydock::suite::{Suite, SuiteError};

mod cli;

use cli::{Cli, ReportFormatArg, RunArgs};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),
    #[error("suite registration error: {0}")]
    Suite(#[from] SuiteError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to resolve working directory: {0}")]
    WorkingDirectory(String),
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn dispatch(cli: Cli) -> Result<i32, CliError> {
    match cli {
        Cli::Run(args) => run_suite(&args),
        Cli::List => list_cases(io::stdout()),
    }
}

/// Runs the registered suite and returns the exit code for the run.
///
/// A run that completes with failures or errors reports them and returns
/// `1`; only harness-level problems (configuration, rendering, I/O) surface
/// as errors.
fn run_suite(args: &RunArgs) -> Result<i32, CliError> {
    let config = HarnessConfig::load_without_cli_args()?;
    let anchor = working_directory()?;
    let mut fixture = config.fixture(&anchor)?;
    if let Some(run_root) = args.run_root.as_deref() {
        fixture.run_root = Utf8PathBuf::from(expand_tilde(run_root));
        fixture.validate()?;
    }

    let suite = build_suite()?;
    let mut runner = SuiteRunner::with_process_environment(fixture);
    let summary = runner.run(&suite)?;

    render_report(args.format, &summary)?;
    if args.write_report || config.write_report {
        let path = artifact::write_json_report(&runner.fixture().run_root, &summary)?;
        writeln!(io::stderr(), "report written to {path}").ok();
    }

    Ok(summary.exit_code())
}

fn list_cases(mut target: impl Write) -> Result<i32, CliError> {
    let suite = build_suite()?;
    for name in suite.case_names() {
        writeln!(target, "{name}")?;
    }
    Ok(0)
}

fn render_report(format: ReportFormatArg, summary: &RunSummary) -> Result<(), CliError> {
    match format {
        ReportFormatArg::Text => report::write_text(io::stdout(), summary)?,
        ReportFormatArg::Json => {
            let rendered = report::render_json(summary)?;
            writeln!(io::stdout(), "{rendered}")?;
        }
    }
    Ok(())
}

fn working_directory() -> Result<Utf8PathBuf, CliError> {
    let cwd = std::env::current_dir().map_err(|err| CliError::WorkingDirectory(err.to_string()))?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| CliError::WorkingDirectory(path.display().to_string()))
}

fn build_suite() -> Result<Suite, SuiteError> {
    #[cfg(feature = "test-backdoors")]
    if let Ok(mode) = std::env::var(FORCED_SMOKE_ENV)
        && let Some(forced) = forced_smoke_suite(&mode)
    {
        return forced;
    }

    smoke::suite()
}

#[cfg(feature = "test-backdoors")]
const FORCED_SMOKE_ENV: &str = "DRYDOCK_SMOKE_RESULT";

/// Replaces the smoke case body with a deliberately failing or panicking
/// one, keeping the registered name. Only compiled with `test-backdoors`.
#[cfg(feature = "test-backdoors")]
fn forced_smoke_suite(mode: &str) -> Option<Result<Suite, SuiteError>> {
    use drydock::check::{self, CheckFailure};
    use drydock::suite::{SuiteBuilder, TestCase};

    let case = match mode {
        "fail" => TestCase::new(smoke::SMOKE_CASE_NAME, |_ctx| check::equal(&1, &2)),
        "panic" => TestCase::new(smoke::SMOKE_CASE_NAME, |_ctx| -> Result<(), CheckFailure> {
            panic!("forced smoke panic")
        }),
        _ => return None,
    };
    Some(Suite::builder().register(case).map(SuiteBuilder::build))
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
