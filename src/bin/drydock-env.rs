//! Shell-export companion for Drydock.
//!
//! Prints `export` lines for the node runtime fixture so a shell session can
//! reproduce the environment the harness bootstraps, for example with
//! `eval "$(drydock-env)"`.

use std::io::Write as _;

use camino::Utf8PathBuf;
use clap::Parser;
use drydock::fixture::{
    DEFAULT_APPLICATION_PATH, DEFAULT_NODE_ID, DEFAULT_TEMP_DIR, RUN_ROOT_DIR_NAME, RuntimeFixture,
};
use shell_escape::unix::escape;

#[derive(Debug, Parser)]
#[command(
    name = "drydock-env",
    about = "Print export lines for the simulated node runtime environment"
)]
struct Cli {
    /// Scratch directory exported as TMPDIR.
    #[arg(long, env = "DRYDOCK_TEMP_DIR", default_value = DEFAULT_TEMP_DIR)]
    temp_dir: String,
    /// Application root exported as _CIOP_APPLICATION_PATH.
    #[arg(long, env = "DRYDOCK_APPLICATION_PATH", default_value = DEFAULT_APPLICATION_PATH)]
    application_path: String,
    /// Node identifier exported as ciop_job_nodeid.
    #[arg(long, env = "DRYDOCK_NODE_ID", default_value = DEFAULT_NODE_ID)]
    node_id: String,
    /// Run root exported as ciop_wf_run_root; defaults to `<cwd>/artifacts`.
    #[arg(long, env = "DRYDOCK_RUN_ROOT")]
    run_root: Option<String>,
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    let run_root = cli.run_root.map_or_else(default_run_root, Ok)?;
    let fixture = RuntimeFixture::builder()
        .temp_dir(cli.temp_dir)
        .application_path(cli.application_path)
        .node_id(cli.node_id)
        .run_root(run_root)
        .build()
        .map_err(|err| err.to_string())?;

    let mut stdout = std::io::stdout();
    for (name, value) in fixture.vars() {
        writeln!(stdout, "export {name}={}", escape(value.into()))
            .map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn default_run_root() -> Result<String, String> {
    let cwd = std::env::current_dir().map_err(|err| err.to_string())?;
    let utf8_cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| path.display().to_string())?;
    Ok(utf8_cwd.join(RUN_ROOT_DIR_NAME).into_string())
}
