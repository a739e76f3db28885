//! Render a person listing or export from example data.
//!
//! Settings come from `--flags`, `PERSONS_REPORT_*` environment variables or
//! a configuration file. The report goes to `--output` when given, otherwise
//! to standard output; logs go to standard error.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use backend::report::{ReportError, ReportOutput, ReportSettings, run_report, write_report};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = match ReportSettings::load_from_iter(std::env::args_os()) {
        Ok(settings) => settings,
        Err(err) => return fail(&format!("invalid configuration: {err}")),
    };

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "persons report failed");
            fail(&err.to_string())
        }
    }
}

fn run(settings: &ReportSettings) -> Result<(), ReportError> {
    let output = run_report(settings, Arc::new(DefaultClock))?;
    match settings.output.as_deref() {
        Some(path) => write_report(&output, path),
        None => write_stdout(&output),
    }
}

fn write_stdout(output: &ReportOutput) -> Result<(), ReportError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.bytes())
        .and_then(|()| stdout.flush())
        .map_err(|error| ReportError::Io {
            path: "<stdout>".into(),
            message: error.to_string(),
        })
}

fn fail(message: &str) -> ExitCode {
    // Nothing more to report if stderr itself is gone.
    let _ignored = writeln!(io::stderr().lock(), "persons-report: {message}");
    ExitCode::FAILURE
}
