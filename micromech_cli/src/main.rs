//! # Micromech CLI Application
//!
//! Interactive session for the effective moduli of a unidirectional
//! composite: enter (or read from CSV) a fiber and a matrix phase, then
//! display, save or export the Halpin-Tsai results.
//!
//! Configuration comes from `micromech.json` / `MICROMECH_CONFIG` and
//! `MICROMECH_OUTPUT_DIR`; logging goes to stderr and honours `RUST_LOG`.

mod acquire;
mod export;
mod prompt;
mod session;

use std::io;
use std::process::ExitCode;

use micromech_core::Settings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::prompt::Prompter;

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    init_tracing(&settings.log_filter);
    if let Some(err) = settings_error {
        tracing::warn!(error = %err, "invalid settings, using defaults");
    }
    tracing::debug!(output_dir = %settings.output_dir.display(), "settings");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    match session::run(&mut prompter, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            tracing::info!("input closed, ending session");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "session failed");
            ExitCode::FAILURE
        }
    }
}
