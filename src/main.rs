//! swiftuice - SwiftUI performance analysis CLI

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use swiftuice::cli::{self, Cli};
use swiftuice::parsers::AnalyzeError;

/// Exit status when the input held nothing parseable
const EXIT_NO_DATA: u8 = 3;

fn main() -> ExitCode {
    // Usage errors exit with 2 from clap
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(AnalyzeError::NoData) = err.downcast_ref::<AnalyzeError>() {
                eprintln!("error: {}", err);
                return ExitCode::from(EXIT_NO_DATA);
            }
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
