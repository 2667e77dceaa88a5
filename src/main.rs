//! Study Tracker - Local-first coursework tracking

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = study_tracker::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
