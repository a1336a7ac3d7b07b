use std::io;
use std::process::ExitCode;

use clap::Parser;
use srcindex::{cli, command, logging};

fn main() -> ExitCode {
    let config = cli::Config::parse();

    if let Err(error) = logging::start(&config) {
        eprintln!("Failed to start logging: {error}");
    }

    let mut stdout = io::stdout().lock();
    match command::run(&config.command, &mut stdout) {
        Ok(command::Outcome::Success) => ExitCode::SUCCESS,
        Ok(command::Outcome::Failure) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
