use std::io;
use std::process::ExitCode;

use clap::Parser;
use toybank::config::{CliArgs, Config};
use toybank::menu::Session;
use toybank::{logging, Ledger};

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);
    logging::init(&config.logging);

    let log = match toybank::open_store(&config.store) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Can't open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut ledger = Ledger::new(log);
    let result = Session::new(&mut ledger, io::stdin().lock(), io::stdout().lock()).run();

    if let Err(e) = ledger.into_log().close() {
        tracing::warn!(error = %e, "Failed to close store");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("I/O error: {}", e);
            ExitCode::FAILURE
        }
    }
}
