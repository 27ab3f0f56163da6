use lib::config::postgres;
use lib::connection;
use std::process::ExitCode;
use wavesexchange_log::error;

// stdout carries the connection string and nothing else; logging happens only on failure.
fn main() -> ExitCode {
    let config = match postgres::load() {
        Ok(config) => config,
        Err(e) => {
            error!("cannot resolve database config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = connection::to_pg_config(&config) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    println!("{}", connection::build(&config));

    ExitCode::SUCCESS
}
