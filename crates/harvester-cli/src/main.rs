use harvester_core::logging::{self, LogTarget};

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    logging::init(LogTarget::from_env());

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("harvester error: {:#}", err);
        std::process::exit(1);
    }
}
