use clap::Parser;
use std::process::ExitCode;

use legaldraft::cli::{execute, CliArgs};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    legaldraft::init_logging("warn");

    let args = CliArgs::parse();
    match execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
