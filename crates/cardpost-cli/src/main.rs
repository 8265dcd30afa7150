mod bootstrap_helpers;

use std::process::ExitCode;

use cardpost_cli::{execute, Cli};
use cardpost_runtime::RunOutcome;
use clap::Parser;
use tracing::{error, info};

use crate::bootstrap_helpers::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match execute(&cli).await {
        Ok(RunOutcome::Published(publication)) => {
            info!(post_id = %publication.result.post_id, "{}", publication.message);
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Skipped(_)) => ExitCode::SUCCESS,
        Err(run_error) => {
            let message = run_error.to_string();
            error!(repository = %cli.repository.trim(), "{message}");
            // Workflow command that marks the step as failed in the Actions UI.
            println!("::error::{message}");
            ExitCode::FAILURE
        }
    }
}
