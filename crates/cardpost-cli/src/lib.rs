//! Entry points for the `cardpost` binary: argument parsing and wiring of the
//! GitHub and Twitter clients into the publishing pipeline.

pub mod cli_args;
pub mod run_command;

pub use cli_args::Cli;
pub use run_command::{build_run_config, execute};
