use crate::structs::cli::Cli;
use clap::Parser;
use crate::workers::command_runner::CommandRunner;

mod structs;
mod services;
mod adapters;
mod traits;
mod enums;
mod logger;
mod errors;
mod config;
mod workers;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new();
    runner.run_command(cli.command).await?;
    Ok(())
}
