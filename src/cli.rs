use clap::{Parser, Subcommand};

use crate::commands;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "tomanbot")]
#[command(about = "Telegram channel bot for Iranian market prices", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the poll/publish loop
    Run,
    /// Fetch prices once and print the report
    Fetch,
    /// Show the persisted publish state
    Status,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => commands::run::run().await,
        Commands::Fetch => commands::fetch::run().await,
        Commands::Status => commands::status::run().await,
    }
}
