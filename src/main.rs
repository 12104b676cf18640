mod cli;
mod commands;
mod config;
mod constants;
mod error;
mod models;
mod services;
mod utils;
mod worker;

#[tokio::main]
async fn main() {
    // A missing .env is fine; deployments may configure the environment
    // directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = cli::run().await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
