use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopfront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login {
            identifier,
            admin,
            password,
        } => cli::commands::login(&identifier, admin, password).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Whoami { format } => cli::commands::whoami(format).await,
        Commands::Routes => cli::commands::list_routes().await,
        Commands::Access { path } => cli::commands::access(&path).await,
        Commands::Products { action } => cli::commands::products(action).await,
        Commands::Orders { action } => cli::commands::orders(action).await,
        Commands::Cart { action } => cli::commands::cart(action).await,
        Commands::Delivery { action } => cli::commands::delivery(action).await,
        Commands::Reports { action } => cli::commands::reports(action).await,
    }
}
