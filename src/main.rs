//! Hexclash CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hexclash::cli::{Cli, Commands};
use hexclash::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let loaded = match cli.config.as_ref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => hexclash::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Login(args) => {
            hexclash::cli::commands::login::execute(args, &config, cli.json).await
        }
        Commands::Attack(args) => {
            hexclash::cli::commands::attack::execute(args, &config, cli.json).await
        }
        Commands::Map(args) => hexclash::cli::commands::map::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        hexclash::cli::handle_error(err, cli.json);
    }
}
