//! userguides CLI entrypoint

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use userguides::cli::Cli;

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Parse and execute CLI; a broken library is fatal
    let cli = Cli::parse();
    if let Err(e) = cli.execute() {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
