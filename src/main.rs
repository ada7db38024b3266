//! Confluence CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "confluence")]
#[command(about = "Linked-data lookup and navigation over a hydrographic network", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the lookup server
    Serve {
        /// Network file (JSON) to serve
        #[arg(short, long)]
        network: PathBuf,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "7750")]
        port: u16,

        /// Cap navigation traversals at this distance in kilometers
        #[arg(long)]
        max_distance_km: Option<f64>,

        /// Per-request navigation deadline in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },
    /// Print the registered data sources and exit
    Sources {
        /// Network file (JSON) to read
        #[arg(short, long)]
        network: PathBuf,
    },
    /// Load the network and verify flow-graph consistency
    Check {
        /// Network file (JSON) to read
        #[arg(short, long)]
        network: PathBuf,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "confluence={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Confluence v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve {
            network,
            host,
            port,
            max_distance_km,
            timeout_secs,
        } => commands::serve(network, host, port, max_distance_km, timeout_secs).await,
        Commands::Sources { network } => commands::sources(network),
        Commands::Check { network } => commands::check(network),
        Commands::Version => {
            println!("Confluence v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
