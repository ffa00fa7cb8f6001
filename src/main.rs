//! `rescue-maint` - Reports row counts for a rescue store and optionally seeds
//! a demonstration animal with one vet visit.

use clap::Parser;
use dotenvy::dotenv;
use rescue_store::config::StoreLocation;
use rescue_store::maintenance;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rescue-maint")]
#[command(about = "Inspect or seed a rescue store file", long_about = None)]
struct Cli {
    /// Store file to open (defaults to the configured data directory)
    path: Option<PathBuf>,

    /// Insert a demo animal and vet visit if the store has no animals yet
    #[arg(long)]
    seed: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenv().ok();

    let cli = Cli::parse();

    let path = match cli.path {
        Some(path) => path,
        None => match StoreLocation::resolve() {
            Ok(location) => location.store_path(),
            Err(e) => {
                error!("Could not resolve store location: {}", e);
                println!("Store error: {e}");
                return;
            }
        },
    };
    info!("Using store at {}", path.display());

    let report = maintenance::run(&path, cli.seed).await;
    println!("{report}");
}
