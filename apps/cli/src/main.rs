mod api_client;
mod commands;
mod config;
mod models;
mod retrieve;
mod share;
mod submit;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::config::Config;

/// Command-line client for the CV roast service: upload a resume, get it
/// roasted, and pull the result back by its roast id.
#[derive(Parser)]
#[command(
    name = "roast",
    about = "Submit your resume for a brutal AI critique",
    version
)]
struct Cli {
    /// Base URL of the roast API. Overrides ROAST_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a resume (PDF, DOC, or DOCX, max 5MB) and print its roast.
    Upload {
        /// Path to the resume file.
        path: PathBuf,
    },

    /// Print the roast for an existing roast id.
    Show {
        roast_id: String,
    },

    /// Print processing statistics for a roast.
    Stats {
        roast_id: String,
    },

    /// Print a prefilled share message and compose link for a roast.
    Share {
        roast_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let api_url = cli.api_url.unwrap_or(config.api_url);
    debug!("roast client v{} (api: {api_url})", env!("CARGO_PKG_VERSION"));

    let api = ApiClient::new(api_url);

    match cli.command {
        Commands::Upload { path } => commands::upload(&api, &path).await,
        Commands::Show { roast_id } => commands::show(&api, &roast_id).await,
        Commands::Stats { roast_id } => commands::stats(&api, &roast_id).await,
        Commands::Share { roast_id } => commands::share(&api, &roast_id).await,
    }
}
