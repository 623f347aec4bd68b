mod chat;
mod devices;
mod diagnose;
mod render;
mod stores;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use krishi_client::BackendClient;
use krishi_core::{Coordinates, ImageSource};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "krishi")]
#[command(about = "Crop disease diagnosis and remedy-store finder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diagnose a crop photo and show advice
    Diagnose {
        /// Path to the leaf or plant photo
        #[arg(long)]
        image: PathBuf,
        /// Treat the photo as freshly taken with the camera
        #[arg(long)]
        camera: bool,
        /// Look up stores for the recommended remedy after diagnosing
        #[arg(long, requires_all = ["lat", "lon"])]
        find_stores: bool,
        /// Latitude of the farm
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude of the farm
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
    },
    /// List nearby agricultural stores
    Stores {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Store category filter (e.g., pesticide_store)
        #[arg(long)]
        store_type: Option<String>,
        /// Show details for the Nth listed store (1-based)
        #[arg(long)]
        select: Option<usize>,
    },
    /// Show details for a single place
    Details {
        #[arg(long)]
        place_id: String,
    },
    /// Ask the crop assistant a question
    Chat {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = krishi_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(backend = %config.backend_url, env = %config.env, "configuration loaded");
    let client = Arc::new(BackendClient::from_config(&config)?);

    match cli.command {
        Commands::Diagnose {
            image,
            camera,
            find_stores,
            lat,
            lon,
        } => {
            let source = if camera {
                ImageSource::Camera
            } else {
                ImageSource::Gallery
            };
            let origin = match (find_stores, lat, lon) {
                (true, Some(lat), Some(lon)) => Some(parse_origin(lat, lon)?),
                _ => None,
            };
            diagnose::run_diagnose(client, image, source, origin).await
        }
        Commands::Stores {
            lat,
            lon,
            store_type,
            select,
        } => stores::run_stores(client, parse_origin(lat, lon)?, store_type, select).await,
        Commands::Details { place_id } => stores::run_details(&client, &place_id).await,
        Commands::Chat { prompt } => chat::run_chat(client, &prompt.join(" ")).await,
    }
}

fn parse_origin(lat: f64, lon: f64) -> anyhow::Result<Coordinates> {
    let origin = Coordinates::new(lat, lon);
    if !origin.is_valid() {
        anyhow::bail!("coordinates out of range: {origin}");
    }
    Ok(origin)
}
