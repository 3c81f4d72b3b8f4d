//! StreamFetch: run the livestream-video handler against local data files.

use std::path::PathBuf;
use std::sync::Arc;

use streamfetch_bus::TracingBus;
use streamfetch_core::{load_channels, FetchArgs, Spec, StreamFetchConfig};
use streamfetch_provider::{CatalogClient, PassthroughTransform};
use streamfetch_runtime::{FetchOutcome, FetchVideoOrchestrator};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("STREAMFETCH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_help() {
    println!("StreamFetch: livestream video fetcher");
    println!();
    println!("Usage: streamfetch <command>");
    println!();
    println!("Commands:");
    println!("  fetch <channel> <event> <video>   Fetch one video through the handler");
    println!("  validate                          Check channels.json and catalog.json");
    println!("  help                              Show this help message");
    println!();
    println!("Environment:");
    println!("  STREAMFETCH_DATA_DIR     Data directory (default: data)");
    println!("  STREAMFETCH_SECRETS_KEY  Secrets key on each channel (default: livestream)");
}

async fn fetch(config: &StreamFetchConfig, args: &[String]) -> anyhow::Result<i32> {
    let [channel_id, event_id, video_id] = args else {
        eprintln!("Usage: streamfetch fetch <channel-id> <event-id> <video-id>");
        return Ok(1);
    };

    let channels = load_channels(&config.data_paths.channels_file)?;
    let channel = channels
        .into_iter()
        .find(|c| &c.id == channel_id)
        .ok_or_else(|| anyhow::anyhow!("Unknown channel: {}", channel_id))?;

    let catalog = CatalogClient::load(&config.data_paths.catalog_file)?;
    let orchestrator = FetchVideoOrchestrator::new(
        Arc::new(TracingBus),
        Arc::new(catalog),
        Arc::new(PassthroughTransform),
    )
    .with_secrets_key(config.secrets_key.clone());

    let outcome = orchestrator
        .fetch_video(&FetchArgs::new(channel, Spec::new(event_id.as_str(), video_id.as_str())))
        .await?;

    let code = match outcome {
        FetchOutcome::Fetched(resource) => {
            println!("{}", serde_json::to_string_pretty(&resource)?);
            0
        }
        FetchOutcome::NotFound(not_found) => {
            eprintln!("{}", not_found);
            1
        }
        other => {
            eprintln!("Nothing fetched ({})", other.label());
            2
        }
    };
    Ok(code)
}

fn validate(config: &StreamFetchConfig) -> anyhow::Result<i32> {
    let channels = load_channels(&config.data_paths.channels_file)?;
    let catalog = CatalogClient::load(&config.data_paths.catalog_file)?;

    println!("Channels: {}", channels.len());
    println!("Catalog videos: {}", catalog.len());

    let mut incomplete = 0;
    for channel in &channels {
        let missing = channel.credentials_for(&config.secrets_key).missing_fields();
        if !missing.is_empty() {
            incomplete += 1;
            println!("  {}: missing {}", channel.id, missing.join(", "));
        }
    }
    if incomplete == 0 {
        println!("All channels have complete {} credentials", config.secrets_key);
    }
    Ok(0)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let data_dir = resolve_data_dir();
    let config = StreamFetchConfig::from_env(&data_dir)?;
    info!("Data directory: {}", data_dir.display());

    let code = match args.get(1).map(String::as_str) {
        Some("fetch") => fetch(&config, &args[2..]).await?,
        Some("validate") => validate(&config)?,
        Some("--help" | "-h" | "help") | None => {
            print_help();
            0
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'streamfetch help' for usage.", other);
            1
        }
    };

    std::process::exit(code);
}
