use anyhow::Result;
use clap::Parser;
use sunlapse::availability::Archive;
use sunlapse::conf::LapseConfig;
use sunlapse::nearest::nearest;
use sunlapse::timestamp::Timestamp;
use sunlapse::window::{compute_window, DateArg};
use sunlapse::{clipboard, logging};
use tracing::{info, warn};

/// Build a sunrise-to-sunset satellite time-lapse link.
#[derive(Parser)]
struct Cli {
    #[arg(help = "Local date as YYYYMMDD (default: today)", default_value = "today")]
    date: DateArg,
}

async fn closest_capture(archive: &Archive, config: &LapseConfig, desired: Timestamp) -> Result<Timestamp> {
    let available = archive
        .fetch_availability(&desired.date(), &config.archive.section, &config.archive.product)
        .await?;
    let chosen = nearest(&available, desired)?;
    Ok(chosen)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing::subscriber::set_global_default(logging::build_subscriber()?)?;

    let args = Cli::parse();
    let config = LapseConfig::builtin()?;

    let window = compute_window(&config.location, &args.date)?;

    let archive = Archive::from_config(&config.archive)?;
    let start = closest_capture(&archive, &config, window.sunrise).await?;
    let end = closest_capture(&archive, &config, window.sunset).await?;

    let url = config.viewer.with_window(start, end).url();
    info!("The generated URL string is:");
    println!("{url}");

    if let Err(e) = clipboard::copy(&url) {
        warn!("Could not copy the URL to the clipboard: {e}");
    }

    Ok(())
}
