use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use tokio::task::JoinHandle;
use weather_fetch_core::{Config, UiQueue, WeatherFetcher};

use crate::display::WeatherDisplay;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-fetch", version, about = "Current weather conditions from OpenWeather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an API key and default location.
    Configure,

    /// Fetch and show the current conditions.
    Show {
        /// Latitude in decimal degrees; defaults to the configured value.
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees; defaults to the configured value.
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,

        /// API key to use instead of the configured one. May be empty.
        #[arg(long)]
        api_key: Option<String>,

        /// Endpoint to query instead of the configured one.
        #[arg(long)]
        base_url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                lat,
                lon,
                api_key,
                base_url,
            } => show(lat, lon, api_key, base_url).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    config.latitude = Some(
        CustomType::<f64>::new("Latitude:")
            .with_default(config.latitude())
            .prompt()
            .context("Failed to read latitude")?,
    );
    config.longitude = Some(
        CustomType::<f64>::new("Longitude:")
            .with_default(config.longitude())
            .prompt()
            .context("Failed to read longitude")?,
    );

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(
    lat: Option<f64>,
    lon: Option<f64>,
    api_key: Option<String>,
    base_url: Option<String>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if base_url.is_some() {
        config.base_url = base_url;
    }
    if lat.is_some() {
        config.latitude = lat;
    }
    if lon.is_some() {
        config.longitude = lon;
    }

    let api_key = match api_key {
        Some(key) => key,
        None => config.require_api_key()?.to_owned(),
    };
    let params = config.request_parameters(api_key);
    let fetcher = WeatherFetcher::with_timeout(config.timeout())?;

    // The main thread owns the display; the fetch runs on the runtime's workers.
    let (ui, handle) = UiQueue::<WeatherDisplay>::new();
    let mut display = WeatherDisplay::default();

    let task = fetcher.fetch(params, &handle, |view, result| view.apply(result));
    drop(handle);

    deliver(ui, task, &mut display).await?;

    if let Some(err) = display.last_error.take() {
        return Err(err).context("Could not fetch the current weather");
    }

    println!("{display}");
    Ok(())
}

/// Run queued updates until the fetch task lets go of the queue, then make
/// sure the task itself finished cleanly.
async fn deliver(
    mut ui: UiQueue<WeatherDisplay>,
    task: JoinHandle<()>,
    display: &mut WeatherDisplay,
) -> anyhow::Result<()> {
    while ui.dispatch_next(display).await {}

    task.await.context("Weather fetch task did not complete")?;
    Ok(())
}
