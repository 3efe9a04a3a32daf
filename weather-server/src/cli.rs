use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use tokio::net::TcpListener;
use weather_core::{Config, Profile, WeatherService};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "City weather lookup service")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen address, overrides `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Interactively write the config file.
    Configure,

    /// Look up one city and print the JSON report.
    Show {
        /// City name passed to the geocoder.
        city: String,

        /// Error wording and humidity placeholder: "function" or "server".
        #[arg(long, default_value = "function", value_parser = parse_profile)]
        profile: Profile,
    },
}

fn parse_profile(value: &str) -> anyhow::Result<Profile> {
    Profile::try_from(value)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { config: path, command } = self;
        let config = load_config(path.as_deref())?;

        match command {
            Command::Serve { bind } => serve(config, bind).await,
            Command::Configure => configure(config, path.as_deref()),
            Command::Show { city, profile } => {
                show(&config, &city, profile, &mut std::io::stdout()).await
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::load_from(p),
        None => Config::load(),
    }
}

async fn serve(config: Config, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let service = WeatherService::from_config(&config)?;

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    weather_server::serve(listener, service).await.context("HTTP server failed")
}

fn configure(mut config: Config, path: Option<&Path>) -> anyhow::Result<()> {
    let bind = Text::new("Bind address:")
        .with_default(&config.server.bind)
        .prompt()?;
    let geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.providers.geocoding_url)
        .prompt()?;
    let forecast_url = Text::new("Forecast endpoint:")
        .with_default(&config.providers.forecast_url)
        .prompt()?;

    let timeout = CustomType::<u64>::new("Outbound request timeout in seconds (0 = none):")
        .with_default(config.providers.timeout_secs.unwrap_or(0))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    config.server.bind = bind;
    config.providers.geocoding_url = geocoding_url;
    config.providers.forecast_url = forecast_url;
    config.providers.timeout_secs = (timeout > 0).then_some(timeout);

    let saved_to = match path {
        Some(p) => {
            config.save_to(p)?;
            p.to_path_buf()
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}

/// Print the report (or the error body a route would send) to `out`.
async fn show(
    config: &Config,
    city: &str,
    profile: Profile,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let service = WeatherService::from_config(config)?;

    match service.report(city, profile).await {
        Ok(report) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            Ok(())
        }
        Err(e) => {
            let body = serde_json::json!({ "error": profile.client_message(&e) });
            writeln!(out, "{body}")?;
            bail!("lookup for '{city}' failed with status {}: {e}", e.status_code())
        }
    }
}
