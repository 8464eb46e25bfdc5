use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use weather_core::{CityStore, CityTracker, Config, WeatherProvider, provider_from_config};
use weather_web::{AppState, router};

pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Track current weather for a list of cities",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Address to serve on, as `host:port`.
    pub addr: Option<String>,

    /// SQLite database file; defaults to the configured path.
    #[arg(long)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Print current weather for a city without storing it.
    Show {
        /// City name.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show(&city).await,
            None => serve(self.addr.as_deref().unwrap_or(DEFAULT_ADDR), self.database).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_toggle_enabled()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    config.set_api_key(api_key.to_string());
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let snapshot = provider.current_weather(city).await?;

    println!("{}", snapshot.city_name);
    println!("  {:.1}°C, {}", snapshot.temperature_c, snapshot.description);
    println!("  {:02}:00 UTC ({})", snapshot.hour, snapshot.time_of_day);

    Ok(())
}

async fn serve(addr: &str, database: Option<PathBuf>) -> anyhow::Result<()> {
    let (host, port) = parse_bind_addr(addr)?;

    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let db_path = match database {
        Some(path) => path,
        None => config.database_path()?,
    };
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;
    }

    let store = CityStore::open(&db_path)
        .with_context(|| format!("Failed to open city database: {}", db_path.display()))?;
    tracing::info!(path = %db_path.display(), "City database opened");

    let tracker = CityTracker::new(Arc::new(store), Arc::new(provider));
    let state = AppState::new(tracker).context("Failed to compile page templates")?;

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Split `host:port` on the last colon; IPv6 hosts may be bracketed.
pub fn parse_bind_addr(addr: &str) -> anyhow::Result<(String, u16)> {
    let (host, port) = addr
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("Expected address as host:port, got '{addr}'"))?;

    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(anyhow!("Missing host in '{addr}'"));
    }

    let port: u16 = port
        .parse()
        .with_context(|| format!("Invalid port '{port}' in '{addr}'"))?;

    Ok((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let (host, port) = parse_bind_addr("0.0.0.0:8080").unwrap();
        assert_eq!(host, "0.0.0.0");
        assert_eq!(port, 8080);
    }

    #[test]
    fn parses_hostname() {
        assert_eq!(parse_bind_addr("localhost:3000").unwrap(), ("localhost".to_string(), 3000));
    }

    #[test]
    fn strips_ipv6_brackets() {
        assert_eq!(parse_bind_addr("[::1]:5000").unwrap(), ("::1".to_string(), 5000));
    }

    #[test]
    fn rejects_missing_port() {
        let err = parse_bind_addr("localhost").unwrap_err();
        assert!(err.to_string().contains("host:port"));
    }

    #[test]
    fn rejects_bad_port() {
        let err = parse_bind_addr("localhost:http").unwrap_err();
        assert!(err.to_string().contains("Invalid port"));
    }

    #[test]
    fn rejects_empty_host() {
        assert!(parse_bind_addr(":5000").is_err());
    }

    #[test]
    fn bare_address_serves() {
        let cli = Cli::try_parse_from(["weather", "0.0.0.0:8000"]).unwrap();
        assert_eq!(cli.addr.as_deref(), Some("0.0.0.0:8000"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_subcommand_parses_city() {
        let cli = Cli::try_parse_from(["weather", "show", "London"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show { ref city }) if city == "London"));
    }

    #[test]
    fn default_addr_is_valid() {
        assert_eq!(parse_bind_addr(DEFAULT_ADDR).unwrap().1, 5000);
    }
}
