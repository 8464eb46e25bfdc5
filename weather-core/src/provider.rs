use crate::{Config, WeatherSnapshot, error::Result, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of live weather for a free-text city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fails with [`crate::Error::CityNotFound`] when the name does not resolve.
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot>;
}

/// Construct the OpenWeather provider from config (API key, base URL, timeout).
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::with_options(
        api_key,
        config.api_base_url(),
        config.request_timeout(),
    )?;

    Ok(provider)
}
