use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    error::{Error, Result},
    model::{Coordinates, TimeOfDay, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// Build a provider for `base_url` with a bounded per-request timeout.
    pub fn with_options(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Resolve a free-text city name to the coordinates of its first match.
    pub async fn geocode(&self, city: &str) -> Result<Coordinates> {
        let matches: Vec<OwGeoMatch> = self
            .get_json(
                "geocoding",
                GEOCODING_PATH,
                &[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())],
            )
            .await?;

        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| Error::CityNotFound(city.to_string()))?;

        Ok(Coordinates { lat: first.lat, lon: first.lon })
    }

    pub async fn fetch_current(&self, coords: Coordinates) -> Result<WeatherSnapshot> {
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();

        let parsed: OwCurrentResponse = self
            .get_json(
                "current weather",
                CURRENT_WEATHER_PATH,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        let observed = DateTime::<Utc>::from_timestamp(parsed.dt, 0).ok_or_else(|| {
            Error::MalformedResponse {
                endpoint: "current weather",
                reason: format!("timestamp {} is out of range", parsed.dt),
            }
        })?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| Error::MalformedResponse {
                endpoint: "current weather",
                reason: "empty weather list".to_string(),
            })?;

        let hour = observed.hour();

        Ok(WeatherSnapshot {
            id: None,
            hour,
            time_of_day: TimeOfDay::from_hour(hour),
            temperature_c: parsed.main.temp,
            city_name: parsed.name,
            description,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(endpoint, %url, "OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| Error::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
            endpoint,
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoMatch {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let coords = self.geocode(city).await?;
        self.fetch_current(coords).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
