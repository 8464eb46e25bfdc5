//! Core library for the weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - The SQLite-backed city list
//! - The add/list/remove workflow shared by the web front-end and the CLI

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;
pub mod tracker;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{City, Coordinates, TimeOfDay, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use store::CityStore;
pub use tracker::{AddOutcome, CityTracker};
