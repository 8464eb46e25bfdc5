//! Web front-end for the weather app.
//!
//! Serves the city list page, the add form and the delete action on top of
//! [`weather_core::CityTracker`].

pub mod app;
pub mod error;
pub mod page;
pub mod routes;

pub use app::{AppState, router};
