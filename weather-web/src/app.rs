use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use weather_core::CityTracker;

use crate::{page::Pages, routes};

/// Shared state available to all handlers via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub tracker: CityTracker,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(tracker: CityTracker) -> Result<Self, tera::Error> {
        Ok(Self {
            tracker,
            pages: Arc::new(Pages::new()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::add_city))
        .route("/delete/{id}", post(routes::delete_city))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
