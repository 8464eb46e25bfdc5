use std::sync::Arc;

use crate::{
    error::{Error, Result},
    model::{City, WeatherSnapshot},
    provider::WeatherProvider,
    store::CityStore,
};

/// Result of submitting a city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(City),
    AlreadyAdded,
    NotFound,
    Blank,
}

/// Application context tying the city list to a weather provider.
#[derive(Debug, Clone)]
pub struct CityTracker {
    store: Arc<CityStore>,
    provider: Arc<dyn WeatherProvider>,
}

impl CityTracker {
    pub fn new(store: Arc<CityStore>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &CityStore {
        &self.store
    }

    /// Validate `name` against the provider and store it if it resolves.
    ///
    /// Surrounding whitespace is trimmed, so " London" and "London" are the same city.
    /// Upstream failures other than "not found" are returned as errors.
    pub async fn add_city(&self, name: &str) -> Result<AddOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(AddOutcome::Blank);
        }

        if self.store.find_by_name(name)?.is_some() {
            tracing::debug!(city = name, "City already tracked");
            return Ok(AddOutcome::AlreadyAdded);
        }

        // The snapshot only proves the name resolves; the list view re-fetches.
        match self.provider.current_weather(name).await {
            Ok(_) => {}
            Err(Error::CityNotFound(_)) => {
                tracing::info!(city = name, "City not found by provider");
                return Ok(AddOutcome::NotFound);
            }
            Err(e) => return Err(e),
        }

        match self.store.insert(name) {
            Ok(city) => {
                tracing::info!(city = %city.name, id = city.id, "City added");
                Ok(AddOutcome::Added(city))
            }
            Err(Error::DuplicateCity(_)) => Ok(AddOutcome::AlreadyAdded),
            Err(e) => Err(e),
        }
    }

    /// Fresh weather for every stored city, in store order.
    ///
    /// Cities that no longer resolve are skipped; any other provider failure
    /// aborts the whole listing.
    pub async fn snapshots(&self) -> Result<Vec<WeatherSnapshot>> {
        let cities = self.store.list_all()?;
        let mut snapshots = Vec::with_capacity(cities.len());

        for city in cities {
            match self.provider.current_weather(&city.name).await {
                Ok(snapshot) => snapshots.push(snapshot.with_id(city.id)),
                Err(Error::CityNotFound(_)) => {
                    tracing::warn!(city = %city.name, id = city.id, "Stored city no longer resolves, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(snapshots)
    }

    pub fn remove_city(&self, id: i64) -> Result<bool> {
        let removed = self.store.delete_by_id(id)?;
        if removed {
            tracing::info!(id, "City removed");
        }
        Ok(removed)
    }
}
