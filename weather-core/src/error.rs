/// Errors produced by the weather provider, the city store and the tracking workflow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The geocoding provider returned no match for the queried name.
    #[error("City '{0}' not found")]
    CityNotFound(String),

    /// A city with this name is already stored.
    #[error("City '{0}' has already been added")]
    DuplicateCity(String),

    /// The local HTTP client could not be set up.
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to OpenWeather ({endpoint})")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    UpstreamStatus {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed OpenWeather {endpoint} response: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },

    #[error("City store error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    /// True for errors caused by the upstream weather service rather than by
    /// the user's input or local storage.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. } | Error::UpstreamStatus { .. } | Error::MalformedResponse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
