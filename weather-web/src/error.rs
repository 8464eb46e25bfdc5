use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Application-level error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Weather(#[from] weather_core::Error),

    #[error("Template error: {0}")]
    Render(#[from] tera::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Weather(err) if err.is_upstream() => {
                tracing::error!(error = %err, "Weather provider error");
                (
                    StatusCode::BAD_GATEWAY,
                    "The weather service is unavailable right now.",
                )
            }
            AppError::Weather(err) => {
                tracing::error!(error = %err, "Local weather app error");
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred.")
            }
            AppError::Render(err) => {
                tracing::error!(error = ?err, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred.")
            }
        };

        let body = format!(
            "<!DOCTYPE html><html><head><title>Weather App</title></head>\
             <body><p>{message}</p><p><a href=\"/\">Back</a></p></body></html>"
        );

        (status, Html(body)).into_response()
    }
}
