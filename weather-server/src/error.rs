use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use weather_core::{QueryError, UpstreamError};

/// Body returned for every upstream or processing failure.
pub const UPSTREAM_FAILURE_BODY: &str = "Error retrieving weather data";

/// Failure of the weather route, mapped to a status code and a fixed body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BadRequest(#[from] QueryError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(err) => (status, err.to_string()).into_response(),
            // Upstream detail stays in the logs.
            ApiError::Upstream(_) => (status, UPSTREAM_FAILURE_BODY).into_response(),
        }
    }
}
