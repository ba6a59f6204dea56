use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use weather_core::{WeatherQuery, WeatherSummary};

use crate::{app::AppState, error::ApiError};

/// Raw query parameters of `GET /weather`.
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub city: Option<String>,
}

/// `GET /weather?city=<name>`
///
/// An unparsable query string counts as a missing city.
pub async fn weather(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<Json<WeatherSummary>, ApiError> {
    let city = params.ok().and_then(|Query(params)| params.city);
    let query = WeatherQuery::new(city)?;

    let summary = state.provider.current_weather(&query).await.inspect_err(|err| {
        tracing::error!(city = query.city(), error = %err, "Error retrieving weather data");
    })?;

    tracing::debug!(city = %summary.city, temperature = summary.temperature, "weather lookup succeeded");

    Ok(Json(summary))
}
