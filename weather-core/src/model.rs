use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// A validated lookup request. The city is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    /// Build a query from an optional raw city parameter.
    ///
    /// The city is passed through verbatim; only absence or the empty string
    /// is rejected.
    pub fn new(city: Option<String>) -> Result<Self, QueryError> {
        match city {
            Some(city) if !city.is_empty() => Ok(Self { city }),
            _ => Err(QueryError::MissingCity),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Simplified current-weather payload returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub city: String,
    /// Degrees Celsius. Always serialized as a float, so an upstream `-3` becomes `-3.0`.
    pub temperature: f64,
    pub description: String,
    /// Provider-defined icon code, e.g. `01d`.
    pub icon: String,
}
