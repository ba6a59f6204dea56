//! HTTP surface of the weather proxy.
//!
//! Exposes a single route, `GET /weather?city=<name>`, which forwards the
//! city to the configured [`WeatherProvider`](weather_core::WeatherProvider)
//! and returns a simplified JSON summary.

pub mod app;
pub mod error;
pub mod handler;
pub mod logging;

pub use app::{AppState, router, serve};
pub use error::ApiError;
