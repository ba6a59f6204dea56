//! Core library for the weather proxy.
//!
//! This crate defines:
//! - Configuration loading (file, environment)
//! - Shared domain models (query, summary) and typed errors
//! - Abstraction over the upstream weather provider, with an OpenWeatherMap client
//!
//! It is used by `weather-server`, but carries no HTTP-server concerns itself.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::{QueryError, UpstreamError};
pub use model::{WeatherQuery, WeatherSummary};
pub use provider::{OpenWeatherProvider, WeatherProvider};
