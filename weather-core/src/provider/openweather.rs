use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::ProviderConfig,
    error::UpstreamError,
    model::{WeatherQuery, WeatherSummary},
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Client for the OpenWeatherMap current-weather endpoint, always in metric units.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider").field("endpoint", &self.endpoint).finish()
    }
}

impl OpenWeatherProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, UpstreamError> {
        let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            endpoint: format!("{}{CURRENT_WEATHER_PATH}", config.base_url.trim_end_matches('/')),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherSummary, UpstreamError> {
        tracing::debug!(city, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        tracing::debug!(city, status = status.as_u16(), "weather provider responded");

        if !status.is_success() {
            return Err(UpstreamError::status(status.as_u16(), &body));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        parsed.into_summary()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn into_summary(self) -> Result<WeatherSummary, UpstreamError> {
        let condition = self.weather.into_iter().next().ok_or(UpstreamError::NoConditions)?;

        Ok(WeatherSummary {
            city: self.name,
            temperature: self.main.temp,
            description: condition.description,
            icon: condition.icon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherSummary, UpstreamError> {
        self.fetch_current(query.city()).await
    }
}
