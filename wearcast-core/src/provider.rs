use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

use crate::{Config, WeatherReport, WeatherRequest, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// Failures of the weather-API collaborator. The advice generator never
/// sees any of these; they are surfaced before it runs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("city '{0}' was not found")]
    CityNotFound(String),

    #[error("the weather service rejected the API key (HTTP 401)")]
    Unauthorized,

    #[error("weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather response is missing '{0}'")]
    MissingField(&'static str),

    #[error("weather response has an invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Short provider name used in reports and logs.
    fn name(&self) -> &'static str;

    async fn current(&self, request: &WeatherRequest) -> Result<WeatherReport, FetchError>;
}

/// Construct the provider from config; `api_key_override` comes from the
/// command line or environment.
pub fn provider_from_config(
    config: &Config,
    api_key_override: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let settings = config.openweather(api_key_override)?;
    let provider = OpenWeatherProvider::new(settings)?;
    Ok(Box::new(provider))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
