use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the caller asks a provider for.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
}

impl WeatherRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// A single weather observation, the only input of the advice generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    /// Free-text description such as "light rain".
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// True when the observation falls between sunrise and sunset.
    pub is_daytime: bool,
}

/// Observation plus the metadata needed to present it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub provider: String,
    pub location_name: String,
    pub observation: WeatherObservation,
    pub observed_at: DateTime<Utc>,
}
