use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    config::OpenWeatherConfig,
    model::{WeatherObservation, WeatherReport, WeatherRequest},
};

use super::{FetchError, WeatherProvider, truncate_body};

const PROVIDER_NAME: &str = "openweather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            api_key: config.api_key,
            base_url: config.base_url,
            http,
        })
    }

    fn current_url(&self) -> String {
        format!("{}/data/2.5/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn current(&self, request: &WeatherRequest) -> Result<WeatherReport, FetchError> {
        let url = self.current_url();
        debug!(%url, city = %request.city, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", request.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        match status {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(FetchError::CityNotFound(request.city.clone())),
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
            _ => {
                return Err(FetchError::Status {
                    status,
                    body: truncate_body(&body),
                });
            }
        }

        let report = parse_current(&body)?;
        info!(
            location = %report.location_name,
            condition = %report.observation.condition,
            "fetched current weather"
        );
        Ok(report)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

/// Turn a "current weather" payload into a report.
fn parse_current(body: &str) -> Result<WeatherReport, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or(FetchError::MissingField("weather[0].description"))?;

    let observed_at =
        DateTime::<Utc>::from_timestamp(parsed.dt, 0).ok_or(FetchError::InvalidTimestamp(parsed.dt))?;

    let location_name = match parsed.sys.country.as_deref() {
        Some(country) if !country.is_empty() => format!("{}, {}", parsed.name, country),
        _ => parsed.name,
    };

    Ok(WeatherReport {
        provider: PROVIDER_NAME.to_string(),
        location_name,
        observation: WeatherObservation {
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            condition,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            is_daytime: is_daytime(parsed.dt, parsed.sys.sunrise, parsed.sys.sunset),
        },
        observed_at,
    })
}

fn is_daytime(now: i64, sunrise: i64, sunset: i64) -> bool {
    sunrise < now && now < sunset
}
