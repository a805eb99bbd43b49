//! Core library for the `wearcast` CLI.
//!
//! This crate defines:
//! - The outfit advice generator (pure, no I/O)
//! - Shared domain models (observations, reports)
//! - Configuration & credentials handling
//! - The weather-provider abstraction and its OpenWeather client
//! - A small helper that keeps `.gitignore` covering the `.env` file
//!
//! It is used by `wearcast-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod config;
pub mod ignore_file;
pub mod model;
pub mod provider;

pub use advice::{AdviceCategory, AdviceReport, Advisory, generate};
pub use config::{Config, OpenWeatherConfig};
pub use ignore_file::{IgnoreFix, fix_ignore_file};
pub use model::{WeatherObservation, WeatherReport, WeatherRequest};
pub use provider::{FetchError, WeatherProvider, provider_from_config};
