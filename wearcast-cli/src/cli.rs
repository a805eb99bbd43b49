use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use std::path::{Path, PathBuf};
use wearcast_core::{
    Config, WeatherObservation, WeatherProvider, WeatherRequest, fix_ignore_file, generate,
    provider_from_config,
};

use crate::output::{self, OutputFormat};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wearcast", version, about = "Current weather with outfit advice")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read and write this config file instead of the platform default.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// OpenWeather API key; takes precedence over the configured one.
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default city.
    Configure,

    /// Show current weather and outfit advice for a city.
    Show {
        /// City name; falls back to the configured default, then a prompt.
        city: Option<String>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Get outfit advice for explicit conditions, without calling any service.
    Advise {
        /// Air temperature in °C.
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,

        /// Perceived temperature in °C; defaults to --temp.
        #[arg(long, allow_negative_numbers = true)]
        feels_like: Option<f64>,

        /// Weather description, e.g. "light rain".
        #[arg(long, default_value = "")]
        condition: String,

        /// Relative humidity in percent.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
        humidity: u8,

        /// Wind speed in m/s.
        #[arg(long, default_value_t = 0.0)]
        wind: f64,

        /// Treat the observation as taken after sunset.
        #[arg(long)]
        night: bool,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Make sure `.gitignore` exists and lists `.env`.
    FixIgnore {
        /// Directory to check.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { config: config_path, api_key, command, .. } = self;

        match command {
            Command::Configure => {
                let mut config = load_config(config_path.as_deref())?;
                configure_interactively(&mut config)?;
                let saved_to = save_config(&config, config_path.as_deref())?;
                println!("Configuration saved to {}", saved_to.display());
            }
            Command::Show { city, json } => {
                let config = load_config(config_path.as_deref())?;
                let city = resolve_city(city, &config)?;
                let provider = provider_from_config(&config, api_key.as_deref())?;
                let rendered =
                    show_weather(provider.as_ref(), &city, OutputFormat::from_json_flag(json))
                        .await?;
                print!("{rendered}");
            }
            Command::Advise { temp, feels_like, condition, humidity, wind, night, json } => {
                let observation = WeatherObservation {
                    temperature_c: temp,
                    feels_like_c: feels_like.unwrap_or(temp),
                    condition,
                    humidity_pct: humidity,
                    wind_speed_mps: wind,
                    is_daytime: !night,
                };
                let advice = generate(&observation);
                print!("{}", output::render(None, &advice, OutputFormat::from_json_flag(json))?);
            }
            Command::FixIgnore { dir } => {
                let fix = fix_ignore_file(&dir)?;
                println!("{fix}");
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn save_config(config: &Config, path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => {
            config.save_to(path)?;
            Ok(path.to_path_buf())
        }
        None => config.save(),
    }
}

fn configure_interactively(config: &mut Config) -> anyhow::Result<()> {
    let mut key_prompt = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked);
    if config.has_api_key() {
        key_prompt = key_prompt.with_help_message("Leave empty to keep the current key");
    }

    let key = key_prompt.prompt()?;
    if !key.trim().is_empty() {
        config.set_api_key(key.trim());
    } else if !config.has_api_key() {
        bail!("An API key is required. Get one at https://openweathermap.org/api");
    }

    let mut city_prompt = Text::new("Default city (optional):");
    if let Some(current) = config.default_city.as_deref() {
        city_prompt = city_prompt.with_default(current);
    }
    let city = city_prompt.prompt_skippable()?;
    config.set_default_city(city);

    Ok(())
}

/// Command-line argument first, then the configured default, then ask.
fn resolve_city(arg: Option<String>, config: &Config) -> anyhow::Result<String> {
    let from_args = arg
        .or_else(|| config.default_city.clone())
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    if let Some(city) = from_args {
        return Ok(city);
    }

    let answer = Text::new("Enter city name:").prompt()?;
    let city = answer.trim();
    if city.is_empty() {
        bail!("No city given.");
    }
    Ok(city.to_string())
}

async fn show_weather(
    provider: &dyn WeatherProvider,
    city: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    tracing::info!(provider = provider.name(), %city, "fetching weather");

    let report = provider
        .current(&WeatherRequest::new(city))
        .await
        .with_context(|| format!("Failed to fetch weather for '{city}'"))?;

    let advice = generate(&report.observation);
    output::render(Some(&report), &advice, format)
}
