//! Rule-based outfit advice derived from a single [`WeatherObservation`].
//!
//! Six independent rule categories are evaluated in a fixed order and each
//! contributes at most one [`Advisory`]. The result keeps the records so
//! callers can filter or restyle them; `Display` renders the classic
//! newline-terminated text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::WeatherObservation;

const CHILLY_BELOW_C: f64 = 20.0;
const HOT_FROM_C: f64 = 30.0;
const FEELS_HOTTER_DELTA_C: f64 = 3.0;
// roughly 20 km/h
const WINDY_ABOVE_MPS: f64 = 6.0;
const HUMID_ABOVE_PCT: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceCategory {
    Temperature,
    HeatIndex,
    Condition,
    Daylight,
    Wind,
    Humidity,
}

impl AdviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceCategory::Temperature => "temperature",
            AdviceCategory::HeatIndex => "heat_index",
            AdviceCategory::Condition => "condition",
            AdviceCategory::Daylight => "daylight",
            AdviceCategory::Wind => "wind",
            AdviceCategory::Humidity => "humidity",
        }
    }

    /// Icon shown in front of the advisory on a terminal.
    pub fn icon(&self) -> &'static str {
        match self {
            AdviceCategory::Temperature => "🌡️",
            AdviceCategory::HeatIndex => "🥵",
            AdviceCategory::Condition => "🌦️",
            AdviceCategory::Daylight => "😎",
            AdviceCategory::Wind => "💨",
            AdviceCategory::Humidity => "💧",
        }
    }

    pub const fn all() -> &'static [AdviceCategory] {
        &[
            AdviceCategory::Temperature,
            AdviceCategory::HeatIndex,
            AdviceCategory::Condition,
            AdviceCategory::Daylight,
            AdviceCategory::Wind,
            AdviceCategory::Humidity,
        ]
    }
}

impl fmt::Display for AdviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub category: AdviceCategory,
    pub message: String,
}

impl Advisory {
    fn new(category: AdviceCategory, message: impl Into<String>) -> Self {
        Self { category, message: message.into() }
    }
}

/// Ordered advisories for one observation, at most one per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdviceReport {
    advisories: Vec<Advisory>,
}

impl AdviceReport {
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn len(&self) -> usize {
        self.advisories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = AdviceCategory> + '_ {
        self.advisories.iter().map(|a| a.category)
    }

    pub fn find(&self, category: AdviceCategory) -> Option<&Advisory> {
        self.advisories.iter().find(|a| a.category == category)
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    fn push(&mut self, advisory: Option<Advisory>) {
        self.advisories.extend(advisory);
    }
}

impl fmt::Display for AdviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for advisory in &self.advisories {
            writeln!(f, "{}", advisory.message)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AdviceReport {
    type Item = &'a Advisory;
    type IntoIter = std::slice::Iter<'a, Advisory>;

    fn into_iter(self) -> Self::IntoIter {
        self.advisories.iter()
    }
}

/// Map an observation to its outfit advice. Pure and total.
pub fn generate(observation: &WeatherObservation) -> AdviceReport {
    let condition = observation.condition.to_lowercase();
    let mut report = AdviceReport::default();

    report.push(Some(temperature_band(observation.temperature_c)));
    report.push(heat_index(observation.temperature_c, observation.feels_like_c));
    report.push(sky_condition(&condition));
    report.push(daylight(&condition, observation.is_daytime));
    report.push(wind(observation.wind_speed_mps));
    report.push(humidity(observation.humidity_pct));

    report
}

fn temperature_band(temp_c: f64) -> Advisory {
    // NaN falls through to the last band.
    let message = if temp_c < CHILLY_BELOW_C {
        "It's chilly. Bring a light jacket or sweater."
    } else if temp_c < HOT_FROM_C {
        "It's pleasant weather. Normal cotton clothes are perfect."
    } else {
        "It's hot! Wear breathable clothes and stay hydrated."
    };
    Advisory::new(AdviceCategory::Temperature, message)
}

fn heat_index(temp_c: f64, feels_like_c: f64) -> Option<Advisory> {
    (feels_like_c - temp_c > FEELS_HOTTER_DELTA_C).then(|| {
        Advisory::new(
            AdviceCategory::HeatIndex,
            format!("CAUTION: It feels much hotter ({feels_like_c:.1}°C) due to humidity!"),
        )
    })
}

fn sky_condition(condition: &str) -> Option<Advisory> {
    let message = if contains_any(condition, &["thunderstorm"]) {
        "THUNDERSTORM WARNING! Stay indoors and unplug electronics."
    } else if contains_any(condition, &["rain", "drizzle"]) {
        "It's raining. Take an umbrella and wear water-resistant shoes."
    } else if contains_any(condition, &["mist", "haze", "fog"]) {
        "Visibility is low (Mist/Haze). Drive carefully."
    } else if contains_any(condition, &["overcast"]) {
        "Total cloud cover. The lighting is flat/gloomy."
    } else {
        return None;
    };
    Some(Advisory::new(AdviceCategory::Condition, message))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(*needle))
}

fn daylight(condition: &str, is_daytime: bool) -> Option<Advisory> {
    if !condition.contains("clear") {
        return None;
    }
    let message = if is_daytime {
        "It's bright and sunny. Don't forget sunglasses!"
    } else {
        "It's a clear night. Good for stargazing."
    };
    Some(Advisory::new(AdviceCategory::Daylight, message))
}

fn wind(speed_mps: f64) -> Option<Advisory> {
    (speed_mps > WINDY_ABOVE_MPS).then(|| {
        Advisory::new(
            AdviceCategory::Wind,
            "It's breezy/windy. Watch your hair and secure loose items.",
        )
    })
}

fn humidity(pct: u8) -> Option<Advisory> {
    (pct > HUMID_ABOVE_PCT).then(|| {
        Advisory::new(
            AdviceCategory::Humidity,
            format!("High Humidity ({pct}%). Expect frizzy hair and sweat that won't dry."),
        )
    })
}
