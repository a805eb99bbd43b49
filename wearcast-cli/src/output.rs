//! Human-friendly and JSON rendering. Everything renders into a `String`;
//! printing is left to the caller.

use serde::Serialize;
use std::fmt::Write;
use wearcast_core::{AdviceReport, WeatherReport};

const RULE_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json { OutputFormat::Json } else { OutputFormat::Text }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a WeatherReport>,
    advice: &'a AdviceReport,
}

pub fn render(
    report: Option<&WeatherReport>,
    advice: &AdviceReport,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&JsonOutput { report, advice })?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            if let Some(report) = report {
                out.push_str(&render_report(report));
            }
            out.push_str(&render_advice(advice));
            Ok(out)
        }
    }
}

pub fn render_report(report: &WeatherReport) -> String {
    let obs = &report.observation;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "--- WEATHER REPORT FOR {} ---", report.location_name.to_uppercase());
    let _ = writeln!(
        out,
        "Temperature: {:.1}°C (Feels like {:.1}°C)",
        obs.temperature_c, obs.feels_like_c
    );
    let _ = writeln!(out, "Condition:   {}", capitalize(&obs.condition));
    let _ = writeln!(out, "Humidity:    {}%", obs.humidity_pct);
    let _ = writeln!(out, "Wind Speed:  {:.1} m/s", obs.wind_speed_mps);
    let _ = writeln!(
        out,
        "Observed:    {} UTC ({})",
        report.observed_at.format("%Y-%m-%d %H:%M"),
        if obs.is_daytime { "day" } else { "night" }
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    out
}

pub fn render_advice(advice: &AdviceReport) -> String {
    let mut out = String::from("💡 SMART OUTFIT ADVICE:\n");
    for advisory in advice {
        let _ = writeln!(out, "{} {}", advisory.category.icon(), advisory.message);
    }
    out
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wearcast_core::{WeatherObservation, generate};

    fn sample_report() -> WeatherReport {
        WeatherReport {
            provider: "openweather".into(),
            location_name: "Colombo, LK".into(),
            observation: WeatherObservation {
                temperature_c: 32.0,
                feels_like_c: 37.0,
                condition: "heavy THUNDERSTORM".into(),
                humidity_pct: 85,
                wind_speed_mps: 7.0,
                is_daytime: true,
            },
            observed_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn capitalize_matches_sentence_case() {
        assert_eq!(capitalize("heavy THUNDERSTORM"), "Heavy thunderstorm");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn report_block_lists_every_field() {
        let text = render_report(&sample_report());

        assert!(text.starts_with("--- WEATHER REPORT FOR COLOMBO, LK ---\n"));
        assert!(text.contains("Temperature: 32.0°C (Feels like 37.0°C)"));
        assert!(text.contains("Condition:   Heavy thunderstorm"));
        assert!(text.contains("Humidity:    85%"));
        assert!(text.contains("Wind Speed:  7.0 m/s"));
        assert!(text.contains("Observed:    2024-03-01 09:30 UTC (day)"));
        assert!(text.ends_with(&format!("{}\n", "-".repeat(RULE_WIDTH))));
    }

    #[test]
    fn advice_lines_carry_category_icons() {
        let report = sample_report();
        let advice = generate(&report.observation);
        let text = render_advice(&advice);

        assert_eq!(text.lines().count(), 1 + advice.len());
        assert!(text.contains("💨 It's breezy/windy."));
        assert!(text.contains("💧 High Humidity (85%)."));
    }

    #[test]
    fn text_render_puts_report_before_advice() {
        let report = sample_report();
        let advice = generate(&report.observation);
        let text = render(Some(&report), &advice, OutputFormat::Text).expect("render");

        let report_at = text.find("WEATHER REPORT").expect("report");
        let advice_at = text.find("SMART OUTFIT ADVICE").expect("advice");
        assert!(report_at < advice_at);
    }

    #[test]
    fn json_render_without_report_has_only_advice() {
        let advice = generate(&sample_report().observation);
        let text = render(None, &advice, OutputFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");

        assert!(value.get("report").is_none());
        assert_eq!(value["advice"].as_array().map(Vec::len), Some(advice.len()));
        assert_eq!(value["advice"][0]["category"], "temperature");
    }

    #[test]
    fn json_render_includes_observation() {
        let report = sample_report();
        let advice = generate(&report.observation);
        let text = render(Some(&report), &advice, OutputFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");

        assert_eq!(value["report"]["location_name"], "Colombo, LK");
        assert_eq!(value["report"]["observation"]["humidity_pct"], 85);
    }
}
