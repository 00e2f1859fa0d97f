use crate::{Config, WeatherReading, style::StyleBucket};

/// Render-ready strings for one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingView {
    pub heading: String,
    pub temperature: String,
    pub humidity: String,
    pub description: String,
    pub wind: String,
    pub icon_url: String,
    pub style: StyleBucket,
}

impl ReadingView {
    pub fn new(reading: &WeatherReading, config: &Config) -> Self {
        Self {
            heading: format!("Clima en {}", reading.location_name),
            temperature: format_temperature(reading.temperature),
            humidity: format!("{} %", reading.humidity),
            description: capitalize(&reading.description),
            wind: format!("{:.1} {}", reading.wind_speed, config.units.wind_unit()),
            icon_url: reading.icon.url(&config.icon_base_url),
            style: StyleBucket::for_reading(Some(reading)),
        }
    }
}

/// Whole degrees with a degree sign, e.g. `21.4` -> `21°`.
pub fn format_temperature(value: f64) -> String {
    let rounded = value.round();
    // avoid "-0°"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.0}°")
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
