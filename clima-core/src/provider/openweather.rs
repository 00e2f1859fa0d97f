use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::{
    Config, Query, Suggestion, WeatherError, WeatherReading, config::Units, model::IconCode,
};

use super::WeatherProvider;

const WEATHER_PATH: &str = "/data/2.5/weather";
const GEOCODING_PATH: &str = "/geo/1.0/direct";
const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    units: Units,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?.to_owned();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            units: config.units,
            lang: config.lang.clone(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn weather_params(&self, query: &Query) -> Vec<(&'static str, String)> {
        let mut params = match query {
            Query::City(name) => vec![("q", name.trim().to_string())],
            Query::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };

        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.as_str().to_string()));
        params.push(("lang", self.lang.clone()));
        params
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<(u16, String), WeatherError> {
        let res = self.http.get(self.url(path)).query(params).send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        tracing::debug!(path, status, "Received OpenWeather response");
        Ok((status, body))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &Query) -> Result<WeatherReading, WeatherError> {
        if matches!(query, Query::City(name) if name.trim().is_empty()) {
            return Err(WeatherError::Validation);
        }

        tracing::debug!(query = %query, units = %self.units, "Fetching current weather");

        let (status, body) = self.get(WEATHER_PATH, &self.weather_params(query)).await?;
        let reading = parse_current(status, &body)?;

        tracing::info!(
            location = %reading.location_name,
            temp = reading.temperature,
            "Weather data fetched"
        );
        Ok(reading)
    }

    async fn suggest(&self, text: &str, limit: usize) -> Result<Vec<Suggestion>, WeatherError> {
        let params = [
            ("q", text.trim().to_string()),
            ("limit", limit.to_string()),
            ("appid", self.api_key.clone()),
        ];

        let (status, body) = self.get(GEOCODING_PATH, &params).await?;
        parse_suggestions(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

/// Classify a weather response body.
///
/// The embedded `cod` decides, not the HTTP status: it may arrive as a
/// number or a string, and only 200 marks a usable payload.
pub fn parse_current(status: u16, body: &str) -> Result<WeatherReading, WeatherError> {
    let value = decode(status, body)?;
    check_code(status, &value)?;

    let parsed: OwCurrentResponse = serde_json::from_value(value)?;
    let (condition, description, icon) = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description, w.icon))
        .unwrap_or_default();

    Ok(WeatherReading {
        location_name: parsed.name,
        temperature: parsed.main.temp,
        humidity: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        condition,
        description,
        icon: IconCode::new(icon),
        observed_at: parsed.dt.and_then(unix_to_utc),
    })
}

/// Classify a geocoding response body. Errors arrive as an object with `cod`.
pub fn parse_suggestions(status: u16, body: &str) -> Result<Vec<Suggestion>, WeatherError> {
    let value = decode(status, body)?;

    if !value.is_array() {
        check_code(status, &value)?;
    }

    // a success object that isn't a list fails here as malformed
    Ok(serde_json::from_value(value)?)
}

fn decode(status: u16, body: &str) -> Result<Value, WeatherError> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if !(200..300).contains(&status) => Err(WeatherError::Status {
            status,
            body: truncate_body(body),
        }),
        Err(err) => Err(WeatherError::Parse(err)),
    }
}

fn check_code(status: u16, value: &Value) -> Result<(), WeatherError> {
    let code = match value.get("cod") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
        None => Some(i64::from(status)),
    };

    if code == Some(SUCCESS_CODE) {
        return Ok(());
    }

    let code = match value.get("cod") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => status.to_string(),
    };

    Err(WeatherError::Domain {
        code,
        message: message_of(value),
    })
}

fn message_of(value: &Value) -> String {
    match value.get("message") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | None => "Unknown error".to_string(),
        Some(other) => other.to_string(),
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
