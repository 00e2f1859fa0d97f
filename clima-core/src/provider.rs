use crate::{Config, Query, Suggestion, WeatherError, WeatherReading};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of weather readings and autocomplete candidates.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name or a coordinate pair.
    async fn current(&self, query: &Query) -> Result<WeatherReading, WeatherError>;

    /// Up to `limit` geocoding candidates for free text.
    async fn suggest(&self, text: &str, limit: usize) -> Result<Vec<Suggestion>, WeatherError>;
}

/// Construct the OpenWeather provider from an already-resolved config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    Ok(Box::new(OpenWeatherProvider::new(config)?))
}
