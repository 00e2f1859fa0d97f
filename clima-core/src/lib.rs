//! Core library for the `clima` weather widget.
//!
//! This crate defines:
//! - Configuration handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - Shared domain models (queries, suggestions, readings)
//! - The widget state machine and its presentation helpers
//!
//! It is used by `clima-cli`, but any front end can drive a [`WeatherWidget`].

pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod style;
pub mod widget;

pub use config::{Config, Units};
pub use display::ReadingView;
pub use error::WeatherError;
pub use model::{IconCode, Query, Suggestion, WeatherReading};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use style::StyleBucket;
pub use widget::{ViewState, WeatherWidget};
