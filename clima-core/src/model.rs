use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the user asked for: a free-text city or an exact position.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Query {
    pub fn city(name: impl Into<String>) -> Self {
        Query::City(name.into())
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Query::Coordinates { lat, lon }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::City(name) => f.write_str(name),
            Query::Coordinates { lat, lon } => write!(f, "{lat}, {lon}"),
        }
    }
}

/// A geocoding candidate offered while the user types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl Suggestion {
    /// Text placed in the input field when this suggestion is picked.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    /// Longer form for dropdown rows, including the region when known.
    pub fn detailed_label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => self.label(),
        }
    }

    pub fn query(&self) -> Query {
        Query::coordinates(self.lat, self.lon)
    }
}

/// Provider icon code such as `01d` or `10n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconCode(String);

impl IconCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing character encodes day (`d`) or night (`n`).
    pub fn is_night(&self) -> bool {
        self.0.ends_with('n')
    }

    pub fn url(&self, icon_base_url: &str) -> String {
        format!("{}/{}@2x.png", icon_base_url.trim_end_matches('/'), self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub temperature: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Primary condition label, e.g. "Clear" or "Rain".
    pub condition: String,
    pub description: String,
    pub icon: IconCode,
    pub observed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Suggestion {
        Suggestion {
            name: "Paris".into(),
            state: Some("Ile-de-France".into()),
            country: "FR".into(),
            lat: 48.85,
            lon: 2.35,
        }
    }

    #[test]
    fn suggestion_label_is_name_and_country() {
        let s = paris();
        assert_eq!(s.label(), "Paris, FR");
        assert_eq!(s.detailed_label(), "Paris, Ile-de-France, FR");
        assert_eq!(s.query(), Query::coordinates(48.85, 2.35));
    }

    #[test]
    fn icon_suffix_decides_night() {
        assert!(IconCode::new("01n").is_night());
        assert!(!IconCode::new("01d").is_night());
        assert!(!IconCode::new("").is_night());
    }

    #[test]
    fn icon_url_uses_host() {
        let icon = IconCode::new("10d");
        assert_eq!(
            icon.url("https://openweathermap.org/img/wn/"),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }

    #[test]
    fn suggestion_without_state_deserializes() {
        let s: Suggestion =
            serde_json::from_str(r#"{"name":"Lima","country":"PE","lat":-12.04,"lon":-77.03}"#)
                .expect("valid suggestion");
        assert_eq!(s.state, None);
        assert_eq!(s.detailed_label(), "Lima, PE");
    }
}
