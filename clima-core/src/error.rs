use thiserror::Error;

/// Failures while looking up weather or suggestions; only `Domain` carries user-facing text.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Query must not be empty")]
    Validation,

    #[error("{message}")]
    Domain { code: String, message: String },

    #[error("Failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Weather service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid weather service response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WeatherError {
    pub fn is_domain(&self) -> bool {
        matches!(self, WeatherError::Domain { .. })
    }

    /// Text to show in the widget for this failure.
    pub fn user_message(&self, lang: &str) -> String {
        match self {
            WeatherError::Domain { message, .. } => message.clone(),
            WeatherError::Validation => localized(lang, Message::EmptyQuery).to_string(),
            _ => localized(lang, Message::Unavailable).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Message {
    EmptyQuery,
    Unavailable,
}

fn localized(lang: &str, message: Message) -> &'static str {
    let english = lang.to_ascii_lowercase().starts_with("en");

    match (message, english) {
        (Message::EmptyQuery, false) => "Ingresa el nombre de una ciudad.",
        (Message::EmptyQuery, true) => "Enter a city name.",
        (Message::Unavailable, false) => {
            "No se pudieron obtener los datos del clima. Inténtalo de nuevo."
        }
        (Message::Unavailable, true) => "Could not fetch weather data. Please try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_message_is_verbatim() {
        let err = WeatherError::Domain {
            code: "404".into(),
            message: "city not found".into(),
        };
        assert!(err.is_domain());
        assert_eq!(err.user_message("es"), "city not found");
        assert_eq!(err.to_string(), "city not found");
    }

    #[test]
    fn parse_failure_uses_generic_localized_message() {
        let parse = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = WeatherError::Parse(parse);

        assert!(!err.is_domain());
        assert!(err.user_message("es").starts_with("No se pudieron"));
        assert_eq!(
            err.user_message("en"),
            "Could not fetch weather data. Please try again."
        );
    }

    #[test]
    fn status_failure_is_not_domain() {
        let err = WeatherError::Status {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert!(!err.is_domain());
        assert!(err.to_string().contains("502"));
    }
}
