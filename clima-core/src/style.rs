//! Maps a reading to the presentation bucket used for the widget background.

use crate::WeatherReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleBucket {
    /// Nothing to show yet.
    None,
    Night,
    Clear,
    Clouds,
    /// Rain and drizzle share one look.
    Rain,
    Thunderstorm,
    Snow,
    Default,
}

impl StyleBucket {
    /// Night wins over the condition label.
    pub fn for_reading(reading: Option<&WeatherReading>) -> Self {
        match reading {
            None => StyleBucket::None,
            Some(r) => Self::classify(&r.condition, r.icon.is_night()),
        }
    }

    pub fn classify(condition: &str, is_night: bool) -> Self {
        if is_night {
            return StyleBucket::Night;
        }

        match condition {
            "Clear" => StyleBucket::Clear,
            "Clouds" => StyleBucket::Clouds,
            "Rain" | "Drizzle" => StyleBucket::Rain,
            "Thunderstorm" => StyleBucket::Thunderstorm,
            "Snow" => StyleBucket::Snow,
            _ => StyleBucket::Default,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StyleBucket::None => "",
            StyleBucket::Night => "bg-gradient-to-br from-slate-900 to-blue-900 text-white",
            StyleBucket::Clear => "bg-gradient-to-br from-sky-300 to-orange-400 text-gray-900",
            StyleBucket::Clouds => "bg-gradient-to-br from-gray-300 to-gray-400 text-gray-900",
            StyleBucket::Rain => "bg-gradient-to-br from-blue-500 to-blue-700 text-white",
            StyleBucket::Thunderstorm => "bg-gradient-to-br from-gray-800 to-gray-900 text-white",
            StyleBucket::Snow => "bg-gradient-to-br from-blue-100 to-blue-200 text-gray-900",
            StyleBucket::Default => "bg-gradient-to-br from-sky-400 to-sky-600 text-white",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StyleBucket::None => "none",
            StyleBucket::Night => "night",
            StyleBucket::Clear => "clear",
            StyleBucket::Clouds => "clouds",
            StyleBucket::Rain => "rain",
            StyleBucket::Thunderstorm => "thunderstorm",
            StyleBucket::Snow => "snow",
            StyleBucket::Default => "default",
        }
    }
}

impl std::fmt::Display for StyleBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
