//! Weather - Conditions Shown in the Weather Widget
//!
//! Placeholder data; nothing is fetched.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Current sea conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub condition: String,
    pub temp: String,
    pub wind: String,
    pub waves: String,
}

impl WeatherReport {
    /// Built-in report for a language
    pub fn placeholder(language: Language) -> Self {
        match language {
            Language::En => Self {
                condition: "Partly Cloudy".to_string(),
                temp: "28°C / 82°F".to_string(),
                wind: "15 knots E".to_string(),
                waves: "1-2 feet".to_string(),
            },
            Language::Es => Self {
                condition: "Parcialmente Nublado".to_string(),
                temp: "28°C / 82°F".to_string(),
                wind: "15 nudos E".to_string(),
                waves: "1-2 pies".to_string(),
            },
        }
    }

    /// Value for a `data-weather` field name
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "condition" => Some(&self.condition),
            "temp" | "temperature" => Some(&self.temp),
            "wind" => Some(&self.wind),
            "waves" => Some(&self.waves),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let report = WeatherReport::placeholder(Language::Es);
        assert_eq!(report.field("wind"), Some("15 nudos E"));
        assert_eq!(report.field("temperature"), Some("28°C / 82°F"));
        assert_eq!(report.field("tide"), None);
    }
}
