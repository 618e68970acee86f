//! Weather and air-quality snapshots

use serde::{Deserialize, Serialize};

/// Present-moment weather at a destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in Celsius, rounded to whole degrees
    pub temperature: i32,
    /// Human-readable condition label
    pub condition: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_speed: f32,
    /// Provider icon code, e.g. `01d`
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<ForecastDay>>,
}

impl WeatherSnapshot {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.0} km/h", self.wind_speed)
    }
}

/// One day of the short forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    /// Day of week, e.g. "Monday"
    pub day: String,
    pub temperature: i32,
    pub condition: String,
    pub icon: String,
}

/// URL of the provider icon image for an icon code
#[must_use]
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}.png")
}

/// Air quality at a destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirQualitySnapshot {
    /// Index category, 1 (best) to 5 (worst)
    pub aqi: u8,
    pub status: AqiLevel,
    pub components: Pollutants,
}

impl AirQualitySnapshot {
    #[must_use]
    pub fn new(aqi: u8, components: Pollutants) -> Self {
        Self {
            aqi,
            status: AqiLevel::from_index(aqi),
            components,
        }
    }
}

/// Pollutant concentrations in µg/m³
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pollutants {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    /// Map an index category to its label; anything outside 1-5 is hazardous
    #[must_use]
    pub fn from_index(aqi: u8) -> Self {
        match aqi {
            1 => AqiLevel::Good,
            2 => AqiLevel::Moderate,
            3 => AqiLevel::UnhealthyForSensitiveGroups,
            4 => AqiLevel::Unhealthy,
            5 => AqiLevel::VeryUnhealthy,
            _ => AqiLevel::Hazardous,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }
}

/// Outcome of a fetch that falls back to synthesized data.
///
/// Both arms carry a usable value, so callers never handle an error.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "source", content = "data", rename_all = "lowercase")]
pub enum Fetched<T> {
    /// Data returned by the remote provider
    Live(T),
    /// Locally generated data used because the provider failed
    Fallback(T),
}

impl<T> Fetched<T> {
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Fetched::Live(value) | Fetched::Fallback(value) => value,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(value) | Fetched::Fallback(value) => value,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Fetched::Live(_))
    }
}
