//! Synthesized real-time context: crowds, transport, events and currency

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AvailabilityStatus;

/// Estimated crowd at a destination right now
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrowdLevel {
    pub level: CrowdBand,
    /// Capacity percentage, always inside the band's range
    pub percentage: u8,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CrowdBand {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

impl CrowdBand {
    /// Inclusive percentage range for the band
    #[must_use]
    pub fn range(self) -> (u8, u8) {
        match self {
            CrowdBand::Low => (5, 30),
            CrowdBand::Moderate => (30, 50),
            CrowdBand::High => (50, 70),
            CrowdBand::VeryHigh => (70, 100),
        }
    }

    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            CrowdBand::Low => "Low crowds - great time to visit",
            CrowdBand::Moderate => "Moderate crowds - reasonable waiting times",
            CrowdBand::High => "High crowds - expect some waiting",
            CrowdBand::VeryHigh => "Very crowded - long waiting times expected",
        }
    }

    #[must_use]
    pub fn contains(self, percentage: u8) -> bool {
        let (low, high) = self.range();
        (low..=high).contains(&percentage)
    }
}

/// Estimated availability of transport right now
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportAvailability {
    pub status: AvailabilityStatus,
    pub text: String,
}

impl From<AvailabilityStatus> for TransportAvailability {
    fn from(status: AvailabilityStatus) -> Self {
        Self {
            status,
            text: status.text().to_string(),
        }
    }
}

/// An illustrative local event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalEvent {
    pub name: String,
    /// Display date, e.g. "October 14"
    pub date: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Cultural,
    Religious,
    Food,
    Art,
}

/// Exchange rates quoted against a base currency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyRateTable {
    pub base: String,
    /// Units of each currency per one unit of `base`
    pub rates: BTreeMap<String, f64>,
    pub last_updated: DateTime<Utc>,
}

impl CurrencyRateTable {
    /// Rate for a code, ignoring case and treating the base as 1.0 even if it
    /// is not listed
    #[must_use]
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        let listed = self
            .rates
            .get(code)
            .or_else(|| {
                self.rates
                    .iter()
                    .find(|(listed, _)| listed.eq_ignore_ascii_case(code))
                    .map(|(_, rate)| rate)
            })
            .copied();
        if self.is_base(code) {
            return Some(listed.unwrap_or(1.0));
        }
        listed
    }

    #[must_use]
    pub fn is_base(&self, code: &str) -> bool {
        self.base.trim().eq_ignore_ascii_case(code.trim())
    }
}

/// Display name for the currencies the exchange widget offers
#[must_use]
pub fn currency_name(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("US Dollar"),
        "INR" => Some("Indian Rupee"),
        "EUR" => Some("Euro"),
        "GBP" => Some("British Pound"),
        "JPY" => Some("Japanese Yen"),
        "AUD" => Some("Australian Dollar"),
        "CAD" => Some("Canadian Dollar"),
        "SGD" => Some("Singapore Dollar"),
        _ => None,
    }
}
