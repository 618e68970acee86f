//! Destination records and their transport options

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// A travel destination as stored in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub id: String,
    pub name: String,
    /// Free-form location, "City, State" for most records
    pub location: String,
    pub coordinates: Coordinates,
    pub description: String,
    pub short_description: String,
    pub historical_significance: String,
    pub image_url: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub best_time_to_visit: String,
    /// Average rating on a 0-5 scale
    pub average_rating: f32,
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub transport: Vec<TransportOption>,
    #[serde(default)]
    pub nearby_attractions: Vec<NearbyAttraction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_fee: Option<EntryFee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}

impl Destination {
    /// City part of the location, i.e. everything before the first comma
    #[must_use]
    pub fn city(&self) -> &str {
        self.location
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// Whether the destination carries the given tag (exact match)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// How to get to a destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportOption {
    pub mode: TransportMode,
    pub duration: String,
    pub cost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// Static availability hint authored with the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<AvailabilityStatus>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Train,
    Plane,
    Taxi,
    Car,
    Metro,
    Boat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    High,
    Medium,
    Low,
}

impl AvailabilityStatus {
    /// Advisory text shown next to the status
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            AvailabilityStatus::High => "Highly available - many options",
            AvailabilityStatus::Medium => "Moderately available - limited options",
            AvailabilityStatus::Low => "Low availability - book in advance",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyAttraction {
    pub name: String,
    pub distance: String,
}

/// Entry prices for domestic and foreign visitors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryFee {
    pub domestic: String,
    pub foreign: String,
}
