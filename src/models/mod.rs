//! Data models for the TravelGuide service
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates
//! - Destination: Catalog records and transport options
//! - Weather: Weather and air-quality snapshots
//! - Context: Crowd, transport, event and currency data

pub mod context;
pub mod destination;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use context::{
    CrowdBand, CrowdLevel, CurrencyRateTable, EventType, LocalEvent, TransportAvailability,
    currency_name,
};
pub use destination::{
    AvailabilityStatus, Destination, EntryFee, NearbyAttraction, TransportMode, TransportOption,
};
pub use location::Coordinates;
pub use weather::{
    AirQualitySnapshot, AqiLevel, Fetched, ForecastDay, Pollutants, WeatherSnapshot, icon_url,
};
