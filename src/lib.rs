//! `TravelGuide` - destination catalog and real-time travel context
//!
//! This library provides the destination catalog with search and
//! distance ranking, live weather and air quality with local fallback,
//! and the crowd, transport, event and currency context shown alongside
//! a destination.

pub mod api;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod geo;
pub mod models;
pub mod random;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use catalog::Catalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TravelGuideConfig;
pub use context::{ContextService, DestinationContext};
pub use error::TravelGuideError;
pub use models::{Coordinates, Destination, Fetched};
pub use random::RandomSource;
pub use weather::{ConditionsProvider, OpenWeatherClient, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelGuideError>;
