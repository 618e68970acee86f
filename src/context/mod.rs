//! Real-time context for a destination
//!
//! Combines live (or synthesized) weather and air quality with the
//! time-of-day heuristics, local events and the exchange rate table into a
//! single view of "right now" at a destination.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::clock::Clock;
use crate::models::{
    AirQualitySnapshot, CrowdLevel, CurrencyRateTable, Destination, Fetched, LocalEvent,
    TransportAvailability, TransportMode, WeatherSnapshot, icon_url,
};
use crate::random::RandomSource;
use crate::weather::WeatherService;

pub mod currency;
pub mod events;
pub mod heuristics;

pub use currency::{convert, parse_amount, rate};
pub use events::generate_local_events;
pub use heuristics::{estimate_crowd_level, estimate_transport_availability, recommend_visit_time};

/// Current availability of one of the destination's transport modes
#[derive(Debug, Clone, Serialize)]
pub struct TransportStatus {
    pub mode: TransportMode,
    pub availability: TransportAvailability,
}

#[derive(Debug, Clone, Serialize)]
pub struct DestinationContext {
    pub destination_id: String,
    pub weather: Fetched<WeatherSnapshot>,
    pub weather_icon_url: String,
    pub air_quality: Fetched<AirQualitySnapshot>,
    pub crowd: CrowdLevel,
    pub visit_recommendation: String,
    pub transport: Vec<TransportStatus>,
    pub events: Option<Vec<LocalEvent>>,
    pub currency: CurrencyRateTable,
    pub generated_at: DateTime<Utc>,
}

pub struct ContextService {
    weather: WeatherService,
    clock: Arc<dyn Clock>,
    random: Arc<RandomSource>,
    rates: CurrencyRateTable,
}

impl ContextService {
    pub fn new(
        weather: WeatherService,
        clock: Arc<dyn Clock>,
        random: Arc<RandomSource>,
        rates: CurrencyRateTable,
    ) -> Self {
        Self {
            weather,
            clock,
            random,
            rates,
        }
    }

    #[must_use]
    pub fn rates(&self) -> &CurrencyRateTable {
        &self.rates
    }

    #[instrument(skip(self, destination), fields(destination = %destination.id))]
    pub async fn build(&self, destination: &Destination) -> DestinationContext {
        let lat = destination.coordinates.latitude;
        let lng = destination.coordinates.longitude;

        let (weather, air_quality) = futures::join!(
            self.weather.fetch_weather(lat, lng),
            self.weather.fetch_air_quality(lat, lng)
        );

        let now = self.clock.now();
        let (crowd, transport, events) = self.random.with_rng(|rng| {
            let transport = destination
                .transport
                .iter()
                .map(|option| TransportStatus {
                    mode: option.mode,
                    availability: estimate_transport_availability(&now, rng),
                })
                .collect();
            (
                estimate_crowd_level(&now, rng),
                transport,
                generate_local_events(destination.city(), &now, rng),
            )
        });

        let context = DestinationContext {
            destination_id: destination.id.clone(),
            weather_icon_url: icon_url(&weather.value().icon),
            crowd,
            visit_recommendation: recommend_visit_time(&now).to_string(),
            transport,
            events,
            currency: self.rates.clone(),
            generated_at: self.clock.now_utc(),
            weather,
            air_quality,
        };

        info!(
            "Built context for {} (weather {}, air quality {})",
            destination.id,
            source_label(&context.weather),
            source_label(&context.air_quality)
        );
        context
    }
}

fn source_label<T>(fetched: &Fetched<T>) -> &'static str {
    if fetched.is_live() { "live" } else { "fallback" }
}
