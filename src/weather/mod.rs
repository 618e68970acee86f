//! Live conditions with local fallback
//!
//! [`WeatherService`] asks a [`ConditionsProvider`] for weather and air
//! quality. Any provider failure is logged and answered with a synthesized
//! snapshot, so callers always receive a value tagged with its origin.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::Result;
use crate::models::{AirQualitySnapshot, Fetched, WeatherSnapshot};
use crate::random::RandomSource;

pub mod fallback;
pub mod forecast;
pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Remote source of current conditions for a coordinate pair
#[async_trait]
pub trait ConditionsProvider: Send + Sync {
    /// Current weather, with a short forecast when available
    async fn current_weather(&self, lat: f64, lng: f64) -> Result<WeatherSnapshot>;

    async fn air_quality(&self, lat: f64, lng: f64) -> Result<AirQualitySnapshot>;
}

pub struct WeatherService {
    provider: Arc<dyn ConditionsProvider>,
    random: Arc<RandomSource>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn ConditionsProvider>, random: Arc<RandomSource>) -> Self {
        Self { provider, random }
    }

    pub async fn fetch_weather(&self, lat: f64, lng: f64) -> Fetched<WeatherSnapshot> {
        with_fallback("weather", self.provider.current_weather(lat, lng), || {
            self.random.with_rng(|rng| fallback::synthesize_weather(rng))
        })
        .await
    }

    pub async fn fetch_air_quality(&self, lat: f64, lng: f64) -> Fetched<AirQualitySnapshot> {
        with_fallback("air quality", self.provider.air_quality(lat, lng), || {
            self.random.with_rng(|rng| fallback::synthesize_air_quality(rng))
        })
        .await
    }
}

async fn with_fallback<T, F, S>(what: &str, live: F, synthesize: S) -> Fetched<T>
where
    F: Future<Output = Result<T>>,
    S: FnOnce() -> T,
{
    match live.await {
        Ok(value) => Fetched::Live(value),
        Err(e) => {
            warn!("Live {} unavailable, using synthesized data: {}", what, e);
            Fetched::Fallback(synthesize())
        }
    }
}
