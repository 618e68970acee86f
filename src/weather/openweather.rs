//! OpenWeatherMap client
//!
//! Fetches current conditions, the 5-day/3-hour forecast and air pollution
//! data for a coordinate pair. Requests are single-shot: a failure is handed
//! back to the caller, which decides whether to fall back.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::ConditionsProvider;
use super::forecast::{ForecastSample, select_forecast_days};
use crate::config::WeatherConfig;
use crate::models::{AirQualitySnapshot, Pollutants, WeatherSnapshot};
use crate::{Result, TravelGuideError};

/// Metres per second to kilometres per hour
const MS_TO_KMH: f64 = 3.6;

/// Weather API client for OpenWeatherMap-compatible services
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("TravelGuide/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TravelGuideError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, lat: f64, lng: f64) -> Result<T> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TravelGuideError::config("No weather API key configured"))?;

        let url = format!(
            "{}/{endpoint}?lat={lat}&lon={lng}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(api_key)
        );
        debug!("Requesting {}/{} for ({:.4}, {:.4})", self.base_url, endpoint, lat, lng);

        let start_time = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TravelGuideError::api(format!("Request to {endpoint} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TravelGuideError::api(format!(
                "{endpoint} returned status {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| TravelGuideError::api(format!("Invalid {endpoint} response: {e}")))?;

        let elapsed = start_time.elapsed();
        if elapsed.as_secs() > 5 {
            warn!("Slow {} response: {:.3}s", endpoint, elapsed.as_secs_f64());
        } else {
            debug!("{} answered in {:.3}s", endpoint, elapsed.as_secs_f64());
        }

        Ok(body)
    }

    async fn forecast_samples(&self, lat: f64, lng: f64) -> Result<Vec<ForecastSample>> {
        let response: dto::ForecastResponse = self.get_json("forecast", lat, lng).await?;
        Ok(response.into_samples())
    }
}

#[async_trait]
impl ConditionsProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, lat: f64, lng: f64) -> Result<WeatherSnapshot> {
        let (current, samples) = futures::join!(
            self.get_json::<dto::CurrentResponse>("weather", lat, lng),
            self.forecast_samples(lat, lng)
        );

        let mut snapshot = current?.into_snapshot()?;
        match samples {
            Ok(samples) => snapshot.forecast = Some(select_forecast_days(&samples)),
            Err(e) => warn!("Forecast unavailable, returning current conditions only: {}", e),
        }

        info!(
            "Live weather for ({:.4}, {:.4}): {} {}, wind {}",
            lat,
            lng,
            snapshot.format_temperature(),
            snapshot.condition,
            snapshot.format_wind()
        );
        Ok(snapshot)
    }

    #[instrument(skip(self))]
    async fn air_quality(&self, lat: f64, lng: f64) -> Result<AirQualitySnapshot> {
        let response: dto::AirPollutionResponse = self.get_json("air_pollution", lat, lng).await?;
        let snapshot = response.into_snapshot()?;
        info!(
            "Live air quality for ({:.4}, {:.4}): AQI {} ({})",
            lat,
            lng,
            snapshot.aqi,
            snapshot.status.label()
        );
        Ok(snapshot)
    }
}

/// OpenWeatherMap response structures and conversion to internal models
mod dto {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub main: String,
        pub icon: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentMain {
        pub temp: f64,
        pub humidity: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        /// m/s with metric units
        pub speed: f64,
    }

    /// Current weather response
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub weather: Vec<Condition>,
        pub main: CurrentMain,
        pub wind: Wind,
    }

    impl CurrentResponse {
        pub fn into_snapshot(self) -> Result<WeatherSnapshot> {
            let condition = self
                .weather
                .into_iter()
                .next()
                .ok_or_else(|| TravelGuideError::api("Weather response has no conditions"))?;

            Ok(WeatherSnapshot {
                temperature: self.main.temp.round() as i32,
                condition: condition.main,
                humidity: self.main.humidity.clamp(0.0, 100.0).round() as u8,
                wind_speed: ((self.wind.speed * MS_TO_KMH * 10.0).round() / 10.0) as f32,
                icon: condition.icon,
                forecast: None,
            })
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastMain {
        pub temp: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        /// Unix timestamp in seconds, UTC
        pub dt: i64,
        pub main: ForecastMain,
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct City {
        /// Shift in seconds from UTC
        #[serde(default)]
        pub timezone: i32,
    }

    /// 5-day / 3-hour forecast response
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastEntry>,
        pub city: Option<City>,
    }

    impl ForecastResponse {
        pub fn into_samples(self) -> Vec<ForecastSample> {
            let offset_seconds = self.city.map_or(0, |c| c.timezone);
            let offset = FixedOffset::east_opt(offset_seconds).unwrap_or_else(|| Utc.fix());

            self.list
                .into_iter()
                .filter_map(|entry| {
                    let timestamp = DateTime::from_timestamp(entry.dt, 0)?.with_timezone(&offset);
                    let condition = entry.weather.into_iter().next()?;
                    Some(ForecastSample {
                        timestamp,
                        temperature: entry.main.temp,
                        condition: condition.main,
                        icon: condition.icon,
                    })
                })
                .collect()
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct AirMain {
        pub aqi: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct AirComponents {
        pub co: f64,
        pub no2: f64,
        pub o3: f64,
        pub pm2_5: f64,
        pub pm10: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct AirEntry {
        pub main: AirMain,
        pub components: AirComponents,
    }

    /// Air pollution response
    #[derive(Debug, Deserialize)]
    pub struct AirPollutionResponse {
        pub list: Vec<AirEntry>,
    }

    impl AirPollutionResponse {
        pub fn into_snapshot(self) -> Result<AirQualitySnapshot> {
            let entry = self
                .list
                .into_iter()
                .next()
                .ok_or_else(|| TravelGuideError::api("Air pollution response is empty"))?;
            let c = entry.components;
            Ok(AirQualitySnapshot::new(
                entry.main.aqi,
                Pollutants {
                    co: c.co.max(0.0),
                    no2: c.no2.max(0.0),
                    o3: c.o3.max(0.0),
                    pm2_5: c.pm2_5.max(0.0),
                    pm10: c.pm10.max(0.0),
                },
            ))
        }
    }
}
