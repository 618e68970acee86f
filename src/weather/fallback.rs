//! Locally synthesized snapshots used when the provider is unavailable

use rand::seq::IndexedRandom;
use rand::{Rng, RngExt};

use crate::models::{AirQualitySnapshot, Pollutants, WeatherSnapshot};

/// Condition labels paired with the provider icon code that depicts them
const CONDITIONS: [(&str, &str); 8] = [
    ("Sunny", "01d"),
    ("Partly Cloudy", "02d"),
    ("Cloudy", "04d"),
    ("Light Rain", "09d"),
    ("Heavy Rain", "10d"),
    ("Thunderstorm", "11d"),
    ("Foggy", "50d"),
    ("Clear", "01n"),
];

/// Plausible weather for a tropical destination
pub fn synthesize_weather<R: Rng + ?Sized>(rng: &mut R) -> WeatherSnapshot {
    let (condition, icon) = CONDITIONS.choose(rng).copied().unwrap_or(CONDITIONS[0]);

    WeatherSnapshot {
        temperature: rng.random_range(20..=34),
        condition: condition.to_string(),
        humidity: rng.random_range(50..=79),
        wind_speed: f32::from(rng.random_range(5u8..=24)),
        icon: icon.to_string(),
        forecast: None,
    }
}

/// Random air-quality category with pollutant levels in typical ranges
pub fn synthesize_air_quality<R: Rng + ?Sized>(rng: &mut R) -> AirQualitySnapshot {
    let aqi = rng.random_range(1..=5);
    let components = Pollutants {
        co: rng.random_range(200.0..1200.0),
        no2: rng.random_range(5.0..80.0),
        o3: rng.random_range(10.0..150.0),
        pm2_5: rng.random_range(5.0..120.0),
        pm10: rng.random_range(10.0..200.0),
    };
    AirQualitySnapshot::new(aqi, components)
}
