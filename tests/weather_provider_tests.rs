//! OpenWeatherMap client against a local stub server

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};

use travelguide::config::WeatherConfig;
use travelguide::random::RandomSource;
use travelguide::{ConditionsProvider, OpenWeatherClient, WeatherService};

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> OpenWeatherClient {
    OpenWeatherClient::new(&WeatherConfig {
        api_key: Some("test-key-123".to_string()),
        base_url: format!("http://{addr}"),
        timeout_seconds: 5,
    })
    .unwrap()
}

async fn current() -> Json<Value> {
    Json(json!({
        "weather": [{"id": 721, "main": "Haze", "description": "haze", "icon": "50d"}],
        "main": {"temp": 29.4, "humidity": 62},
        "wind": {"speed": 2.5},
        "name": "Agra"
    }))
}

async fn forecast() -> Json<Value> {
    // 2024-03-04 00:00 UTC onwards, every 9 hours, Kolkata offset
    let list: Vec<Value> = (0..8)
        .map(|i| {
            json!({
                "dt": 1_709_510_400 + i * 9 * 3600,
                "main": {"temp": 20.0 + i as f64},
                "weather": [{"main": "Clear", "icon": "01d"}]
            })
        })
        .collect();
    Json(json!({"list": list, "city": {"name": "Agra", "timezone": 19800}}))
}

async fn air() -> Json<Value> {
    Json(json!({
        "list": [{
            "main": {"aqi": 3},
            "components": {"co": 520.0, "no2": 18.2, "o3": 60.1, "pm2_5": 35.5, "pm10": 70.3}
        }]
    }))
}

#[tokio::test]
async fn test_live_weather_with_forecast() {
    let addr = spawn(
        Router::new()
            .route("/weather", get(current))
            .route("/forecast", get(forecast))
            .route("/air_pollution", get(air)),
    )
    .await;
    let client = client(addr);

    let weather = client.current_weather(27.1751, 78.0421).await.unwrap();
    assert_eq!(weather.temperature, 29);
    assert_eq!(weather.condition, "Haze");
    assert_eq!(weather.humidity, 62);
    assert!((weather.wind_speed - 9.0).abs() < 1e-4);

    let forecast = weather.forecast.unwrap();
    let days: Vec<&str> = forecast.iter().map(|d| d.day.as_str()).collect();
    assert_eq!(days, vec!["Monday", "Tuesday", "Wednesday"]);

    let air = client.air_quality(27.1751, 78.0421).await.unwrap();
    assert_eq!(air.aqi, 3);
    assert_eq!(air.status.label(), "Unhealthy for Sensitive Groups");
}

#[tokio::test]
async fn test_forecast_failure_keeps_current_conditions() {
    let addr = spawn(
        Router::new()
            .route("/weather", get(current))
            .route("/forecast", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
    )
    .await;

    let weather = client(addr).current_weather(27.1751, 78.0421).await.unwrap();
    assert_eq!(weather.condition, "Haze");
    assert!(weather.forecast.is_none());
}

#[tokio::test]
async fn test_server_errors_fall_back_to_synthesized_data() {
    let addr = spawn(Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR })).await;
    let service = WeatherService::new(Arc::new(client(addr)), Arc::new(RandomSource::seeded(5)));

    let weather = service.fetch_weather(27.1751, 78.0421).await;
    assert!(!weather.is_live());
    assert!((20..=34).contains(&weather.value().temperature));

    let air = service.fetch_air_quality(27.1751, 78.0421).await;
    assert!(!air.is_live());
    assert!((1..=5).contains(&air.value().aqi));
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let addr = spawn(Router::new().fallback(|| async { "not json" })).await;
    let service = WeatherService::new(Arc::new(client(addr)), Arc::new(RandomSource::seeded(0)));

    let weather = service.fetch_weather(0.0, 0.0).await;
    assert!(!weather.is_live());
    assert!(weather.value().forecast.is_none());
}
