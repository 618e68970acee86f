//! HTTP API tests driving the router in-process

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use chrono_tz::Asia::Kolkata;
use serde_json::Value;
use tower::ServiceExt;

use travelguide::api::AppState;
use travelguide::models::{AirQualitySnapshot, CurrencyRateTable, WeatherSnapshot};
use travelguide::{
    Catalog, ConditionsProvider, ContextService, FixedClock, RandomSource, TravelGuideError,
    WeatherService, web,
};

struct Unreachable;

#[async_trait]
impl ConditionsProvider for Unreachable {
    async fn current_weather(&self, _lat: f64, _lng: f64) -> travelguide::Result<WeatherSnapshot> {
        Err(TravelGuideError::api("connection refused"))
    }

    async fn air_quality(&self, _lat: f64, _lng: f64) -> travelguide::Result<AirQualitySnapshot> {
        Err(TravelGuideError::api("connection refused"))
    }
}

fn state() -> Arc<AppState> {
    let random = Arc::new(RandomSource::seeded(2024));
    // Tuesday 13:00
    let now = Kolkata.with_ymd_and_hms(2024, 3, 5, 13, 0, 0).unwrap();
    let rates = CurrencyRateTable {
        base: "USD".to_string(),
        rates: BTreeMap::from([
            ("USD".to_string(), 1.0),
            ("INR".to_string(), 75.42),
            ("EUR".to_string(), 0.85),
        ]),
        last_updated: Utc::now(),
    };

    Arc::new(AppState {
        catalog: Catalog::seeded().unwrap(),
        context: ContextService::new(
            WeatherService::new(Arc::new(Unreachable), random.clone()),
            Arc::new(FixedClock(now)),
            random.clone(),
            rates,
        ),
        random,
        featured_count: 4,
        maps_api_key: Some("maps-key".to_string()),
    })
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let app = web::app(state(), std::time::Duration::from_secs(5));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_search_by_text() {
    let (status, body) = get("/api/destinations?q=taj").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["taj-mahal"]);
}

#[tokio::test]
async fn test_search_by_tags() {
    let (status, body) = get("/api/destinations?tags=Architecture,Monument").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["taj-mahal", "red-fort"]);
}

#[tokio::test]
async fn test_search_query_is_passed_through_untrimmed() {
    let (_, body) = get("/api/destinations?q=taj").await;
    assert_eq!(ids(&body), vec!["taj-mahal"]);

    let (status, body) = get("/api/destinations?q=%20%20taj").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn test_empty_search_returns_catalog() {
    let (_, body) = get("/api/destinations").await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_featured_uses_configured_count() {
    let (_, body) = get("/api/destinations/featured").await;
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (_, body) = get("/api/destinations/featured?count=2").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_tags_listing() {
    let (_, body) = get("/api/destinations/tags").await;
    let tags = body.as_array().unwrap();
    assert_eq!(tags.len(), 13);
    assert_eq!(tags[0], "Architecture");
}

#[tokio::test]
async fn test_get_destination() {
    let (status, body) = get("/api/destinations/red-fort").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Red Fort");
    assert!(body["transport"].is_array());
    let map = body["map_image_url"].as_str().unwrap();
    assert!(map.contains("center=28.6562,77.241"));
    assert!(map.ends_with("key=maps-key"));
}

#[tokio::test]
async fn test_unknown_destination_is_404_with_message() {
    let (status, body) = get("/api/destinations/atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "We couldn't find the destination you're looking for."
    );

    let (status, _) = get("/api/destinations/atlantis/context").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_context_falls_back_when_provider_is_down() {
    let (status, body) = get("/api/destinations/taj-mahal/context").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"]["source"], "fallback");
    assert_eq!(body["air_quality"]["source"], "fallback");
    assert_eq!(body["crowd"]["level"], "high");
    assert_eq!(
        body["visit_recommendation"],
        "Early afternoon typically has the highest crowds"
    );
    assert!(body["events"].as_array().unwrap().len() >= 3);
    assert_eq!(body["currency"]["base"], "USD");
    assert_eq!(body["generated_at"], "2024-03-05T07:30:00Z");
}

#[tokio::test]
async fn test_directions_from_coordinates() {
    let (status, body) = get("/api/destinations/taj-mahal/directions?from=28.6129,77.2295").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["directions_url"],
        "https://www.google.com/maps/dir/28.6129,77.2295/27.1751,78.0421"
    );
    let distance = body["distance_km"].as_f64().unwrap();
    assert!((170.0..190.0).contains(&distance), "got {distance}");
    assert!(body.get("advisory").is_none());
}

#[tokio::test]
async fn test_directions_when_location_denied() {
    let (status, body) = get("/api/destinations/taj-mahal/directions?geolocation=denied").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["outcome"], "denied");
    assert!(body["advisory"].is_string());
    assert!(body.get("directions_url").is_none());
    assert!(body.get("geolocation_timeout_ms").is_none());

    let (_, body) = get("/api/destinations/taj-mahal/directions?geolocation=timeout").await;
    assert_eq!(body["outcome"]["outcome"], "timed_out");
    assert_eq!(body["geolocation_timeout_ms"], 5000);
}

#[tokio::test]
async fn test_directions_rejects_bad_origin() {
    let (status, body) = get("/api/destinations/taj-mahal/directions?from=north").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));

    let (status, _) = get("/api/destinations/taj-mahal/directions").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nearby_destinations() {
    let (status, body) = get("/api/destinations/nearby?from=28.6129,77.2295&radius_km=300").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["destination"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["red-fort", "taj-mahal", "jaipur-city-palace"]);
}

#[tokio::test]
async fn test_currency_rates() {
    let (status, body) = get("/api/currency/rates").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base"], "USD");
    let inr = body["currencies"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["code"] == "INR")
        .unwrap();
    assert_eq!(inr["name"], "Indian Rupee");
    assert_eq!(inr["rate"], 75.42);
}

#[tokio::test]
async fn test_currency_conversion() {
    let (status, body) = get("/api/currency/convert?amount=100&from=USD&to=INR").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 7542.0);

    let (_, body) = get("/api/currency/convert?amount=abc&from=usd&to=inr").await;
    assert_eq!(body["amount"], 0.0);
    assert_eq!(body["result"], 0.0);
    assert_eq!(body["to"], "INR");

    let (status, _) = get("/api/currency/convert?amount=5&from=USD&to=XYZ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
