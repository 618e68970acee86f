use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::{
    Result, TravelGuideError,
    catalog::Catalog,
    clock::SystemClock,
    config::TravelGuideConfig,
    context::{ContextService, DestinationContext, currency},
    geo::{self, GeolocationOutcome},
    models::{Coordinates, Destination, currency_name},
    random::RandomSource,
    weather::{OpenWeatherClient, WeatherService},
};

const DEFAULT_NEARBY_RADIUS_KM: f64 = 100.0;

/// Shared state behind every handler
pub struct AppState {
    pub catalog: Catalog,
    pub context: ContextService,
    pub random: Arc<RandomSource>,
    pub featured_count: usize,
    pub maps_api_key: Option<String>,
}

impl AppState {
    /// Production wiring: seeded catalog, OpenWeatherMap, system clock
    pub fn from_config(config: &TravelGuideConfig) -> anyhow::Result<Arc<Self>> {
        let random = Arc::new(RandomSource::from_os());
        let provider = Arc::new(OpenWeatherClient::new(&config.weather)?);
        let clock = Arc::new(SystemClock::new(config.timezone()?));

        Ok(Arc::new(Self {
            catalog: Catalog::seeded()?,
            context: ContextService::new(
                WeatherService::new(provider, random.clone()),
                clock,
                random.clone(),
                config.rate_table(),
            ),
            random,
            featured_count: config.defaults.featured_count,
            maps_api_key: config.maps.api_key.clone(),
        }))
    }
}

impl IntoResponse for TravelGuideError {
    fn into_response(self) -> Response {
        let status = match &self {
            TravelGuideError::NotFound { .. } => StatusCode::NOT_FOUND,
            TravelGuideError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

/// Card-sized view of a destination for list endpoints
#[derive(Serialize, Deserialize)]
pub struct ApiDestinationSummary {
    pub id: String,
    pub name: String,
    pub location: String,
    pub short_description: String,
    pub image_url: String,
    pub average_rating: f32,
    pub review_count: u32,
    pub tags: Vec<String>,
    pub coordinates: Coordinates,
}

impl From<&Destination> for ApiDestinationSummary {
    fn from(destination: &Destination) -> Self {
        Self {
            id: destination.id.clone(),
            name: destination.name.clone(),
            location: destination.location.clone(),
            short_description: destination.short_description.clone(),
            image_url: destination.image_url.clone(),
            average_rating: destination.average_rating,
            review_count: destination.review_count,
            tags: destination.tags.clone(),
            coordinates: destination.coordinates,
        }
    }
}

/// Full record plus a map preview when a maps key is configured
#[derive(Serialize, Deserialize)]
pub struct ApiDestinationDetail {
    #[serde(flatten)]
    pub destination: Destination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_image_url: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiNearbyDestination {
    pub destination: ApiDestinationSummary,
    pub distance_km: f64,
}

#[derive(Serialize, Deserialize)]
pub struct ApiDirections {
    pub destination_id: String,
    pub outcome: GeolocationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    /// How long clients should wait for a position fix before retrying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation_timeout_ms: Option<u64>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiCurrency {
    pub code: String,
    pub name: Option<String>,
    pub rate: f64,
}

#[derive(Serialize, Deserialize)]
pub struct ApiCurrencyRates {
    pub base: String,
    pub last_updated: DateTime<Utc>,
    pub currencies: Vec<ApiCurrency>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiConversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub result: f64,
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    /// Comma-separated, all must match
    tags: Option<String>,
}

#[derive(Deserialize)]
struct FeaturedParams {
    count: Option<usize>,
}

#[derive(Deserialize)]
struct NearbyParams {
    from: String,
    radius_km: Option<f64>,
}

#[derive(Deserialize)]
struct DirectionsParams {
    from: Option<String>,
    geolocation: Option<String>,
}

#[derive(Deserialize)]
struct ConvertParams {
    #[serde(default)]
    amount: String,
    from: String,
    to: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/destinations", get(search_destinations))
        .route("/destinations/featured", get(featured_destinations))
        .route("/destinations/tags", get(list_tags))
        .route("/destinations/nearby", get(nearby_destinations))
        .route("/destinations/{id}", get(get_destination))
        .route("/destinations/{id}/context", get(get_context))
        .route("/destinations/{id}/directions", get(get_directions))
        .route("/currency/rates", get(get_rates))
        .route("/currency/convert", get(convert_currency))
        .with_state(state)
}

fn summaries<'a>(destinations: impl IntoIterator<Item = &'a Destination>) -> Vec<ApiDestinationSummary> {
    destinations.into_iter().map(ApiDestinationSummary::from).collect()
}

async fn search_destinations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ApiDestinationSummary>> {
    let tags: Vec<&str> = params
        .tags
        .as_deref()
        .map(|tags| tags.split(',').map(str::trim).filter(|t| !t.is_empty()).collect())
        .unwrap_or_default();
    Json(summaries(state.catalog.search(&params.q, &tags)))
}

async fn featured_destinations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeaturedParams>,
) -> Json<Vec<ApiDestinationSummary>> {
    let count = params.count.unwrap_or(state.featured_count);
    let featured = state
        .random
        .with_rng(|rng| summaries(state.catalog.sample_random(count, rng)));
    Json(featured)
}

async fn list_tags(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .catalog
            .all_tags()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

async fn nearby_destinations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<ApiNearbyDestination>>> {
    let center = geo::parse_coordinates(&params.from)?;
    let radius_km = params.radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(TravelGuideError::validation(format!(
            "Radius must be a non-negative number of kilometres, got {radius_km}"
        )));
    }

    let nearby = state
        .catalog
        .within_radius(&center, radius_km)
        .into_iter()
        .map(|(destination, distance_km)| ApiNearbyDestination {
            destination: destination.into(),
            distance_km,
        })
        .collect();
    Ok(Json(nearby))
}

async fn get_destination(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiDestinationDetail>> {
    let destination = state.catalog.get_by_id(&id)?;
    let map_image_url = state
        .maps_api_key
        .as_deref()
        .map(|key| geo::static_map_url(&destination.coordinates, key));

    Ok(Json(ApiDestinationDetail {
        destination: destination.clone(),
        map_image_url,
    }))
}

async fn get_context(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DestinationContext>> {
    let destination = state.catalog.get_by_id(&id)?;
    Ok(Json(state.context.build(destination).await))
}

async fn get_directions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<DirectionsParams>,
) -> Result<Json<ApiDirections>> {
    let destination = state.catalog.get_by_id(&id)?;

    let outcome = match (params.from.as_deref(), params.geolocation.as_deref()) {
        (Some(from), _) => GeolocationOutcome::Located(geo::parse_coordinates(from)?),
        (None, Some(reason)) => GeolocationOutcome::from_failure(reason),
        (None, None) => {
            return Err(TravelGuideError::validation(
                "Provide either 'from' or 'geolocation'",
            ));
        }
    };

    let to = destination.coordinates;
    let (distance_km, directions_url) = match outcome.coordinates() {
        Some(from) => (
            Some(geo::haversine_distance_km(
                from.latitude,
                from.longitude,
                to.latitude,
                to.longitude,
            )),
            Some(geo::build_directions_link(
                from.latitude,
                from.longitude,
                to.latitude,
                to.longitude,
            )),
        ),
        None => (None, None),
    };

    Ok(Json(ApiDirections {
        destination_id: destination.id.clone(),
        advisory: outcome.advisory().map(str::to_string),
        geolocation_timeout_ms: (outcome == GeolocationOutcome::TimedOut)
            .then(|| geo::GEOLOCATION_TIMEOUT.as_millis() as u64),
        outcome,
        distance_km,
        directions_url,
    }))
}

async fn get_rates(State(state): State<Arc<AppState>>) -> Json<ApiCurrencyRates> {
    let table = state.context.rates();
    Json(ApiCurrencyRates {
        base: table.base.clone(),
        last_updated: table.last_updated,
        currencies: table
            .rates
            .iter()
            .map(|(code, rate)| ApiCurrency {
                code: code.clone(),
                name: currency_name(code).map(str::to_string),
                rate: *rate,
            })
            .collect(),
    })
}

async fn convert_currency(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
) -> Result<Json<ApiConversion>> {
    let table = state.context.rates();
    let amount = currency::parse_amount(&params.amount);
    let rate = currency::rate(&params.from, &params.to, table)?;
    let result = currency::convert(amount, &params.from, &params.to, table)?;

    Ok(Json(ApiConversion {
        amount,
        from: params.from.trim().to_ascii_uppercase(),
        to: params.to.trim().to_ascii_uppercase(),
        rate,
        result,
    }))
}
