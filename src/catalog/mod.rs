//! Destination catalog
//!
//! An in-memory, read-only list of destinations seeded from an embedded JSON
//! document. Provides lookup by id, free-text search with tag filtering,
//! random sampling for the featured list and distance ranking.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::geo::haversine_distance_km;
use crate::models::{Coordinates, Destination};
use crate::{Result, TravelGuideError};

const SEED_DATA: &str = include_str!("destinations.json");

/// Read-only collection of destinations
#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    /// Catalog built from the bundled destination data
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED_DATA)
    }

    /// Parse and validate a JSON array of destinations
    pub fn from_json(json: &str) -> Result<Self> {
        let destinations: Vec<Destination> = serde_json::from_str(json).map_err(|e| {
            TravelGuideError::validation(format!("Malformed destination data: {e}"))
        })?;
        Self::new(destinations)
    }

    /// Build a catalog, rejecting duplicate ids and out-of-range values
    pub fn new(destinations: Vec<Destination>) -> Result<Self> {
        let mut seen = HashSet::new();
        for destination in &destinations {
            if !seen.insert(destination.id.as_str()) {
                return Err(TravelGuideError::validation(format!(
                    "Duplicate destination id '{}'",
                    destination.id
                )));
            }
            if !destination.coordinates.is_valid() {
                return Err(TravelGuideError::validation(format!(
                    "Destination '{}' has coordinates out of range: {}",
                    destination.id,
                    destination.coordinates.format_coordinates()
                )));
            }
            if !(0.0..=5.0).contains(&destination.average_rating) {
                return Err(TravelGuideError::validation(format!(
                    "Destination '{}' has rating {} outside 0-5",
                    destination.id, destination.average_rating
                )));
            }
        }

        info!("Loaded catalog with {} destinations", destinations.len());
        Ok(Self { destinations })
    }

    /// All destinations in catalog order
    #[must_use]
    pub fn list_all(&self) -> &[Destination] {
        &self.destinations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Look up a destination by id
    pub fn get_by_id(&self, id: &str) -> Result<&Destination> {
        self.destinations
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| TravelGuideError::not_found("destination", id))
    }

    /// Destinations matching a free-text query and carrying every tag in
    /// `tags`, in catalog order.
    ///
    /// The query is a case-insensitive substring match against name,
    /// location, description and tags; an empty query matches everything.
    pub fn search<S: AsRef<str>>(&self, query: &str, tags: &[S]) -> Vec<&Destination> {
        let query = query.to_lowercase();

        let results: Vec<&Destination> = self
            .destinations
            .iter()
            .filter(|d| query.is_empty() || matches_text(d, &query))
            .filter(|d| tags.iter().all(|tag| d.has_tag(tag.as_ref())))
            .collect();

        debug!(
            "Search '{}' with {} tag(s) matched {} destination(s)",
            query,
            tags.len(),
            results.len()
        );
        results
    }

    /// Up to `count` distinct destinations in random order
    pub fn sample_random<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&Destination> {
        let mut shuffled: Vec<&Destination> = self.destinations.iter().collect();
        shuffled.shuffle(rng);
        shuffled.truncate(count);
        shuffled
    }

    /// Every distinct tag, sorted
    #[must_use]
    pub fn all_tags(&self) -> Vec<&str> {
        self.destinations
            .iter()
            .flat_map(|d| d.tags.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Destinations within `radius_km` of `center`, closest first
    #[must_use]
    pub fn within_radius(&self, center: &Coordinates, radius_km: f64) -> Vec<(&Destination, f64)> {
        let mut results: Vec<(&Destination, f64)> = self
            .destinations
            .iter()
            .map(|d| {
                let distance = haversine_distance_km(
                    center.latitude,
                    center.longitude,
                    d.coordinates.latitude,
                    d.coordinates.longitude,
                );
                (d, distance)
            })
            .filter(|(_, distance)| *distance <= radius_km)
            .collect();

        results.sort_by(|a, b| a.1.total_cmp(&b.1));
        results
    }
}

fn matches_text(destination: &Destination, query: &str) -> bool {
    destination.name.to_lowercase().contains(query)
        || destination.location.to_lowercase().contains(query)
        || destination.description.to_lowercase().contains(query)
        || destination
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}
