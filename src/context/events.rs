//! Illustrative local events for a destination city

use chrono::{Datelike, NaiveDateTime};

use rand::seq::IndexedRandom;
use rand::{Rng, RngExt};

use crate::models::{EventType, LocalEvent};

const MIN_EVENTS: usize = 3;
const MAX_EVENTS: usize = 5;
const PRIMARY_WEIGHT: f64 = 0.7;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Event types a city is known for, most prominent first
fn city_profile(city: &str) -> (EventType, EventType) {
    let city = city.to_lowercase();
    if city.contains("agra") {
        (EventType::Cultural, EventType::Art)
    } else if city.contains("delhi") {
        (EventType::Food, EventType::Cultural)
    } else if city.contains("jaipur") {
        (EventType::Cultural, EventType::Art)
    } else if city.contains("kerala") || city.contains("alleppey") || city.contains("kochi") {
        (EventType::Cultural, EventType::Food)
    } else if city.contains("varanasi") {
        (EventType::Religious, EventType::Cultural)
    } else {
        (EventType::Cultural, EventType::Religious)
    }
}

fn event_names(event_type: EventType) -> &'static [&'static str] {
    match event_type {
        EventType::Cultural => &[
            "Heritage Walk",
            "Classical Music Evening",
            "Folk Dance Performance",
            "Storytelling Night",
            "Craft Bazaar",
        ],
        EventType::Religious => &[
            "Evening Aarti",
            "Temple Festival",
            "Devotional Music Gathering",
            "Sacred River Procession",
        ],
        EventType::Food => &[
            "Street Food Festival",
            "Spice Market Tour",
            "Regional Cooking Class",
            "Sweets Fair",
        ],
        EventType::Art => &[
            "Miniature Painting Exhibition",
            "Artisan Workshop",
            "Photography Exhibition",
            "Block Printing Demonstration",
        ],
    }
}

/// Three to five events in the current month, ordered by day.
///
/// Returns `None` when no city is given.
pub fn generate_local_events<R: Rng + ?Sized>(
    city: &str,
    now: &NaiveDateTime,
    rng: &mut R,
) -> Option<Vec<LocalEvent>> {
    if city.trim().is_empty() {
        return None;
    }

    let (primary, secondary) = city_profile(city);
    let month = MONTHS[now.month0() as usize];
    let count = rng.random_range(MIN_EVENTS..=MAX_EVENTS);

    let mut events: Vec<(u32, LocalEvent)> = (0..count)
        .map(|_| {
            let event_type = if rng.random_bool(PRIMARY_WEIGHT) {
                primary
            } else {
                secondary
            };
            let name = event_names(event_type).choose(&mut *rng).copied().unwrap_or_default();
            let day: u32 = rng.random_range(1..=28);
            (
                day,
                LocalEvent {
                    name: name.to_string(),
                    date: format!("{month} {day}"),
                    event_type,
                },
            )
        })
        .collect();

    events.sort_by_key(|(day, _)| *day);
    Some(events.into_iter().map(|(_, event)| event).collect())
}
