//! Time-of-day heuristics for crowds, transport and visit timing

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use rand::{Rng, RngExt};

use crate::models::{AvailabilityStatus, CrowdBand, CrowdLevel, TransportAvailability};

fn is_weekend(now: &NaiveDateTime) -> bool {
    matches!(now.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Crowd band for a moment, before sampling the percentage
#[must_use]
pub fn crowd_band_at(now: &NaiveDateTime) -> CrowdBand {
    let hour = now.hour();
    if is_weekend(now) {
        match hour {
            10..=16 => CrowdBand::VeryHigh,
            8..=9 | 17..=18 => CrowdBand::High,
            _ => CrowdBand::Moderate,
        }
    } else {
        match hour {
            11..=14 => CrowdBand::High,
            9..=17 => CrowdBand::Moderate,
            _ => CrowdBand::Low,
        }
    }
}

/// Estimated crowd, with the percentage drawn uniformly from the band
pub fn estimate_crowd_level<R: Rng + ?Sized>(now: &NaiveDateTime, rng: &mut R) -> CrowdLevel {
    let level = crowd_band_at(now);
    let (low, high) = level.range();
    CrowdLevel {
        level,
        percentage: rng.random_range(low..=high),
        text: level.text().to_string(),
    }
}

/// Availability of local transport at this time of day
pub fn estimate_transport_availability<R: Rng + ?Sized>(
    now: &NaiveDateTime,
    rng: &mut R,
) -> TransportAvailability {
    let hour = now.hour();
    let rush_hour = (7..=10).contains(&hour) || (16..=19).contains(&hour);
    let late_night = hour >= 23 || hour <= 5;

    let status = if rush_hour {
        if rng.random_bool(0.3) {
            AvailabilityStatus::Medium
        } else {
            AvailabilityStatus::Low
        }
    } else if late_night {
        if rng.random_bool(0.2) {
            AvailabilityStatus::Medium
        } else {
            AvailabilityStatus::Low
        }
    } else if rng.random_bool(0.4) {
        AvailabilityStatus::High
    } else {
        AvailabilityStatus::Medium
    };

    status.into()
}

/// Advice on when to visit, given the current local time
#[must_use]
pub fn recommend_visit_time(now: &NaiveDateTime) -> &'static str {
    let hour = now.hour();
    if is_weekend(now) {
        match hour {
            0..=5 => "Arrive right at opening time to beat the weekend rush",
            6..=9 => "Early weekend mornings are the calmest time to visit",
            10..=11 => "Weekend crowds are building up quickly now",
            12..=14 => "Peak weekend crowds - consider visiting a nearby attraction first",
            15..=17 => "Weekend crowds begin to thin out in the late afternoon",
            _ => "Weekend evenings are lively but less crowded at the main sights",
        }
    } else {
        match hour {
            0..=5 => "Best to visit after sunrise around 6-7 AM for fewer crowds",
            6..=9 => "Morning is a great time to visit with moderate crowds",
            10..=11 => "Late morning currently has moderate to high crowds",
            12..=14 => "Early afternoon typically has the highest crowds",
            15..=17 => "Late afternoon is better as crowds start to reduce",
            _ => "Evening visits offer a different atmosphere with lower crowds",
        }
    }
}
