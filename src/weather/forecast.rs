//! Reduction of hourly forecast samples to a short daily outlook

use chrono::{DateTime, Datelike, FixedOffset, Weekday};

use crate::models::ForecastDay;

/// Number of distinct days in the short outlook
pub const FORECAST_DAYS: usize = 3;

/// One forecast sample as returned by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    /// Sample time in the destination's UTC offset
    pub timestamp: DateTime<FixedOffset>,
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}

/// Pick the first sample of each new day of week, in input order, until
/// three days are collected.
#[must_use]
pub fn select_forecast_days(samples: &[ForecastSample]) -> Vec<ForecastDay> {
    let mut seen: Vec<Weekday> = Vec::with_capacity(FORECAST_DAYS);
    let mut days = Vec::with_capacity(FORECAST_DAYS);

    for sample in samples {
        if days.len() == FORECAST_DAYS {
            break;
        }
        let weekday = sample.timestamp.weekday();
        if seen.contains(&weekday) {
            continue;
        }
        seen.push(weekday);
        days.push(ForecastDay {
            day: sample.timestamp.format("%A").to_string(),
            temperature: sample.temperature.round() as i32,
            condition: sample.condition.clone(),
            icon: sample.icon.clone(),
        });
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(day: u32, hour: u32, temperature: f64) -> ForecastSample {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        ForecastSample {
            // 2024-03-04 is a Monday
            timestamp: ist.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            temperature,
            condition: "Clear".to_string(),
            icon: "01d".to_string(),
        }
    }

    #[test]
    fn test_picks_first_sample_per_day() {
        let samples = vec![
            sample(4, 9, 21.4),
            sample(4, 12, 30.0),
            sample(5, 0, 18.6),
            sample(5, 3, 17.0),
            sample(6, 6, 25.5),
            sample(7, 6, 26.0),
        ];
        let days = select_forecast_days(&samples);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].day, "Monday");
        assert_eq!(days[0].temperature, 21);
        assert_eq!(days[1].day, "Tuesday");
        assert_eq!(days[1].temperature, 19);
        assert_eq!(days[2].day, "Wednesday");
        assert_eq!(days[2].temperature, 26);
    }

    #[test]
    fn test_fewer_days_than_limit() {
        let samples = vec![sample(4, 9, 20.0), sample(4, 21, 15.0)];
        let days = select_forecast_days(&samples);
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn test_repeated_weekday_is_skipped_even_when_out_of_order() {
        let samples = vec![
            sample(4, 9, 20.0),
            sample(5, 9, 21.0),
            sample(4, 18, 22.0),
            sample(6, 9, 23.0),
        ];
        let days: Vec<String> = select_forecast_days(&samples)
            .into_iter()
            .map(|d| d.day)
            .collect();
        assert_eq!(days, vec!["Monday", "Tuesday", "Wednesday"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(select_forecast_days(&[]).is_empty());
    }
}
