//! Currency conversion against a static rate table

use tracing::debug;

use crate::models::CurrencyRateTable;
use crate::{Result, TravelGuideError};

/// Parse user-entered amount text; anything unparsable counts as zero
#[must_use]
pub fn parse_amount(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn lookup(table: &CurrencyRateTable, code: &str) -> Result<f64> {
    table
        .rate_for(code)
        .filter(|rate| *rate > 0.0)
        .ok_or_else(|| TravelGuideError::validation(format!("Unsupported currency '{code}'")))
}

/// Units of `to` per one unit of `from`
pub fn rate(from: &str, to: &str, table: &CurrencyRateTable) -> Result<f64> {
    let from = from.trim().to_ascii_uppercase();
    let to = to.trim().to_ascii_uppercase();

    let from_rate = lookup(table, &from)?;
    let to_rate = lookup(table, &to)?;
    if from == to {
        return Ok(1.0);
    }

    let unit = if table.is_base(&from) {
        to_rate
    } else if table.is_base(&to) {
        1.0 / from_rate
    } else {
        to_rate / from_rate
    };
    Ok(unit)
}

/// Convert `amount` between two currencies, rounded to two decimals
pub fn convert(amount: f64, from: &str, to: &str, table: &CurrencyRateTable) -> Result<f64> {
    let unit = rate(from, to, table)?;
    let converted = round_cents(amount * unit);
    debug!("Converted {} {} to {} {}", amount, from, converted, to);
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn table() -> CurrencyRateTable {
        CurrencyRateTable {
            base: "USD".to_string(),
            rates: BTreeMap::from([
                ("USD".to_string(), 1.0),
                ("INR".to_string(), 75.42),
                ("EUR".to_string(), 0.85),
                ("GBP".to_string(), 0.73),
                ("JPY".to_string(), 110.21),
            ]),
            last_updated: Utc::now(),
        }
    }

    #[rstest]
    #[case(100.0, "USD", "INR", 7542.00)]
    #[case(100.0, "INR", "USD", 1.33)]
    #[case(100.0, "EUR", "INR", 8872.94)]
    #[case(1.0, "GBP", "EUR", 1.16)]
    #[case(0.0, "USD", "JPY", 0.0)]
    fn test_convert(
        #[case] amount: f64,
        #[case] from: &str,
        #[case] to: &str,
        #[case] expected: f64,
    ) {
        let converted = convert(amount, from, to, &table()).unwrap();
        assert!((converted - expected).abs() < 1e-9, "got {converted}");
    }

    #[test]
    fn test_same_currency_returns_amount() {
        assert_eq!(convert(42.5, "INR", "INR", &table()).unwrap(), 42.5);
    }

    #[test]
    fn test_codes_are_case_insensitive() {
        assert_eq!(convert(100.0, "usd", " inr ", &table()).unwrap(), 7542.0);
    }

    #[test]
    fn test_lowercase_base_is_recognized() {
        let table = CurrencyRateTable {
            base: "usd".to_string(),
            rates: BTreeMap::from([("inr".to_string(), 75.42), ("EUR".to_string(), 0.85)]),
            last_updated: Utc::now(),
        };
        assert_eq!(rate("USD", "USD", &table).unwrap(), 1.0);
        assert_eq!(convert(100.0, "USD", "INR", &table).unwrap(), 7542.0);
        assert_eq!(convert(100.0, "INR", "usd", &table).unwrap(), 1.33);
        assert_eq!(convert(100.0, "EUR", "INR", &table).unwrap(), 8872.94);
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let err = convert(10.0, "USD", "XYZ", &table()).unwrap_err();
        assert!(matches!(err, TravelGuideError::Validation { .. }));
        assert!(convert(10.0, "XYZ", "XYZ", &table()).is_err());
    }

    #[test]
    fn test_unit_rate() {
        assert!((rate("USD", "INR", &table()).unwrap() - 75.42).abs() < 1e-12);
        assert!((rate("INR", "USD", &table()).unwrap() - 1.0 / 75.42).abs() < 1e-12);
    }

    #[rstest]
    #[case("100", 100.0)]
    #[case(" 12.5 ", 12.5)]
    #[case("", 0.0)]
    #[case("abc", 0.0)]
    #[case("NaN", 0.0)]
    fn test_parse_amount(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse_amount(input), expected);
    }
}
