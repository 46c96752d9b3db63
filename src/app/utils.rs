use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, prelude::FromPrimitive};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(field.trim(), "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date '{}'", field))
}

pub fn parse_decimal(field: &str, field_name: &str) -> Result<Decimal> {
    field
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Failed to parse {} '{}'", field_name, field))
}

/// Scales `value` by a float factor, leaving it unchanged if the factor has
/// no decimal representation or the product overflows.
pub fn scale(value: Decimal, factor: f64) -> Decimal {
    Decimal::from_f64(factor)
        .and_then(|factor| value.checked_mul(factor))
        .unwrap_or(value)
}

pub fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}
