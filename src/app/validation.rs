//! Form-level checks run before any ledger mutation. The ledger itself trusts
//! its inputs, so everything a user types goes through here first.

use derive_getters::Getters;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

use crate::models::TradeType;

use super::{calc::MAX_FIGURE, utils::parse_decimal};

pub const MIN_LOOKUP_CODE_LEN: usize = 4;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("fund code is required")]
    EmptyCode,
    #[error("fund code must be at least {0} characters")]
    CodeTooShort(usize),
    #[error("{field} is not a number: '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} is too large to record")]
    OutOfRange(&'static str),
    #[error("amount {amount} exceeds available cash {available}")]
    InsufficientCash { amount: Decimal, available: Decimal },
    #[error("fund {0} is already in the comparison list")]
    DuplicateCustomFund(String),
}

#[derive(Clone, Debug, Getters, PartialEq)]
pub struct BuyOrder {
    code: String,
    amount: Decimal,
    nav: Decimal,
}

#[derive(Clone, Debug, Getters, PartialEq)]
pub struct SellOrder {
    code: String,
    shares: Decimal,
    nav: Decimal,
}

/// One replayed row of an imported trade file.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct TradeRow {
    trade_type: TradeType,
    code: String,
    quantity: Decimal,
    nav: Decimal,
}

pub fn validate_code(code: &str) -> Result<String, ValidationError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::EmptyCode);
    }
    Ok(code.to_string())
}

pub fn validate_lookup_code(code: &str) -> Result<String, ValidationError> {
    let code = validate_code(code)?;
    if code.chars().count() < MIN_LOOKUP_CODE_LEN {
        return Err(ValidationError::CodeTooShort(MIN_LOOKUP_CODE_LEN));
    }
    Ok(code)
}

fn positive(field: &'static str, value: &str) -> Result<Decimal, ValidationError> {
    let parsed = parse_decimal(value, field).map_err(|_| ValidationError::NotANumber {
        field,
        value: value.to_string(),
    })?;
    require_positive(field, parsed)
}

fn require_positive(field: &'static str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(field));
    }
    within_range(field, Some(value))
}

/// `None` stands for an arithmetic overflow upstream.
fn within_range(field: &'static str, value: Option<Decimal>) -> Result<Decimal, ValidationError> {
    value
        .filter(|v| v.abs() <= MAX_FIGURE)
        .ok_or(ValidationError::OutOfRange(field))
}

/// Shares bought by `amount` at `nav` must stay within range.
fn check_buy_shares(amount: Decimal, nav: Decimal) -> Result<(), ValidationError> {
    within_range("shares", amount.checked_div(nav)).map(|_| ())
}

/// Proceeds of selling `shares` at `nav` must stay within range.
fn check_sell_amount(shares: Decimal, nav: Decimal) -> Result<(), ValidationError> {
    within_range("amount", shares.checked_mul(nav)).map(|_| ())
}

/// A missing, unparseable or non-positive NAV is replaced by 1 so share
/// arithmetic never divides by zero.
pub fn nav_or_default(nav: &str) -> Decimal {
    match parse_decimal(nav, "nav") {
        Ok(value) if value > Decimal::ZERO => value,
        _ => Decimal::ONE,
    }
}

/// Rejects purchases larger than the cash currently available. This is a
/// conservative proxy: cash is measured against principal, not market value.
pub fn validate_buy(
    code: &str,
    amount: &str,
    nav: &str,
    cash_available: Decimal,
) -> Result<BuyOrder, ValidationError> {
    let code = validate_code(code)?;
    let amount = positive("amount", amount)?;
    if amount > cash_available {
        return Err(ValidationError::InsufficientCash {
            amount,
            available: cash_available,
        });
    }

    let nav = nav_or_default(nav);
    check_buy_shares(amount, nav)?;

    Ok(BuyOrder { code, amount, nav })
}

pub fn validate_sell(code: &str, shares: &str, nav: &str) -> Result<SellOrder, ValidationError> {
    let code = validate_code(code)?;
    let shares = positive("shares", shares)?;
    let nav = nav_or_default(nav);
    check_sell_amount(shares, nav)?;

    Ok(SellOrder { code, shares, nav })
}

pub fn validate_total_assets(value: &str) -> Result<Decimal, ValidationError> {
    positive("total assets", value)
}

/// Checks an already parsed import row. Unlike a typed-in buy there is no
/// cash limit, but quantity and NAV must both be positive.
pub fn validate_trade_row(
    trade_type: TradeType,
    code: &str,
    quantity: Decimal,
    nav: Decimal,
) -> Result<TradeRow, ValidationError> {
    let code = validate_code(code)?;
    let nav = require_positive("nav", nav)?;
    let quantity = match trade_type {
        TradeType::Buy => {
            let amount = require_positive("amount", quantity)?;
            check_buy_shares(amount, nav)?;
            amount
        }
        TradeType::Sell => {
            let shares = require_positive("shares", quantity)?;
            check_sell_amount(shares, nav)?;
            shares
        }
    };

    Ok(TradeRow {
        trade_type,
        code,
        quantity,
        nav,
    })
}

/// Alert thresholds for a watch item. Each is optional; a given one must be a
/// positive number.
pub fn validate_alerts(
    nav_below: Option<&str>,
    gain_above: Option<&str>,
) -> Result<(Option<Decimal>, Option<f64>), ValidationError> {
    let nav_below = nav_below.map(|v| positive("alert NAV", v)).transpose()?;
    let gain_above = gain_above
        .map(|v| positive("alert gain", v))
        .transpose()?
        .map(|gain| gain.to_f64().unwrap_or(0.0));
    Ok((nav_below, gain_above))
}
