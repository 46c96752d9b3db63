use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{AllocationSegment, Holding, PortfolioSummary, TodayOverview};

/// Residual share count at or below which a sold-down holding is closed.
pub const DUST_SHARES: Decimal = dec!(0.01);
/// Crude daily to monthly extrapolation used for the monthly profit figure.
pub const TRADING_DAYS_PER_MONTH: Decimal = dec!(22);
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// Largest amount, share count or value a single typed-in or imported trade
/// may carry.
pub const MAX_FIGURE: Decimal = dec!(1000000000000000);

const OVERVIEW_RANK_LEN: usize = 3;

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn rate(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(Decimal::ZERO)
}

/// Sums without overflowing; totals pin at the representable bounds.
fn total(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

pub fn round_dp(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

pub fn total_fund_value(holdings: &[Holding]) -> Decimal {
    total(holdings.iter().map(|h| *h.current_value()))
}

pub fn total_principal(holdings: &[Holding]) -> Decimal {
    total(holdings.iter().map(|h| *h.buy_amount()))
}

/// May go negative when more principal is invested than total assets.
pub fn cash_available(total_assets: Decimal, holdings: &[Holding]) -> Decimal {
    total_assets.saturating_sub(total_principal(holdings))
}

pub fn monthly_profit(holdings: &[Holding]) -> Decimal {
    total(holdings.iter().map(|h| *h.today_profit())).saturating_mul(TRADING_DAYS_PER_MONTH)
}

pub fn yearly_profit(holdings: &[Holding]) -> Decimal {
    total(holdings.iter().map(|h| *h.profit()))
}

pub fn summary(total_assets: Decimal, holdings: &[Holding]) -> PortfolioSummary {
    PortfolioSummary::new(
        total_assets,
        total_fund_value(holdings),
        cash_available(total_assets, holdings),
        monthly_profit(holdings),
        yearly_profit(holdings),
    )
}

pub fn today_overview(holdings: &[Holding]) -> TodayOverview {
    let today_profit = total(holdings.iter().map(|h| *h.today_profit()));
    let yesterday_profit = total(holdings.iter().map(|h| *h.yesterday_profit()));
    let total_cost = total_principal(holdings);
    let total_profit = yearly_profit(holdings);

    let mut ranked: Vec<Holding> = holdings.to_vec();
    ranked.sort_by(|a, b| b.today_profit().cmp(a.today_profit()));
    let top: Vec<Holding> = ranked.iter().take(OVERVIEW_RANK_LEN).cloned().collect();
    let bottom: Vec<Holding> = ranked.iter().rev().take(OVERVIEW_RANK_LEN).cloned().collect();

    TodayOverview::new(
        today_profit,
        yesterday_profit,
        today_profit.saturating_sub(yesterday_profit),
        rate(today_profit, total_cost),
        total_fund_value(holdings),
        total_cost,
        total_profit,
        rate(total_profit, total_cost),
        holdings.len(),
        top,
        bottom,
    )
}

/// Current value per fund type as a share of total assets, followed by cash.
/// Fund types keep first-seen order.
pub fn allocation(total_assets: Decimal, holdings: &[Holding]) -> Vec<AllocationSegment> {
    let mut order: Vec<&str> = Vec::new();
    let mut amounts: HashMap<&str, Decimal> = HashMap::new();

    for holding in holdings {
        let fund_type = holding.fund_type().as_str();
        if !amounts.contains_key(fund_type) {
            order.push(fund_type);
        }
        let amount = amounts.entry(fund_type).or_insert(Decimal::ZERO);
        *amount = amount.saturating_add(*holding.current_value());
    }

    let mut segments: Vec<AllocationSegment> = order
        .into_iter()
        .map(|fund_type| {
            let amount = amounts.get(fund_type).copied().unwrap_or(Decimal::ZERO);
            AllocationSegment::new(
                fund_type.to_string(),
                amount,
                rate(amount, total_assets),
                false,
            )
        })
        .collect();

    let cash = cash_available(total_assets, holdings);
    segments.push(AllocationSegment::new(
        String::from("Cash"),
        cash,
        rate(cash, total_assets).max(Decimal::ZERO),
        true,
    ));

    segments
}

/// Average of the last two daily profits projected over a week, then over a
/// year, as a percentage of principal.
pub fn seven_day_annualized(holding: &Holding) -> Decimal {
    let weekly = holding
        .today_profit()
        .saturating_add(*holding.yesterday_profit())
        .saturating_mul(dec!(3.5));
    rate(weekly, *holding.buy_amount()).saturating_mul(dec!(365)) / dec!(7)
}
