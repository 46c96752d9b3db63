use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Holding;

/// Portfolio-wide figures derived from holdings and total assets.
#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct PortfolioSummary {
    total_assets: Decimal,
    total_fund_value: Decimal,
    cash_available: Decimal,
    monthly_profit: Decimal,
    yearly_profit: Decimal,
}

#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct TodayOverview {
    today_profit: Decimal,
    yesterday_profit: Decimal,
    profit_diff: Decimal,
    today_rate: Decimal,
    total_value: Decimal,
    total_cost: Decimal,
    total_profit: Decimal,
    total_profit_rate: Decimal,
    fund_count: usize,
    top: Vec<Holding>,
    bottom: Vec<Holding>,
}

#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct AllocationSegment {
    label: String,
    amount: Decimal,
    percent: Decimal,
    is_cash: bool,
}
