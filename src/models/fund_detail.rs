use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::Display;

use super::RiskLevel;

/// Synthetic profile returned by a fund lookup.
#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct FundDetail {
    code: String,
    name: String,
    fund_type: String,
    nav: Decimal,
    returns: PeriodReturns,
    stats: RiskStats,
    risk_level: RiskLevel,
    manager: String,
    establish_date: NaiveDate,
    nav_history: Vec<NavPoint>,
    top_holdings: Vec<TopHolding>,
    recommendation: Recommendation,
    score: u8,
}

#[derive(Clone, Copy, Debug, Getters, PartialEq, Serialize, new)]
pub struct PeriodReturns {
    change_1d: f64,
    change_1w: f64,
    change_1m: f64,
    change_3m: f64,
    change_6m: f64,
    change_1y: f64,
    change_ytd: f64,
}

#[derive(Clone, Copy, Debug, Getters, PartialEq, Serialize, new)]
pub struct RiskStats {
    sharpe: f64,
    max_drawdown: f64,
    fund_size: f64,
    volatility: f64,
    beta: f64,
    alpha: f64,
    info_ratio: f64,
    tracking_error: f64,
}

#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct NavPoint {
    date: NaiveDate,
    nav: Decimal,
    return_rate: f64,
}

#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct TopHolding {
    name: String,
    percent: f64,
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum Recommendation {
    #[strum(to_string = "buy")]
    Buy,
    #[strum(to_string = "watch")]
    Watch,
    #[strum(to_string = "cautious")]
    Cautious,
    #[strum(to_string = "avoid")]
    Avoid,
}

impl Recommendation {
    pub fn from_score(score: f64) -> Self {
        if score > 50.0 {
            Recommendation::Buy
        } else if score > 30.0 {
            Recommendation::Watch
        } else if score > 10.0 {
            Recommendation::Cautious
        } else {
            Recommendation::Avoid
        }
    }
}
