//! Per-fund, per-holding and portfolio-wide return series, and the sync
//! calendar. The raw series come from the market-data provider; this module
//! shapes them for display.

use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use strum_macros::{Display, EnumString};

use crate::models::{EarningsPoint, FundNavPoint, Holding, SyncedFund, WatchItem};

use super::{calc::round_dp, curve::annualize};

pub const EARNINGS_DAYS: usize = 365;
pub const TOTAL_RETURN_DAYS: usize = 365;
pub const SYNC_HISTORY_DAYS: u64 = 30;

#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
pub enum HistoryPeriod {
    #[strum(serialize = "1m")]
    OneMonth,
    #[strum(serialize = "3m")]
    ThreeMonths,
    #[strum(serialize = "6m")]
    SixMonths,
    #[default]
    #[strum(serialize = "1y")]
    OneYear,
    #[strum(serialize = "all")]
    SinceInception,
}

impl HistoryPeriod {
    pub fn days(&self) -> usize {
        match self {
            HistoryPeriod::OneMonth => 30,
            HistoryPeriod::ThreeMonths => 90,
            HistoryPeriod::SixMonths => 180,
            HistoryPeriod::OneYear => 365,
            HistoryPeriod::SinceInception => 730,
        }
    }
}

/// First day of a `days`-long series ending the day before `today`.
pub fn series_start(today: NaiveDate, days: usize) -> NaiveDate {
    today
        .checked_sub_days(Days::new(days as u64))
        .unwrap_or(today)
}

/// Rescales each cumulative return of a `days`-long series to an annual rate.
pub fn annualized(points: Vec<FundNavPoint>, days: usize) -> Vec<FundNavPoint> {
    points
        .into_iter()
        .map(|p| {
            FundNavPoint::new(
                *p.date(),
                *p.nav(),
                annualize(*p.cumulative_return(), days),
                annualize(*p.csi300_return(), days),
            )
        })
        .collect()
}

/// What the holding's principal would have earned along `points`.
pub fn earnings(holding: &Holding, points: &[FundNavPoint]) -> Vec<EarningsPoint> {
    let principal = holding.buy_amount().to_f64().unwrap_or(0.0);
    points
        .iter()
        .map(|p| {
            EarningsPoint::new(
                *p.date(),
                round_dp(p.cumulative_return() * principal / 100.0, 2),
                *p.cumulative_return(),
            )
        })
        .collect()
}

fn quote(code: &str, name: &str, nav: Decimal, change: f64) -> SyncedFund {
    SyncedFund::new(
        code.to_string(),
        name.to_string(),
        nav.to_f64().unwrap_or(0.0),
        change,
    )
}

/// Current quotes of every held and watched fund, holdings first.
pub fn current_quotes(holdings: &[Holding], watchlist: &[WatchItem]) -> Vec<SyncedFund> {
    let held = holdings.iter().map(|h| {
        quote(
            h.code(),
            h.name(),
            *h.current_nav(),
            h.today_profit_rate().to_f64().unwrap_or(0.0),
        )
    });
    let watched = watchlist
        .iter()
        .map(|w| quote(w.code(), w.name(), *w.current_nav(), w.change_1d()));
    held.chain(watched).collect()
}
