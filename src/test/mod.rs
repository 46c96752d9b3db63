mod benchmarks;
mod curve;
mod history;
mod lookup;
mod market_data;
mod render;
mod trade_csv;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    models::{DailyReturn, FundNavPoint, SyncRecord, SyncedFund, WatchItem},
    services::{MarketDataProvider, SyntheticProvider},
};

/// Quotes new holdings at exactly their purchase NAV and moves prices by a
/// fixed step, so expected figures can be written down.
pub struct PinnedProvider {
    pub step: Decimal,
    inner: SyntheticProvider,
}

impl PinnedProvider {
    pub fn new(step: Decimal) -> Self {
        Self {
            step,
            inner: SyntheticProvider::seeded(7),
        }
    }
}

impl MarketDataProvider for PinnedProvider {
    fn quote_for_new_holding(&mut self, nav: Decimal) -> Decimal {
        nav
    }

    fn next_nav(&mut self, current: Decimal) -> Decimal {
        current + self.step
    }

    fn nav_history(&mut self, nav: Decimal, len: usize) -> Vec<Decimal> {
        vec![nav; len]
    }

    fn watch_profile(&mut self, code: &str, name: &str, today: NaiveDate) -> WatchItem {
        self.inner.watch_profile(code, name, today)
    }

    fn fund_history(&mut self, start: NaiveDate, days: usize) -> Vec<FundNavPoint> {
        self.inner.fund_history(start, days)
    }

    fn total_return_history(
        &mut self,
        start: NaiveDate,
        days: usize,
        principal: f64,
    ) -> Vec<DailyReturn> {
        self.inner.total_return_history(start, days, principal)
    }

    fn sync_history(
        &mut self,
        today: NaiveDate,
        days: u64,
        funds: &[SyncedFund],
    ) -> Vec<SyncRecord> {
        self.inner.sync_history(today, days, funds)
    }
}
