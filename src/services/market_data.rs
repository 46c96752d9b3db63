use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::{
    app::{benchmarks::default_fund_name, calc::round_dp, utils::scale},
    models::{
        DailyReturn, FundNavPoint, RiskLevel, SyncRecord, SyncedFund, WatchItem,
        holding::UNKNOWN_FUND_TYPE, watch_item::NAV_HISTORY_LEN,
    },
};

/// Annual deposit rate, in percent, that total returns are compared against.
pub const DEPOSIT_RATE_PCT: f64 = 2.5;

/// Share of weekdays on which the simulated sync fails.
const SYNC_FAILURE_RATE: f64 = 0.2;

/// Source of simulated quotes. The ledger draws every price it needs from
/// here instead of generating randomness itself.
pub trait MarketDataProvider {
    /// Current NAV of a fund bought for the first time at `nav`.
    fn quote_for_new_holding(&mut self, nav: Decimal) -> Decimal;

    /// NAV one trading day after `current`.
    fn next_nav(&mut self, current: Decimal) -> Decimal;

    /// Recent NAV series ending near `nav`, oldest first.
    fn nav_history(&mut self, nav: Decimal, len: usize) -> Vec<Decimal>;

    /// Descriptive and risk figures for a fund that is not held.
    fn watch_profile(&mut self, code: &str, name: &str, today: NaiveDate) -> WatchItem;

    /// Daily NAV series of a held fund for `days` days from `start`, with the
    /// CSI 300 alongside. Both start from 1.
    fn fund_history(&mut self, start: NaiveDate, days: usize) -> Vec<FundNavPoint>;

    /// Running portfolio profit for `days` days from `start`, measured
    /// against `principal`.
    fn total_return_history(
        &mut self,
        start: NaiveDate,
        days: usize,
        principal: f64,
    ) -> Vec<DailyReturn>;

    /// The last `days` days of syncs up to `today`, oldest first. `funds`
    /// are the current quotes; older days drift further from them.
    fn sync_history(&mut self, today: NaiveDate, days: u64, funds: &[SyncedFund])
    -> Vec<SyncRecord>;
}

/// Random-walk quotes for demos and tests.
#[derive(Clone, Debug)]
pub struct SyntheticProvider {
    rng: StdRng,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                debug!(seed, "using seeded market data");
                Self::seeded(seed)
            }
            None => Self::new(),
        }
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Uniform value in `[-width/2, width/2)`, rounded to two decimals.
    fn spread(&mut self, width: f64) -> f64 {
        self.spread_around(width, 0.5)
    }

    fn spread_around(&mut self, width: f64, centre: f64) -> f64 {
        round_dp((self.unit() - centre) * width, 2)
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for SyntheticProvider {
    fn quote_for_new_holding(&mut self, nav: Decimal) -> Decimal {
        let jitter = (self.unit() - 0.48) * 0.05;
        scale(nav, 1.0 + jitter).round_dp(4)
    }

    fn next_nav(&mut self, current: Decimal) -> Decimal {
        let step = (self.unit() - 0.48) * 0.04;
        scale(current, 1.0 + step).round_dp(4)
    }

    fn nav_history(&mut self, nav: Decimal, len: usize) -> Vec<Decimal> {
        let mut value = scale(nav, 0.92);
        (0..len)
            .map(|_| {
                let step = (self.unit() - 0.47) * 0.03;
                value = scale(value, 1.0 + step).round_dp(8);
                value.round_dp(4)
            })
            .collect()
    }

    fn watch_profile(&mut self, code: &str, name: &str, today: NaiveDate) -> WatchItem {
        let nav = scale(Decimal::ONE, 1.0 + self.unit()).round_dp(4);
        let name = if name.trim().is_empty() {
            default_fund_name(code)
        } else {
            name.trim().to_string()
        };
        let risk_index = self.rng.gen_range(0..RiskLevel::iter().len());
        let risk_level = RiskLevel::iter().nth(risk_index).unwrap_or_default();

        let change_1d = self.spread(4.0);
        let change_1w = self.spread(6.0);
        let change_1m = self.spread(10.0);
        let change_3m = self.spread(20.0);
        let change_6m = self.spread(25.0);
        let change_1y = self.spread(30.0);
        let change_ytd = self.spread(15.0);
        let sharpe_ratio = round_dp(self.unit() * 2.0, 2);
        let max_drawdown = round_dp(-(self.unit() * 40.0 + 5.0), 1);
        let fund_size = (self.unit() * 500.0 + 10.0).round();
        let nav_history = self.nav_history(nav, NAV_HISTORY_LEN);

        WatchItem::new(
            code.to_string(),
            name,
            UNKNOWN_FUND_TYPE.to_string(),
            nav,
            Some(change_1d),
            Some(change_1w),
            change_1m,
            change_3m,
            Some(change_6m),
            change_1y,
            Some(change_ytd),
            today,
            Vec::new(),
            None,
            None,
            risk_level,
            Some(sharpe_ratio),
            Some(max_drawdown),
            Some(fund_size),
            String::from("Unknown"),
            nav_history,
        )
    }

    fn fund_history(&mut self, start: NaiveDate, days: usize) -> Vec<FundNavPoint> {
        let mut nav = 1.0;
        let mut csi300 = 1.0;
        start
            .iter_days()
            .take(days)
            .map(|date| {
                nav *= 1.0 + (self.unit() - 0.48) * 0.03;
                csi300 *= 1.0 + (self.unit() - 0.49) * 0.025;
                FundNavPoint::new(
                    date,
                    round_dp(nav, 4),
                    round_dp((nav - 1.0) * 100.0, 2),
                    round_dp((csi300 - 1.0) * 100.0, 2),
                )
            })
            .collect()
    }

    fn total_return_history(
        &mut self,
        start: NaiveDate,
        days: usize,
        principal: f64,
    ) -> Vec<DailyReturn> {
        let mut total_profit = 0.0;
        start
            .iter_days()
            .take(days)
            .enumerate()
            .map(|(i, date)| {
                let day = i as f64;
                total_profit += (self.unit() - 0.45) * 1200.0;
                let total_rate = if principal > 0.0 {
                    total_profit / principal * 100.0
                } else {
                    0.0
                };
                let csi300 = (self.unit() - 0.49) * 100.0 + day * 0.05;
                let deposit = day * (DEPOSIT_RATE_PCT / 365.0) * (principal / 100.0);
                DailyReturn::new(
                    date,
                    round_dp(total_profit, 2),
                    round_dp(total_rate, 2),
                    round_dp(csi300, 2),
                    round_dp(deposit, 2),
                )
            })
            .collect()
    }

    fn sync_history(
        &mut self,
        today: NaiveDate,
        days: u64,
        funds: &[SyncedFund],
    ) -> Vec<SyncRecord> {
        (0..days)
            .rev()
            .filter_map(|days_ago| {
                let date = today.checked_sub_days(Days::new(days_ago))?;
                let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
                let synced = !weekend && days_ago > 0 && self.unit() > SYNC_FAILURE_RATE;
                if !synced {
                    return Some(SyncRecord::new(date, false, None, Vec::new()));
                }

                let sync_time = format!(
                    "{}:{:02}",
                    self.rng.gen_range(8..20),
                    self.rng.gen_range(0..60)
                );
                let drift = 0.02 * days_ago as f64;
                let quotes = funds
                    .iter()
                    .map(|fund| {
                        SyncedFund::new(
                            fund.code().clone(),
                            fund.name().clone(),
                            round_dp(fund.nav() * (1.0 + (self.unit() - 0.5) * drift), 4),
                            self.spread_around(4.0, 0.48),
                        )
                    })
                    .collect();
                Some(SyncRecord::new(date, true, Some(sync_time), quotes))
            })
            .collect()
    }
}
