use std::time::Duration;

use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::{
    app::{
        benchmarks::default_fund_name,
        calc::round_dp,
        curve::seed_from_id,
        utils::{decimal_from_f64, scale},
        validation::{ValidationError, validate_lookup_code},
    },
    models::{
        FundDetail, NavPoint, PeriodReturns, Recommendation, RiskLevel, RiskStats, TopHolding,
    },
};

const HISTORY_DAYS: u64 = 60;

const KNOWN_FUNDS: [(&str, &str); 6] = [
    ("110011", "E Fund Small & Mid Cap Hybrid"),
    ("005827", "E Fund Blue Chip Select Hybrid"),
    ("161725", "China Merchants CSI Liquor Index"),
    ("320007", "Lion Growth Hybrid"),
    ("519674", "Galaxy Innovation Growth Hybrid"),
    ("004851", "GF Healthcare Equity"),
];

const FUND_TYPES: [&str; 5] = ["Hybrid", "Equity", "Index", "Bond", "QDII"];

const MANAGERS: [&str; 10] = [
    "Zhang Kun",
    "Ge Lan",
    "Cai Songsong",
    "Liu Gesong",
    "Zhu Shaoxing",
    "Xie Zhiyu",
    "Fu Pengbo",
    "Xiao Nan",
    "Huang Hai",
    "Zhou Weiwen",
];

const STOCKS: [&str; 10] = [
    "Kweichow Moutai",
    "CATL",
    "Tencent",
    "China Merchants Bank",
    "Meituan",
    "BYD",
    "Ping An Insurance",
    "LONGi Green Energy",
    "WuXi AppTec",
    "Foshan Haitian",
];

/// Deterministic stream of values in a range, keyed by the fund code.
struct SeedSequence {
    seed: f64,
    calls: u32,
}

impl SeedSequence {
    fn new(seed: u32) -> Self {
        Self {
            seed: f64::from(seed),
            calls: 0,
        }
    }

    fn next_in(&mut self, min: f64, max: f64) -> f64 {
        self.calls += 1;
        let x = (self.seed * 9301.0 + 49297.0 + f64::from(self.calls) * 7919.0).sin();
        min + x.abs() * (max - min)
    }
}

/// Looks up fund profiles. Results are synthesized locally; the latency only
/// imitates a remote call.
#[derive(Clone, Debug)]
pub struct FundLookup {
    latency: Duration,
}

impl FundLookup {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub async fn search(&self, code: &str, today: NaiveDate) -> Result<FundDetail, ValidationError> {
        let code = validate_lookup_code(code)?;
        debug!(code = %code, latency_ms = self.latency.as_millis() as u64, "looking up fund");
        tokio::time::sleep(self.latency).await;
        Ok(fund_detail(&code, today))
    }
}

/// Same code and date always give the same profile.
pub fn fund_detail(code: &str, today: NaiveDate) -> FundDetail {
    let seed = seed_from_id(code);
    let mut r = SeedSequence::new(seed);
    let pick = seed as usize;

    let nav = decimal_from_f64(r.next_in(0.5, 8.0)).round_dp(4);
    let returns = PeriodReturns::new(
        round_dp(r.next_in(-3.0, 3.0), 2),
        round_dp(r.next_in(-5.0, 5.0), 2),
        round_dp(r.next_in(-8.0, 10.0), 2),
        round_dp(r.next_in(-15.0, 20.0), 2),
        round_dp(r.next_in(-20.0, 30.0), 2),
        round_dp(r.next_in(-25.0, 40.0), 2),
        round_dp(r.next_in(-10.0, 25.0), 2),
    );
    let stats = RiskStats::new(
        round_dp(r.next_in(0.1, 2.5), 2),
        round_dp(-r.next_in(5.0, 50.0), 1),
        r.next_in(5.0, 500.0).round(),
        round_dp(r.next_in(5.0, 35.0), 1),
        round_dp(r.next_in(0.5, 1.5), 2),
        round_dp(r.next_in(-5.0, 10.0), 2),
        round_dp(r.next_in(-0.5, 2.0), 2),
        round_dp(r.next_in(1.0, 15.0), 2),
    );

    let nav_history = nav_history(nav, seed, &mut r, today);
    let top_holdings = top_holdings(pick, &mut r);

    let raw_score = score(&returns, &stats);
    let recommendation = Recommendation::from_score(raw_score);

    let name = KNOWN_FUNDS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| default_fund_name(code));
    let risk_level = RiskLevel::iter()
        .nth(pick % RiskLevel::iter().len())
        .unwrap_or_default();
    let establish_date =
        NaiveDate::from_ymd_opt(2010 + (seed % 15) as i32, seed % 12 + 1, 1).unwrap_or_default();

    FundDetail::new(
        code.to_string(),
        name,
        FUND_TYPES[pick % FUND_TYPES.len()].to_string(),
        nav,
        returns,
        stats,
        risk_level,
        MANAGERS[pick % MANAGERS.len()].to_string(),
        establish_date,
        nav_history,
        top_holdings,
        recommendation,
        raw_score.round().clamp(0.0, 100.0) as u8,
    )
}

/// Weighted blend of Sharpe ratio, half-year return, drawdown and size.
pub fn score(returns: &PeriodReturns, stats: &RiskStats) -> f64 {
    let momentum = if *returns.change_6m() > 0.0 { 15.0 } else { -10.0 };
    let drawdown = if *stats.max_drawdown() > -25.0 { 10.0 } else { -5.0 };
    let size = if *stats.fund_size() > 50.0 { 5.0 } else { 0.0 };
    stats.sharpe() * 20.0 + momentum + drawdown + size
}

fn nav_history(nav: Decimal, seed: u32, r: &mut SeedSequence, today: NaiveDate) -> Vec<NavPoint> {
    let base = scale(nav, 0.88);
    let mut value = base;

    (0..HISTORY_DAYS)
        .rev()
        .map(|days_ago| {
            let drift = (f64::from(seed) + days_ago as f64).sin() * 0.01;
            let noise = (r.next_in(0.0, 1.0) - 0.47) * 0.025;
            value = scale(value, 1.0 + drift + noise).round_dp(8);

            let return_rate = (value - base)
                .checked_div(base)
                .map(|ratio| round_dp(ratio.to_f64().unwrap_or(0.0) * 100.0, 2))
                .unwrap_or(0.0);
            let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);

            NavPoint::new(date, value.round_dp(4), return_rate)
        })
        .collect()
}

fn top_holdings(pick: usize, r: &mut SeedSequence) -> Vec<TopHolding> {
    (0..5)
        .map(|i| {
            let name = STOCKS[(pick + i * 3) % STOCKS.len()];
            let percent = round_dp(r.next_in(3.0, 12.0) - i as f64 * 1.2, 2);
            TopHolding::new(name.to_string(), percent)
        })
        .collect()
}
