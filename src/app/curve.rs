//! Deterministic benchmark return curves.
//!
//! Curves are seeded by the benchmark id, so the same benchmark and day count
//! always produce the same series. Two benchmarks with identical parameters
//! still look different, which is all the differentiation there is: no
//! correlation between benchmarks is modelled.

use crate::models::Benchmark;

use super::calc::{TRADING_DAYS_PER_YEAR, round_dp};

/// Centre of the noise term. Slightly below 0.5, so down days are a little
/// larger than up days.
const NOISE_BIAS: f64 = 0.48;

/// Sum of the character codes of `id`.
pub fn seed_from_id(id: &str) -> u32 {
    id.chars().map(|c| c as u32).sum()
}

/// Sine hash of `(seed, i)` mapped into `[0, 1)`.
pub fn seeded_unit(seed: u32, i: usize) -> f64 {
    let x = (f64::from(seed) * 100.0 + i as f64 * 9301.0 + 49297.0).sin() * 49297.0;
    x - x.floor()
}

/// Cumulative return in percent for each of `days` trading days, rounded to
/// two decimals. Zero volatility gives a straight compounding line.
pub fn generate_curve(benchmark: &Benchmark, days: usize) -> Vec<f64> {
    let daily_return = benchmark.annual_return() / TRADING_DAYS_PER_YEAR;
    let volatility = *benchmark.volatility();
    let seed = seed_from_id(benchmark.id());

    let mut cumulative = 0.0;
    (0..days)
        .map(|i| {
            let noise = if volatility > 0.0 {
                (seeded_unit(seed, i) - NOISE_BIAS) * volatility * 100.0
            } else {
                0.0
            };
            cumulative += daily_return * 100.0 + noise;
            round_dp(cumulative, 2)
        })
        .collect()
}

/// Annualizes a cumulative percentage observed over `days` calendar days. A
/// loss of everything stays -100%.
pub fn annualize(cumulative_pct: f64, days: usize) -> f64 {
    let growth = 1.0 + cumulative_pct / 100.0;
    if growth <= 0.0 {
        return -100.0;
    }
    let years = 365.0 / days.max(1) as f64;
    round_dp((growth.powf(years) - 1.0) * 100.0, 2)
}
