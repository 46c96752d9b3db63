//! State used on first run, or when a stored slice cannot be read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Holding, RiskLevel, WatchItem};

pub const TOTAL_ASSETS: Decimal = dec!(500000);

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|tag| tag.to_string()).collect()
}

fn holding(
    code: &str,
    name: &str,
    fund_type: &str,
    buy_date: NaiveDate,
    figures: [Decimal; 10],
    notes: &str,
    labels: &[&str],
) -> Holding {
    let [
        buy_amount,
        buy_shares,
        cost_per_share,
        current_nav,
        current_value,
        profit,
        profit_rate,
        today_profit,
        today_profit_rate,
        yesterday_profit,
    ] = figures;

    Holding::new(
        code.to_string(),
        name.to_string(),
        fund_type.to_string(),
        buy_date,
        buy_amount,
        buy_shares,
        cost_per_share,
        current_nav,
        current_value,
        profit,
        profit_rate,
        today_profit,
        today_profit_rate,
        yesterday_profit,
        notes.to_string(),
        tags(labels),
    )
}

pub fn holdings() -> Vec<Holding> {
    vec![
        holding(
            "110011",
            "E Fund Small & Mid Cap Hybrid",
            "Hybrid",
            date(2024, 3, 15),
            [
                dec!(50000), dec!(15823.41), dec!(3.16), dec!(3.48), dec!(55065.47),
                dec!(5065.47), dec!(10.13), dec!(328.50), dec!(0.60), dec!(-156.20),
            ],
            "Long-term hold, expecting a small-cap rebound",
            &["Hybrid", "Long-term"],
        ),
        holding(
            "005827",
            "E Fund Blue Chip Select Hybrid",
            "Hybrid",
            date(2024, 1, 10),
            [
                dec!(80000), dec!(38834.95), dec!(2.06), dec!(2.24), dec!(86990.29),
                dec!(6990.29), dec!(8.74), dec!(542.80), dec!(0.63), dec!(312.40),
            ],
            "Core position, monthly auto-invest",
            &["Hybrid", "Core"],
        ),
        holding(
            "161725",
            "China Merchants CSI Liquor Index",
            "Index",
            date(2024, 6, 20),
            [
                dec!(30000), dec!(21276.60), dec!(1.41), dec!(1.52), dec!(32340.44),
                dec!(2340.44), dec!(7.80), dec!(-215.30), dec!(-0.66), dec!(-89.50),
            ],
            "Consumer recovery play",
            &["Index", "Consumer"],
        ),
        holding(
            "012414",
            "Guotai CSI Semiconductor ETF Feeder",
            "Index",
            date(2024, 8, 5),
            [
                dec!(25000), dec!(24271.84), dec!(1.03), dec!(1.15), dec!(27912.62),
                dec!(2912.62), dec!(11.65), dec!(418.70), dec!(1.52), dec!(523.10),
            ],
            "Tech sector, high volatility",
            &["Index", "Tech"],
        ),
        holding(
            "007119",
            "Invesco Great Wall Growth Hybrid",
            "Hybrid",
            date(2024, 4, 22),
            [
                dec!(40000), dec!(19607.84), dec!(2.04), dec!(2.18), dec!(42745.10),
                dec!(2745.10), dec!(6.86), dec!(186.20), dec!(0.44), dec!(-267.80),
            ],
            "Growth style allocation",
            &["Hybrid", "Growth"],
        ),
        holding(
            "000961",
            "Tianhong CSI 300 ETF Feeder",
            "Index",
            date(2024, 2, 28),
            [
                dec!(60000), dec!(45801.53), dec!(1.31), dec!(1.38), dec!(63206.11),
                dec!(3206.11), dec!(5.34), dec!(275.40), dec!(0.44), dec!(198.30),
            ],
            "Large-cap baseline",
            &["Index", "Large-cap"],
        ),
        holding(
            "003834",
            "ChinaAMC Energy Innovation Equity",
            "Equity",
            date(2024, 5, 18),
            [
                dec!(20000), dec!(13698.63), dec!(1.46), dec!(1.39), dec!(19041.10),
                dec!(-958.90), dec!(-4.79), dec!(-312.60), dec!(-1.62), dec!(-445.30),
            ],
            "New energy, under short-term pressure",
            &["Equity", "New energy"],
        ),
        holding(
            "519732",
            "BOCOM Balanced Dual Income Hybrid",
            "Hybrid",
            date(2024, 7, 12),
            [
                dec!(35000), dec!(21341.46), dec!(1.64), dec!(1.71), dec!(36493.90),
                dec!(1493.90), dec!(4.27), dec!(156.80), dec!(0.43), dec!(78.60),
            ],
            "Balanced allocation, regular dividends",
            &["Hybrid", "Dividend"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn watch_item(
    code: &str,
    name: &str,
    fund_type: &str,
    current_nav: Decimal,
    changes: [f64; 7],
    added_date: NaiveDate,
    labels: &[&str],
    risk_level: RiskLevel,
    [sharpe_ratio, max_drawdown, fund_size]: [f64; 3],
    fund_manager: &str,
) -> WatchItem {
    let [change_1d, change_1w, change_1m, change_3m, change_6m, change_1y, change_ytd] = changes;

    WatchItem::new(
        code.to_string(),
        name.to_string(),
        fund_type.to_string(),
        current_nav,
        Some(change_1d),
        Some(change_1w),
        change_1m,
        change_3m,
        Some(change_6m),
        change_1y,
        Some(change_ytd),
        added_date,
        tags(labels),
        None,
        None,
        risk_level,
        Some(sharpe_ratio),
        Some(max_drawdown),
        Some(fund_size),
        fund_manager.to_string(),
        Vec::new(),
    )
}

/// Sample watchlist. Histories are left empty and filled in at load.
pub fn watchlist() -> Vec<WatchItem> {
    let mut lion = watch_item(
        "320007",
        "Lion Growth Hybrid",
        "Hybrid",
        dec!(1.82),
        [1.25, 3.4, 5.2, 12.8, 8.1, -3.4, 6.7],
        date(2024, 12, 1),
        &["Tech", "To buy"],
        RiskLevel::High,
        [0.85, -32.5, 312.0],
        "Cai Songsong",
    );
    lion.set_alerts(Some(dec!(1.70)), Some(8.0));

    vec![
        lion,
        watch_item(
            "001838",
            "UBS SDIC CSI ChiNext Growth Index",
            "Index",
            dec!(0.96),
            [-0.52, 1.2, 3.1, 8.5, 12.3, 15.2, 4.8],
            date(2024, 11, 15),
            &["ChiNext", "Watching"],
            RiskLevel::MediumHigh,
            [1.12, -28.7, 45.0],
            "Yin Ruifei",
        ),
        watch_item(
            "519674",
            "Galaxy Innovation Growth Hybrid",
            "Hybrid",
            dec!(4.35),
            [0.78, -1.5, -2.1, 6.4, 15.6, 22.8, 9.2],
            date(2025, 1, 5),
            &["Tech", "Steady"],
            RiskLevel::MediumHigh,
            [1.35, -25.1, 186.0],
            "Zheng Weishan",
        ),
        watch_item(
            "004851",
            "GF Healthcare Equity",
            "Equity",
            dec!(2.18),
            [-1.32, -3.2, 1.8, -4.2, -8.9, -12.5, -2.1],
            date(2024, 10, 20),
            &["Healthcare", "Bottom fishing"],
            RiskLevel::High,
            [0.45, -45.2, 98.0],
            "Wu Xingwu",
        ),
        watch_item(
            "161903",
            "Wanjia Sector Select Hybrid",
            "Hybrid",
            dec!(1.56),
            [0.35, 2.1, 4.5, 9.7, 14.2, 18.3, 7.5],
            date(2025, 1, 20),
            &["Steady", "To buy"],
            RiskLevel::Medium,
            [1.58, -18.6, 67.0],
            "Huang Hai",
        ),
    ]
}
