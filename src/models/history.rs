use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;

/// One day of a held fund's simulated NAV with the CSI 300 alongside. Returns
/// are percentages since the start of the series.
#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct FundNavPoint {
    date: NaiveDate,
    nav: f64,
    cumulative_return: f64,
    csi300_return: f64,
}

/// Profit of one holding on a day, in money and as a percentage.
#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct EarningsPoint {
    date: NaiveDate,
    earnings: f64,
    earnings_rate: f64,
}

/// Portfolio-wide profit on a day against a CSI 300 line and the interest a
/// deposit of the same principal would have earned.
#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct DailyReturn {
    date: NaiveDate,
    total_profit: f64,
    total_rate: f64,
    csi300: f64,
    deposit: f64,
}

#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct SyncedFund {
    code: String,
    name: String,
    nav: f64,
    change: f64,
}

/// One day of the sync calendar. Unsynced days carry no quotes.
#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    date: NaiveDate,
    synced: bool,
    sync_time: Option<String>,
    funds: Vec<SyncedFund>,
}
