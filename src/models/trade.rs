use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// One entry of the trade log. Records are appended and never changed.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    id: i64,
    fund_code: String,
    fund_name: String,
    #[serde(rename = "type")]
    trade_type: TradeType,
    amount: Decimal,
    shares: Decimal,
    nav: Decimal,
    date: NaiveDate,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TradeType {
    Buy,
    Sell,
}
