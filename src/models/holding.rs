use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::app::calc::rate;

pub const UNKNOWN_FUND_TYPE: &str = "Unknown";

/// An owned position in one fund, tracked by cumulative principal and shares.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    code: String,
    name: String,
    #[serde(rename = "type")]
    fund_type: String,
    buy_date: NaiveDate,
    buy_amount: Decimal,
    buy_shares: Decimal,
    cost_per_share: Decimal,
    current_nav: Decimal,
    current_value: Decimal,
    profit: Decimal,
    profit_rate: Decimal,
    today_profit: Decimal,
    today_profit_rate: Decimal,
    yesterday_profit: Decimal,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl Holding {
    /// Opens a position from a first purchase. The cost per share is the
    /// purchase NAV; daily figures start at zero.
    pub fn open(
        code: &str,
        name: &str,
        amount: Decimal,
        shares: Decimal,
        nav: Decimal,
        current_nav: Decimal,
        buy_date: NaiveDate,
    ) -> Self {
        let mut holding = Self::new(
            code.to_string(),
            name.to_string(),
            UNKNOWN_FUND_TYPE.to_string(),
            buy_date,
            amount,
            shares,
            nav,
            current_nav,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            String::new(),
            Vec::new(),
        );
        holding.revalue();
        holding
    }

    /// Adds a purchase at the blended average cost. The current NAV is left
    /// untouched.
    pub fn add_purchase(&mut self, amount: Decimal, shares: Decimal) {
        self.buy_amount = self.buy_amount.saturating_add(amount);
        self.buy_shares = self.buy_shares.saturating_add(shares);
        if let Some(cost) = self.buy_amount.checked_div(self.buy_shares) {
            self.cost_per_share = cost;
        }
        self.revalue();
    }

    /// Shrinks the position to `remaining` shares, keeping the cost per share.
    pub fn reduce_to(&mut self, remaining: Decimal) {
        self.buy_shares = remaining;
        self.buy_amount = remaining.saturating_mul(self.cost_per_share);
        self.revalue();
    }

    /// Moves the position to a new NAV, rolling today's profit into yesterday's.
    pub fn mark_to(&mut self, nav: Decimal) {
        let change = nav.saturating_sub(self.current_nav);
        self.yesterday_profit = self.today_profit;
        self.today_profit = change.saturating_mul(self.buy_shares);
        self.today_profit_rate = rate(change, self.current_nav);
        self.current_nav = nav;
        self.revalue();
    }

    pub fn annotate(&mut self, notes: String, tags: Vec<String>) {
        self.notes = notes;
        self.tags = tags;
    }

    /// Saturates instead of overflowing on absurd inputs.
    fn revalue(&mut self) {
        self.current_value = self.buy_shares.saturating_mul(self.current_nav);
        self.profit = self.current_value.saturating_sub(self.buy_amount);
        self.profit_rate = rate(self.profit, self.buy_amount);
    }
}
