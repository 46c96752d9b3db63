use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A fund tracked for information only. Independent of holdings: the same
/// code may appear in both lists.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct WatchItem {
    code: String,
    name: String,
    #[serde(rename = "type")]
    fund_type: String,
    current_nav: Decimal,
    #[getter(skip)]
    #[serde(default)]
    change_1d: Option<f64>,
    #[getter(skip)]
    #[serde(default)]
    change_1w: Option<f64>,
    change_1m: f64,
    change_3m: f64,
    #[getter(skip)]
    #[serde(default)]
    change_6m: Option<f64>,
    change_1y: f64,
    #[getter(skip)]
    #[serde(default)]
    change_ytd: Option<f64>,
    added_date: NaiveDate,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alert_nav_below: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alert_gain_above: Option<f64>,
    #[serde(default)]
    risk_level: RiskLevel,
    #[getter(skip)]
    #[serde(default)]
    sharpe_ratio: Option<f64>,
    #[getter(skip)]
    #[serde(default)]
    max_drawdown: Option<f64>,
    #[getter(skip)]
    #[serde(default)]
    fund_size: Option<f64>,
    #[serde(default = "unknown_manager")]
    fund_manager: String,
    #[serde(default)]
    nav_history: Vec<Decimal>,
}

fn unknown_manager() -> String {
    String::from("Unknown")
}

/// Number of NAV points kept for sparklines.
pub const NAV_HISTORY_LEN: usize = 30;

impl WatchItem {
    pub fn change_1d(&self) -> f64 {
        self.change_1d.unwrap_or_default()
    }

    pub fn change_1w(&self) -> f64 {
        self.change_1w.unwrap_or_default()
    }

    pub fn change_6m(&self) -> f64 {
        self.change_6m.unwrap_or_default()
    }

    pub fn change_ytd(&self) -> f64 {
        self.change_ytd.unwrap_or_default()
    }

    pub fn sharpe_ratio(&self) -> f64 {
        self.sharpe_ratio.unwrap_or_default()
    }

    pub fn max_drawdown(&self) -> f64 {
        self.max_drawdown.unwrap_or_default()
    }

    pub fn fund_size(&self) -> f64 {
        self.fund_size.unwrap_or_default()
    }

    /// True when storage lacked the history or any statistic.
    pub fn is_incomplete(&self) -> bool {
        self.nav_history.is_empty()
            || [
                self.change_1d,
                self.change_1w,
                self.change_6m,
                self.change_ytd,
                self.sharpe_ratio,
                self.max_drawdown,
                self.fund_size,
            ]
            .iter()
            .any(Option::is_none)
    }

    /// Takes each missing statistic from `profile`, and `history` when none
    /// was stored. Stored values are kept.
    pub fn backfill(&mut self, profile: &WatchItem, history: Vec<Decimal>) {
        self.change_1d = self.change_1d.or(profile.change_1d);
        self.change_1w = self.change_1w.or(profile.change_1w);
        self.change_6m = self.change_6m.or(profile.change_6m);
        self.change_ytd = self.change_ytd.or(profile.change_ytd);
        self.sharpe_ratio = self.sharpe_ratio.or(profile.sharpe_ratio);
        self.max_drawdown = self.max_drawdown.or(profile.max_drawdown);
        self.fund_size = self.fund_size.or(profile.fund_size);
        if self.nav_history.is_empty() {
            self.nav_history = history;
        }
    }

    /// `<= 1.70 buy`, `>= 8% watch` or both, when any alert is set.
    pub fn alert_summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.alert_nav_below.map(|nav| format!("<= {} buy", nav)),
            self.alert_gain_above.map(|gain| format!(">= {}% watch", gain)),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }

    pub fn set_alerts(&mut self, nav_below: Option<Decimal>, gain_above: Option<f64>) {
        self.alert_nav_below = nav_below;
        self.alert_gain_above = gain_above;
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Advances the quote by one day and appends it to the history.
    pub fn record_nav(&mut self, nav: Decimal, change_1d: f64) {
        self.current_nav = nav;
        self.change_1d = Some(change_1d);
        self.nav_history.push(nav);
        if self.nav_history.len() > NAV_HISTORY_LEN {
            let excess = self.nav_history.len() - NAV_HISTORY_LEN;
            self.nav_history.drain(..excess);
        }
    }

    pub fn has_tag_in(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize,
)]
pub enum RiskLevel {
    Low,
    MediumLow,
    #[default]
    Medium,
    MediumHigh,
    High,
}
