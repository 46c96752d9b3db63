use std::cmp::Ordering;

use strum_macros::{Display, EnumString};

use crate::models::{Holding, WatchItem};

#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum HoldingSortKey {
    #[default]
    Profit,
    ProfitRate,
    TodayProfit,
    BuyDate,
    BuyAmount,
}

impl HoldingSortKey {
    fn compare(&self, a: &Holding, b: &Holding) -> Ordering {
        match self {
            HoldingSortKey::Profit => a.profit().cmp(b.profit()),
            HoldingSortKey::ProfitRate => a.profit_rate().cmp(b.profit_rate()),
            HoldingSortKey::TodayProfit => a.today_profit().cmp(b.today_profit()),
            HoldingSortKey::BuyDate => a.buy_date().cmp(b.buy_date()),
            HoldingSortKey::BuyAmount => a.buy_amount().cmp(b.buy_amount()),
        }
    }
}

/// Holdings of `fund_type` (all types when `None`) whose name or code
/// contains `search`, sorted by `key`.
pub fn filter_holdings<'a>(
    holdings: &'a [Holding],
    fund_type: Option<&str>,
    search: &str,
    key: HoldingSortKey,
    ascending: bool,
) -> Vec<&'a Holding> {
    let search = search.trim().to_lowercase();

    let mut matched: Vec<&Holding> = holdings
        .iter()
        .filter(|h| fund_type.is_none_or(|t| h.fund_type().eq_ignore_ascii_case(t)))
        .filter(|h| {
            search.is_empty()
                || h.name().to_lowercase().contains(&search)
                || h.code().contains(&search)
        })
        .collect();

    matched.sort_by(|a, b| {
        let ordering = key.compare(a, b);
        if ascending { ordering } else { ordering.reverse() }
    });
    matched
}

/// Distinct tags across the watchlist in first-seen order.
pub fn watch_tags(watchlist: &[WatchItem]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in watchlist.iter().flat_map(|item| item.tags()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Items carrying any of `tags`. An empty tag set keeps everything.
pub fn filter_watchlist<'a>(watchlist: &'a [WatchItem], tags: &[String]) -> Vec<&'a WatchItem> {
    watchlist
        .iter()
        .filter(|item| tags.is_empty() || item.has_tag_in(tags))
        .collect()
}
