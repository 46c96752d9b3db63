use chrono::NaiveDate;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use tracing::{debug, info, warn};

use crate::{
    db::{
        KeyValueStore, keys,
        utils::{load_json, persist},
    },
    models::{
        AllocationSegment, DailyReturn, EarningsPoint, FundNavPoint, Holding, NoOpReason, Outcome,
        PortfolioSummary, SyncRecord, TodayOverview, TradeRecord, TradeType, WatchItem,
        watch_item::NAV_HISTORY_LEN,
    },
    services::MarketDataProvider,
};

use super::{
    calc, defaults,
    history::{self, EARNINGS_DAYS, HistoryPeriod, SYNC_HISTORY_DAYS},
    utils::today,
};

/// Holdings, watchlist, trade log and total assets, persisted slice by slice.
///
/// Mutations take `&mut self`, so there is exactly one writer at a time. They
/// never fail: inputs are expected to be validated by the caller, and inputs
/// that cannot be applied come back as [`Outcome::NoOp`].
pub struct Ledger<S: KeyValueStore, P: MarketDataProvider> {
    store: S,
    provider: P,
    total_assets: Decimal,
    holdings: Vec<Holding>,
    watchlist: Vec<WatchItem>,
    trades: Vec<TradeRecord>,
}

impl<S: KeyValueStore, P: MarketDataProvider> Ledger<S, P> {
    /// Reads every slice from `store`, using the built-in defaults for slices
    /// that are missing or unreadable.
    pub async fn load(store: S, mut provider: P) -> Self {
        let total_assets = load_json(&store, keys::TOTAL_ASSETS, || defaults::TOTAL_ASSETS).await;
        let holdings = load_json(&store, keys::HOLDINGS, defaults::holdings).await;
        let mut watchlist = load_json(&store, keys::WATCHLIST, defaults::watchlist).await;
        let trades = load_json(&store, keys::TRADES, Vec::new).await;

        let mut backfilled = false;
        for item in watchlist.iter_mut().filter(|item| item.is_incomplete()) {
            let nav = if item.current_nav().is_zero() {
                Decimal::ONE
            } else {
                *item.current_nav()
            };
            let profile = provider.watch_profile(item.code(), item.name(), today());
            item.backfill(&profile, provider.nav_history(nav, NAV_HISTORY_LEN));
            backfilled = true;
        }
        if backfilled {
            persist(&store, keys::WATCHLIST, &watchlist).await;
        }

        debug!(
            holdings = holdings.len(),
            watchlist = watchlist.len(),
            trades = trades.len(),
            "loaded ledger"
        );

        Self {
            store,
            provider,
            total_assets,
            holdings,
            watchlist,
            trades,
        }
    }

    pub fn total_assets(&self) -> Decimal {
        self.total_assets
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn watchlist(&self) -> &[WatchItem] {
        &self.watchlist
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn holding(&self, code: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.code() == code)
    }

    pub fn watch_item(&self, code: &str) -> Option<&WatchItem> {
        self.watchlist.iter().find(|w| w.code() == code)
    }

    pub fn total_fund_value(&self) -> Decimal {
        calc::total_fund_value(&self.holdings)
    }

    pub fn cash_available(&self) -> Decimal {
        calc::cash_available(self.total_assets, &self.holdings)
    }

    pub fn monthly_profit(&self) -> Decimal {
        calc::monthly_profit(&self.holdings)
    }

    pub fn yearly_profit(&self) -> Decimal {
        calc::yearly_profit(&self.holdings)
    }

    pub fn summary(&self) -> PortfolioSummary {
        calc::summary(self.total_assets, &self.holdings)
    }

    pub fn overview(&self) -> TodayOverview {
        calc::today_overview(&self.holdings)
    }

    pub fn allocation(&self) -> Vec<AllocationSegment> {
        calc::allocation(self.total_assets, &self.holdings)
    }

    pub async fn buy(&mut self, code: &str, name: &str, amount: Decimal, nav: Decimal) -> Outcome {
        self.buy_on(today(), code, name, amount, nav).await
    }

    /// Buys `amount` worth of `code` at `nav`, dated `date`. A non-positive
    /// NAV is treated as 1. A share count too large to represent leaves
    /// everything untouched.
    pub async fn buy_on(
        &mut self,
        date: NaiveDate,
        code: &str,
        name: &str,
        amount: Decimal,
        nav: Decimal,
    ) -> Outcome {
        let nav = if nav > Decimal::ZERO { nav } else { Decimal::ONE };
        let Some(shares) = amount.checked_div(nav) else {
            warn!(code, %amount, %nav, "buy ignored, share count overflows");
            return Outcome::NoOp(NoOpReason::OutOfRange);
        };

        let id = self.next_trade_id();
        self.trades.push(TradeRecord::new(
            id,
            code.to_string(),
            name.to_string(),
            TradeType::Buy,
            amount,
            shares,
            nav,
            date,
        ));

        match self.holdings.iter_mut().find(|h| h.code() == code) {
            Some(holding) => holding.add_purchase(amount, shares),
            None => {
                let current_nav = self.provider.quote_for_new_holding(nav);
                self.holdings.push(Holding::open(
                    code,
                    name,
                    amount,
                    shares,
                    nav,
                    current_nav,
                    date,
                ));
            }
        }

        info!(code, %amount, %nav, %shares, "bought");
        self.save_trades().await;
        self.save_holdings().await;
        Outcome::Applied
    }

    pub async fn sell(&mut self, code: &str, shares: Decimal, nav: Decimal) -> Outcome {
        self.sell_on(today(), code, shares, nav).await
    }

    /// Sells up to `shares` of `code` at `nav`, recording the NAV as given.
    /// Requests above the owned amount are clamped, and a residual at or
    /// below dust closes the holding.
    pub async fn sell_on(
        &mut self,
        date: NaiveDate,
        code: &str,
        shares: Decimal,
        nav: Decimal,
    ) -> Outcome {
        let Some(index) = self.holdings.iter().position(|h| h.code() == code) else {
            debug!(code, "sell ignored, no such holding");
            return Outcome::NoOp(NoOpReason::UnknownHolding);
        };

        let owned = *self.holdings[index].buy_shares();
        let sell_shares = shares.min(owned);
        let Some(proceeds) = sell_shares.checked_mul(nav) else {
            warn!(code, shares = %sell_shares, %nav, "sell ignored, proceeds overflow");
            return Outcome::NoOp(NoOpReason::OutOfRange);
        };
        let remaining = owned.saturating_sub(sell_shares);
        let name = self.holdings[index].name().to_string();

        let outcome = if remaining <= calc::DUST_SHARES {
            self.holdings.remove(index);
            Outcome::Closed {
                clamped: shares > owned,
            }
        } else {
            self.holdings[index].reduce_to(remaining);
            Outcome::Applied
        };

        let id = self.next_trade_id();
        self.trades.push(TradeRecord::new(
            id,
            code.to_string(),
            name,
            TradeType::Sell,
            proceeds,
            sell_shares,
            nav,
            date,
        ));

        info!(code, shares = %sell_shares, %nav, ?outcome, "sold");
        self.save_trades().await;
        self.save_holdings().await;
        outcome
    }

    pub async fn set_total_assets(&mut self, value: Decimal) -> Outcome {
        self.total_assets = value;
        persist(&self.store, keys::TOTAL_ASSETS, &self.total_assets).await;
        info!(%value, "set total assets");
        Outcome::Applied
    }

    /// Starts tracking `code` with synthesized figures. Codes already on the
    /// watchlist are left alone.
    pub async fn add_to_watchlist(&mut self, code: &str, name: &str) -> Outcome {
        if self.watch_item(code).is_some() {
            return Outcome::NoOp(NoOpReason::AlreadyWatching);
        }

        let item = self.provider.watch_profile(code, name, today());
        info!(code, name = %item.name(), "watching");
        self.watchlist.push(item);
        self.save_watchlist().await;
        Outcome::Applied
    }

    pub async fn remove_from_watchlist(&mut self, code: &str) -> Outcome {
        let before = self.watchlist.len();
        self.watchlist.retain(|w| w.code() != code);
        if self.watchlist.len() == before {
            return Outcome::NoOp(NoOpReason::NotWatching);
        }

        info!(code, "stopped watching");
        self.save_watchlist().await;
        Outcome::Applied
    }

    pub async fn annotate(&mut self, code: &str, notes: &str, tags: Vec<String>) -> Outcome {
        let Some(holding) = self.holdings.iter_mut().find(|h| h.code() == code) else {
            return Outcome::NoOp(NoOpReason::UnknownHolding);
        };

        holding.annotate(notes.to_string(), tags);
        self.save_holdings().await;
        Outcome::Applied
    }

    pub async fn set_watch_tags(&mut self, code: &str, tags: Vec<String>) -> Outcome {
        let Some(item) = self.watchlist.iter_mut().find(|w| w.code() == code) else {
            return Outcome::NoOp(NoOpReason::NotWatching);
        };

        item.set_tags(tags);
        self.save_watchlist().await;
        Outcome::Applied
    }

    /// Replaces both alert thresholds of a watch item; `None` clears one.
    pub async fn set_watch_alerts(
        &mut self,
        code: &str,
        nav_below: Option<Decimal>,
        gain_above: Option<f64>,
    ) -> Outcome {
        let Some(item) = self.watchlist.iter_mut().find(|w| w.code() == code) else {
            return Outcome::NoOp(NoOpReason::NotWatching);
        };

        item.set_alerts(nav_below, gain_above);
        info!(code, ?nav_below, ?gain_above, "set watch alerts");
        self.save_watchlist().await;
        Outcome::Applied
    }

    /// Advances every holding and watch item by one simulated trading day.
    pub async fn refresh_prices(&mut self) -> Outcome {
        for holding in self.holdings.iter_mut() {
            let nav = self.provider.next_nav(*holding.current_nav());
            holding.mark_to(nav);
        }

        for item in self.watchlist.iter_mut() {
            let old = *item.current_nav();
            let nav = self.provider.next_nav(old);
            let change = calc::round_dp(calc::rate(nav - old, old).to_f64().unwrap_or(0.0), 2);
            item.record_nav(nav, change);
        }

        info!(
            holdings = self.holdings.len(),
            watchlist = self.watchlist.len(),
            "refreshed prices"
        );
        self.save_holdings().await;
        self.save_watchlist().await;
        Outcome::Applied
    }

    /// Simulated NAV and return series of a held fund over `period`, as
    /// cumulative or annualized returns. `None` if `code` is not held.
    pub fn fund_history(
        &mut self,
        code: &str,
        period: HistoryPeriod,
        annualized: bool,
    ) -> Option<Vec<FundNavPoint>> {
        self.holding(code)?;
        let days = period.days();
        let points = self
            .provider
            .fund_history(history::series_start(today(), days), days);
        Some(if annualized {
            history::annualized(points, days)
        } else {
            points
        })
    }

    /// A year of earnings for a held fund. `None` if `code` is not held.
    pub fn earnings(&mut self, code: &str) -> Option<Vec<EarningsPoint>> {
        let holding = self.holding(code)?.clone();
        let points = self
            .provider
            .fund_history(history::series_start(today(), EARNINGS_DAYS), EARNINGS_DAYS);
        Some(history::earnings(&holding, &points))
    }

    /// Portfolio profit over `days` days against the current principal.
    pub fn total_return_history(&mut self, days: usize) -> Vec<DailyReturn> {
        let principal = calc::total_principal(&self.holdings).to_f64().unwrap_or(0.0);
        self.provider
            .total_return_history(history::series_start(today(), days), days, principal)
    }

    /// The sync calendar for the last month, oldest first.
    pub fn sync_history(&mut self) -> Vec<SyncRecord> {
        let quotes = history::current_quotes(&self.holdings, &self.watchlist);
        self.provider
            .sync_history(today(), SYNC_HISTORY_DAYS, &quotes)
    }

    fn next_trade_id(&self) -> i64 {
        self.trades.iter().map(|t| *t.id()).max().unwrap_or(0) + 1
    }

    async fn save_holdings(&self) {
        persist(&self.store, keys::HOLDINGS, &self.holdings).await;
    }

    async fn save_watchlist(&self) {
        persist(&self.store, keys::WATCHLIST, &self.watchlist).await;
    }

    async fn save_trades(&self) {
        persist(&self.store, keys::TRADES, &self.trades).await;
    }
}
