//! Storage keys. Each slice of state is stored as JSON under its own key and
//! rewritten whenever that slice changes.

pub const TOTAL_ASSETS: &str = "fp_totalAssets";
pub const HOLDINGS: &str = "fp_holdings";
pub const WATCHLIST: &str = "fp_watchlist";
pub const TRADES: &str = "fp_trades";
pub const BENCHMARK_CONFIG: &str = "fp_benchmarkConfig";
