pub mod benchmark;
pub mod fund_detail;
pub mod history;
pub mod holding;
pub mod outcome;
pub mod summary;
pub mod trade;
pub mod watch_item;

pub use benchmark::{Benchmark, BenchmarkCategory, BenchmarkConfig, CustomFund};
pub use fund_detail::{FundDetail, NavPoint, PeriodReturns, Recommendation, RiskStats, TopHolding};
pub use history::{DailyReturn, EarningsPoint, FundNavPoint, SyncRecord, SyncedFund};
pub use holding::Holding;
pub use outcome::{NoOpReason, Outcome};
pub use summary::{AllocationSegment, PortfolioSummary, TodayOverview};
pub use trade::{TradeRecord, TradeType};
pub use watch_item::{RiskLevel, WatchItem};
