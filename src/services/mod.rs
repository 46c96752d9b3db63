pub mod fund_lookup;
pub mod market_data;
pub mod trade_csv;

pub use fund_lookup::FundLookup;
pub use market_data::{MarketDataProvider, SyntheticProvider};
