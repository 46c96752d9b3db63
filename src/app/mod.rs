pub mod benchmarks;
pub mod calc;
pub mod cli;
pub mod curve;
pub mod defaults;
pub mod history;
pub mod ledger;
pub mod query;
pub mod render;
pub mod utils;
pub mod validation;

pub use benchmarks::BenchmarkSettings;
pub use ledger::Ledger;
