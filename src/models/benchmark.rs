use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A reference return series plotted next to the portfolio.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    id: String,
    name: String,
    category: BenchmarkCategory,
    color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dash_array: Option<String>,
    annual_return: f64,
    volatility: f64,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BenchmarkCategory {
    Index,
    Commodity,
    Deposit,
    Custom,
}

#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct CustomFund {
    code: String,
    name: String,
}

/// Which benchmarks are overlaid on charts, plus user-defined fund entries.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkConfig {
    pub selected_ids: Vec<String>,
    pub custom_funds: Vec<CustomFund>,
}

pub const DEFAULT_BENCHMARK_ID: &str = "csi300";

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            selected_ids: vec![DEFAULT_BENCHMARK_ID.to_string()],
            custom_funds: Vec::new(),
        }
    }
}
