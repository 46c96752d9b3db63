use tracing::info;

use crate::{
    db::{
        KeyValueStore, keys,
        utils::{load_json, persist},
    },
    models::{Benchmark, BenchmarkCategory, BenchmarkConfig, CustomFund},
};

use super::{
    curve::{seed_from_id, seeded_unit},
    validation::{ValidationError, validate_code},
};

pub const CUSTOM_PREFIX: &str = "custom_";

const CUSTOM_COLORS: [&str; 6] = [
    "hsl(340, 75%, 55%)",
    "hsl(190, 70%, 50%)",
    "hsl(120, 50%, 45%)",
    "hsl(60, 70%, 50%)",
    "hsl(300, 60%, 55%)",
    "hsl(150, 60%, 45%)",
];

fn preset(
    id: &str,
    name: &str,
    category: BenchmarkCategory,
    color: &str,
    dash_array: Option<&str>,
    annual_return: f64,
    volatility: f64,
) -> Benchmark {
    Benchmark::new(
        id.to_string(),
        name.to_string(),
        category,
        color.to_string(),
        dash_array.map(str::to_string),
        annual_return,
        volatility,
    )
}

pub fn presets() -> Vec<Benchmark> {
    use BenchmarkCategory::*;

    vec![
        preset("csi300", "CSI 300", Index, "hsl(200, 80%, 55%)", None, 0.08, 0.018),
        preset("csi500", "CSI 500", Index, "hsl(280, 65%, 60%)", None, 0.10, 0.022),
        preset("csi1000", "CSI 1000", Index, "hsl(320, 70%, 55%)", None, 0.12, 0.025),
        preset("sse50", "SSE 50", Index, "hsl(30, 80%, 55%)", None, 0.06, 0.016),
        preset("gem", "ChiNext", Index, "hsl(170, 65%, 45%)", None, 0.14, 0.028),
        preset("star50", "STAR 50", Index, "hsl(250, 70%, 60%)", None, 0.15, 0.032),
        preset("nasdaq", "Nasdaq 100", Index, "hsl(210, 90%, 55%)", None, 0.16, 0.020),
        preset("sp500", "S&P 500", Index, "hsl(0, 0%, 60%)", None, 0.10, 0.015),
        preset("gold", "Gold", Commodity, "hsl(45, 90%, 50%)", None, 0.07, 0.012),
        preset("silver", "Silver", Commodity, "hsl(0, 0%, 72%)", None, 0.05, 0.020),
        preset(
            "deposit_1y",
            "1Y Fixed Deposit",
            Deposit,
            "hsl(38, 92%, 50%)",
            Some("6 3"),
            0.0175,
            0.0,
        ),
        preset(
            "deposit_3y",
            "3Y Fixed Deposit",
            Deposit,
            "hsl(25, 80%, 50%)",
            Some("6 3"),
            0.026,
            0.0,
        ),
        preset(
            "deposit_5y",
            "5Y Fixed Deposit",
            Deposit,
            "hsl(15, 70%, 50%)",
            Some("6 3"),
            0.03,
            0.0,
        ),
        preset(
            "mmf",
            "Money Market Fund",
            Deposit,
            "hsl(50, 60%, 55%)",
            Some("4 4"),
            0.018,
            0.001,
        ),
    ]
}

pub fn default_fund_name(code: &str) -> String {
    format!("Fund {}", code)
}

/// Benchmark for a user-defined fund. Return and volatility are derived from
/// the id, so a custom entry renders the same curve in every session.
pub fn custom_benchmark(code: &str, name: &str, color_index: usize) -> Benchmark {
    let id = format!("{}{}", CUSTOM_PREFIX, code);
    let seed = seed_from_id(&id);
    let name = if name.trim().is_empty() {
        default_fund_name(code)
    } else {
        name.trim().to_string()
    };

    Benchmark::new(
        id,
        name,
        BenchmarkCategory::Custom,
        CUSTOM_COLORS[color_index % CUSTOM_COLORS.len()].to_string(),
        None,
        0.05 + seeded_unit(seed, 0) * 0.15,
        0.010 + seeded_unit(seed, 1) * 0.020,
    )
}

/// Persisted benchmark selection, including custom fund entries.
pub struct BenchmarkSettings<S: KeyValueStore> {
    store: S,
    config: BenchmarkConfig,
}

impl<S: KeyValueStore> BenchmarkSettings<S> {
    pub async fn load(store: S) -> Self {
        let config = load_json(&store, keys::BENCHMARK_CONFIG, BenchmarkConfig::default).await;
        Self { store, config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn custom_benchmarks(&self) -> Vec<Benchmark> {
        self.config
            .custom_funds
            .iter()
            .enumerate()
            .map(|(i, fund)| custom_benchmark(fund.code(), fund.name(), i))
            .collect()
    }

    /// Presets followed by custom entries.
    pub fn available(&self) -> Vec<Benchmark> {
        let mut all = presets();
        all.extend(self.custom_benchmarks());
        all
    }

    pub fn find(&self, id: &str) -> Option<Benchmark> {
        self.available().into_iter().find(|b| b.id() == id)
    }

    /// Selected benchmarks in selection order. Ids that no longer resolve are
    /// skipped.
    pub fn selected(&self) -> Vec<Benchmark> {
        let available = self.available();
        self.config
            .selected_ids
            .iter()
            .filter_map(|id| available.iter().find(|b| b.id() == id).cloned())
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.config.selected_ids.iter().any(|selected| selected == id)
    }

    /// Flips selection of `id` and returns whether it is now selected.
    pub async fn toggle(&mut self, id: &str) -> bool {
        let now_selected = if self.is_selected(id) {
            self.config.selected_ids.retain(|selected| selected != id);
            false
        } else {
            self.config.selected_ids.push(id.to_string());
            true
        };
        self.save().await;
        now_selected
    }

    /// Adds a custom fund and selects it.
    pub async fn add_custom(&mut self, code: &str, name: &str) -> Result<Benchmark, ValidationError> {
        let code = validate_code(code)?;
        if self.config.custom_funds.iter().any(|f| f.code() == &code) {
            return Err(ValidationError::DuplicateCustomFund(code));
        }

        let name = if name.trim().is_empty() {
            default_fund_name(&code)
        } else {
            name.trim().to_string()
        };
        let benchmark = custom_benchmark(&code, &name, self.config.custom_funds.len());

        self.config
            .selected_ids
            .push(benchmark.id().to_string());
        self.config.custom_funds.push(CustomFund::new(code, name));
        self.save().await;

        info!(id = %benchmark.id(), "added custom benchmark");
        Ok(benchmark)
    }

    /// Removes a custom fund from both the selection and the custom list.
    pub async fn remove_custom(&mut self, code: &str) -> bool {
        let id = format!("{}{}", CUSTOM_PREFIX, code.trim());
        let before = self.config.custom_funds.len();
        self.config.custom_funds.retain(|f| f.code() != code.trim());
        self.config.selected_ids.retain(|selected| selected != &id);

        let removed = self.config.custom_funds.len() != before;
        if removed {
            self.save().await;
        }
        removed
    }

    async fn save(&self) {
        persist(&self.store, keys::BENCHMARK_CONFIG, &self.config).await;
    }
}
