use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DB_PATH: &str = "~/.fundfolio.db";

/// Runtime settings. Each flag falls back to an environment variable, which
/// may come from a `.env` file.
#[derive(Args, Clone, Debug)]
pub struct Config {
    /// SQLite file holding the ledger
    #[arg(long = "db", env = "FUNDFOLIO_DB", default_value = DEFAULT_DB_PATH, global = true)]
    pub db: String,

    /// Seed for simulated market data; random when absent
    #[arg(long, env = "FUNDFOLIO_SEED", global = true)]
    pub seed: Option<u64>,

    /// Simulated fund lookup latency in milliseconds
    #[arg(long, env = "FUNDFOLIO_LOOKUP_LATENCY_MS", default_value_t = 600, global = true)]
    pub lookup_latency_ms: u64,

    /// Log filter directive
    #[arg(long = "log", env = "FUNDFOLIO_LOG", default_value = "info", global = true)]
    pub log: String,
}

impl Config {
    pub fn db_path(&self) -> String {
        shellexpand::tilde(&self.db).into_owned()
    }

    pub fn lookup_latency(&self) -> Duration {
        Duration::from_millis(self.lookup_latency_ms)
    }

    /// Installs the global subscriber. Logs go to stderr.
    pub fn init_tracing(&self) -> Result<()> {
        let filter = EnvFilter::try_new(&self.log)
            .with_context(|| format!("Invalid log filter '{}'", self.log))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))
            .context("Failed to install tracing subscriber")
    }
}
