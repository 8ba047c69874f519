use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use iacc_core::ListKind;

/// Runtime settings for the demo screen, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which list to show (`IACC_LIST`).
    pub list: ListKind,
    /// Whether the signed-in user is premium (`IACC_PREMIUM`).
    pub premium: bool,
    /// JSON fixture file; built-in sample data when unset (`IACC_FIXTURES`).
    pub fixtures_path: Option<PathBuf>,
    /// Number of initial fetches that fail (`IACC_FAILURES`).
    pub failures: u32,
    /// Simulated network latency per fetch (`IACC_LATENCY_MS`).
    pub latency: Duration,
    /// Seed the friends cache with fixture friends (`IACC_WARM_CACHE`).
    pub warm_cache: bool,
    /// Row to select once loaded (`IACC_SELECT`).
    pub select: Option<usize>,
}

impl Config {
    /// Loads `.env` if present, then reads `IACC_*` variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let list = match lookup("IACC_LIST") {
            Some(value) => value.parse::<ListKind>()?,
            None => ListKind::Friends,
        };

        let failures = match lookup("IACC_FAILURES") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("IACC_FAILURES must be a number, got '{}'", value))?,
            None => 0,
        };

        let latency_ms: u64 = match lookup("IACC_LATENCY_MS") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("IACC_LATENCY_MS must be a number, got '{}'", value))?,
            None => 0,
        };

        let select = match lookup("IACC_SELECT") {
            Some(value) => Some(
                value
                    .trim()
                    .parse()
                    .with_context(|| format!("IACC_SELECT must be a row index, got '{}'", value))?,
            ),
            None => None,
        };

        Ok(Self {
            list,
            premium: lookup("IACC_PREMIUM").is_some_and(|v| parse_flag(&v)),
            fixtures_path: lookup("IACC_FIXTURES")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            failures,
            latency: Duration::from_millis(latency_ms),
            warm_cache: lookup("IACC_WARM_CACHE").is_some_and(|v| parse_flag(&v)),
            select,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
