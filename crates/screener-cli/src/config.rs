use anyhow::{Context, Result};
use scoring_engine::WeightConfig;
use screener_core::ScoreCategory;
use std::path::PathBuf;

pub const DEFAULT_FINANCIALS_PATH: &str = "data/donnees_financieres.csv";
pub const DEFAULT_EXTRA_PATH: &str = "data/donnees_extra_financieres.csv";

/// Environment variable holding the weight of each family.
fn weight_var(category: ScoreCategory) -> &'static str {
    match category {
        ScoreCategory::Profitability => "SCREENER_W_PROFITABILITY",
        ScoreCategory::Growth => "SCREENER_W_GROWTH",
        ScoreCategory::Solidity => "SCREENER_W_SOLIDITY",
        ScoreCategory::Liquidity => "SCREENER_W_LIQUIDITY",
        ScoreCategory::Cashflow => "SCREENER_W_CASHFLOW",
        ScoreCategory::ExtraFinancial => "SCREENER_W_EXTRA",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfig {
    pub financials_path: PathBuf,
    pub extra_path: PathBuf,
    pub weights: WeightConfig,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            financials_path: PathBuf::from(DEFAULT_FINANCIALS_PATH),
            extra_path: PathBuf::from(DEFAULT_EXTRA_PATH),
            weights: WeightConfig::default(),
        }
    }
}

impl ScreenerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup("SCREENER_FINANCIALS_PATH") {
            config.financials_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SCREENER_EXTRA_PATH") {
            config.extra_path = PathBuf::from(path);
        }

        for category in ScoreCategory::ALL {
            let var = weight_var(category);
            if let Some(raw) = lookup(var) {
                let weight: f64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{var} is not a number: {raw:?}"))?;
                config.weights = config.weights.with(category, weight);
            }
        }

        Ok(config)
    }

    /// Apply a command-line weight, if one was given.
    pub fn override_weight(&mut self, category: ScoreCategory, weight: Option<f64>) {
        if let Some(weight) = weight {
            self.weights = self.weights.with(category, weight);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.weights
            .validate()
            .context("invalid scoring weights")?;
        Ok(())
    }
}
