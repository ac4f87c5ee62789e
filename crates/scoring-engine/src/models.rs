//! Scoring Data Models

use screener_core::{Result, ScoreCategory, ScreenerError};

/// User-tunable weight per scoring family.
///
/// Weights are free-form: they do not need to sum to 1 and are renormalized at
/// aggregation time. An all-zero vector means "weight every family equally".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightConfig {
    pub profitability: f64,
    pub growth: f64,
    pub solidity: f64,
    pub liquidity: f64,
    pub cashflow: f64,
    pub extra_financial: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            profitability: 1.0,
            growth: 1.0,
            solidity: 1.0,
            liquidity: 0.7,
            cashflow: 1.0,
            extra_financial: 0.8,
        }
    }
}

impl WeightConfig {
    /// Same weight for every family
    pub fn uniform(weight: f64) -> Self {
        Self {
            profitability: weight,
            growth: weight,
            solidity: weight,
            liquidity: weight,
            cashflow: weight,
            extra_financial: weight,
        }
    }

    pub fn get(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Profitability => self.profitability,
            ScoreCategory::Growth => self.growth,
            ScoreCategory::Solidity => self.solidity,
            ScoreCategory::Liquidity => self.liquidity,
            ScoreCategory::Cashflow => self.cashflow,
            ScoreCategory::ExtraFinancial => self.extra_financial,
        }
    }

    /// Return a copy with one family's weight replaced
    pub fn with(mut self, category: ScoreCategory, weight: f64) -> Self {
        let slot = match category {
            ScoreCategory::Profitability => &mut self.profitability,
            ScoreCategory::Growth => &mut self.growth,
            ScoreCategory::Solidity => &mut self.solidity,
            ScoreCategory::Liquidity => &mut self.liquidity,
            ScoreCategory::Cashflow => &mut self.cashflow,
            ScoreCategory::ExtraFinancial => &mut self.extra_financial,
        };
        *slot = weight;
        self
    }

    /// Reject negative or non-finite weights. There is no upper bound.
    pub fn validate(&self) -> Result<()> {
        for category in ScoreCategory::ALL {
            let value = self.get(category);
            if !value.is_finite() || value < 0.0 {
                return Err(ScreenerError::InvalidWeight {
                    category: category.as_str().to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Weights rescaled to sum to 1, in `ScoreCategory::ALL` order.
    /// Falls back to equal weights when the total is not positive.
    pub fn normalized(&self) -> [f64; 6] {
        let raw = ScoreCategory::ALL.map(|c| self.get(c));
        let total: f64 = raw.iter().sum();
        if total > 0.0 {
            raw.map(|w| w / total)
        } else {
            [1.0 / raw.len() as f64; 6]
        }
    }
}

/// Unrounded family scores for one company (each 0-100).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryScores {
    pub profitability: f64,
    pub growth: f64,
    pub solidity: f64,
    pub liquidity: f64,
    pub cashflow: f64,
    pub extra_financial: f64,
}

impl CategoryScores {
    pub fn get(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Profitability => self.profitability,
            ScoreCategory::Growth => self.growth,
            ScoreCategory::Solidity => self.solidity,
            ScoreCategory::Liquidity => self.liquidity,
            ScoreCategory::Cashflow => self.cashflow,
            ScoreCategory::ExtraFinancial => self.extra_financial,
        }
    }

    pub(crate) fn add(&mut self, category: ScoreCategory, amount: f64) {
        match category {
            ScoreCategory::Profitability => self.profitability += amount,
            ScoreCategory::Growth => self.growth += amount,
            ScoreCategory::Solidity => self.solidity += amount,
            ScoreCategory::Liquidity => self.liquidity += amount,
            ScoreCategory::Cashflow => self.cashflow += amount,
            ScoreCategory::ExtraFinancial => self.extra_financial += amount,
        }
    }

    /// Weighted sum with already-normalized weights
    pub fn composite(&self, normalized: &[f64; 6]) -> f64 {
        ScoreCategory::ALL
            .iter()
            .zip(normalized.iter())
            .map(|(c, w)| self.get(*c) * w)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let w = WeightConfig::default();
        assert_eq!(w.liquidity, 0.7);
        assert_eq!(w.extra_financial, 0.8);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let n = WeightConfig::default().normalized();
        let total: f64 = n.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((n[0] - 1.0 / 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_falls_back_to_equal() {
        let n = WeightConfig::uniform(0.0).normalized();
        for w in n {
            assert!((w - 1.0 / 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_large_weights_allowed() {
        let w = WeightConfig::default().with(ScoreCategory::Growth, 1_000.0);
        assert!(w.validate().is_ok());
        assert!(w.normalized()[1] > 0.99);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let negative = WeightConfig::default().with(ScoreCategory::Solidity, -0.1);
        assert!(matches!(
            negative.validate(),
            Err(ScreenerError::InvalidWeight { .. })
        ));

        let nan = WeightConfig::default().with(ScoreCategory::Cashflow, f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_composite_weighted_sum() {
        let scores = CategoryScores {
            profitability: 100.0,
            growth: 0.0,
            solidity: 50.0,
            liquidity: 50.0,
            cashflow: 50.0,
            extra_financial: 50.0,
        };
        let only_profit = WeightConfig::uniform(0.0)
            .with(ScoreCategory::Profitability, 2.0)
            .normalized();
        assert!((scores.composite(&only_profit) - 100.0).abs() < 1e-12);
    }
}
