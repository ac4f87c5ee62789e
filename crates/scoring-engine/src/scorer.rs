//! Composite Scoring Module
//!
//! Joins latest-period ratios with extra-financial indicators, turns each
//! indicator into a 0-100 percentile score, blends them into six families with
//! fixed sub-weights, then aggregates the families with user weights.

use crate::models::{CategoryScores, WeightConfig};
use screener_core::percentile::{percentile_scores, round_to_tenth, Sense};
use screener_core::{
    ExtraFinancialRecord, RatioRecord, Result, ScoreCategory, ScoreRecord, ScreenerError,
};
use std::collections::HashMap;

/// Current ratios below this are clipped before taking the logarithm.
pub const CURRENT_RATIO_FLOOR: f64 = 0.1;

/// A latest-period ratio row with its extra-financial data, if any.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRow<'a> {
    pub ratios: &'a RatioRecord,
    pub extra: Option<&'a ExtraFinancialRecord>,
}

impl JoinedRow<'_> {
    fn extra_value(&self, field: fn(&ExtraFinancialRecord) -> Option<f64>) -> Option<f64> {
        self.extra.and_then(field)
    }
}

/// One scored input column and its share of a family score.
struct Indicator {
    category: ScoreCategory,
    sub_weight: f64,
    sense: Sense,
    extract: fn(&JoinedRow) -> Option<f64>,
}

fn indicators() -> [Indicator; 10] {
    [
        Indicator {
            category: ScoreCategory::Profitability,
            sub_weight: 0.6,
            sense: Sense::Max,
            extract: |row| row.ratios.net_margin,
        },
        Indicator {
            category: ScoreCategory::Profitability,
            sub_weight: 0.4,
            sense: Sense::Max,
            extract: |row| row.ratios.roe,
        },
        Indicator {
            category: ScoreCategory::Growth,
            sub_weight: 1.0,
            sense: Sense::Max,
            extract: |row| row.ratios.revenue_growth,
        },
        Indicator {
            category: ScoreCategory::Solidity,
            sub_weight: 1.0,
            sense: Sense::Min,
            extract: |row| row.ratios.debt_to_equity,
        },
        // log scale so very high current ratios (idle assets) don't dominate
        Indicator {
            category: ScoreCategory::Liquidity,
            sub_weight: 1.0,
            sense: Sense::Max,
            extract: |row| row.ratios.current_ratio.map(|cr| cr.max(CURRENT_RATIO_FLOOR).ln()),
        },
        Indicator {
            category: ScoreCategory::Cashflow,
            sub_weight: 0.6,
            sense: Sense::Max,
            extract: |row| row.ratios.fcf_margin,
        },
        Indicator {
            category: ScoreCategory::Cashflow,
            sub_weight: 0.4,
            sense: Sense::Max,
            extract: |row| row.ratios.cash_conversion,
        },
        Indicator {
            category: ScoreCategory::ExtraFinancial,
            sub_weight: 0.5,
            sense: Sense::Min,
            extract: |row| row.extra_value(|e| e.carbon_intensity),
        },
        Indicator {
            category: ScoreCategory::ExtraFinancial,
            sub_weight: 0.25,
            sense: Sense::Max,
            extract: |row| row.extra_value(|e| e.green_revenue_share),
        },
        Indicator {
            category: ScoreCategory::ExtraFinancial,
            sub_weight: 0.25,
            sense: Sense::Max,
            extract: |row| row.extra_value(|e| e.esg_score),
        },
    ]
}

/// Left-join ratio rows with extra-financial rows on the company key.
///
/// Row order follows `latest`. Companies without extra data are kept with
/// `extra: None`; a company listed twice in `extra` is a data integrity error.
pub fn join_extra<'a>(
    latest: &'a [RatioRecord],
    extra: &'a [ExtraFinancialRecord],
) -> Result<Vec<JoinedRow<'a>>> {
    let mut by_company: HashMap<&str, &ExtraFinancialRecord> = HashMap::with_capacity(extra.len());
    for record in extra {
        if by_company.insert(record.company.as_str(), record).is_some() {
            return Err(ScreenerError::DataIntegrity(format!(
                "duplicate extra-financial record for {}",
                record.company
            )));
        }
    }

    let rows: Vec<JoinedRow> = latest
        .iter()
        .map(|ratios| JoinedRow {
            ratios,
            extra: by_company.get(ratios.company()).copied(),
        })
        .collect();

    let missing = rows.iter().filter(|r| r.extra.is_none()).count();
    if missing > 0 {
        tracing::warn!(
            "{} of {} companies have no extra-financial data, scoring them neutral there",
            missing,
            rows.len()
        );
    }

    Ok(rows)
}

/// Scores companies from their latest-period ratios
pub struct ScoringEngine {
    weights: WeightConfig,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    /// Create a new engine with default weights
    pub fn new() -> Self {
        Self {
            weights: WeightConfig::default(),
        }
    }

    /// Create engine with custom weights
    pub fn with_weights(weights: WeightConfig) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    /// Unrounded family scores for each joined row, in row order.
    pub fn category_scores(&self, rows: &[JoinedRow]) -> Vec<CategoryScores> {
        let mut scores = vec![CategoryScores::default(); rows.len()];

        for indicator in indicators() {
            let column: Vec<Option<f64>> = rows.iter().map(|row| (indicator.extract)(row)).collect();
            let column_scores = percentile_scores(&column, indicator.sense);

            for (target, score) in scores.iter_mut().zip(column_scores) {
                target.add(indicator.category, indicator.sub_weight * score);
            }
        }

        scores
    }

    /// Build the ranked score table.
    ///
    /// Pure: the same inputs and weights always yield the same table. Output is
    /// sorted by composite score, descending; equal composites keep join order.
    pub fn score(
        &self,
        latest: &[RatioRecord],
        extra: &[ExtraFinancialRecord],
    ) -> Result<Vec<ScoreRecord>> {
        self.weights.validate()?;

        let rows = join_extra(latest, extra)?;
        let categories = self.category_scores(&rows);
        let normalized = self.weights.normalized();

        let mut out: Vec<ScoreRecord> = rows
            .iter()
            .zip(categories.iter())
            .map(|(row, cat)| ScoreRecord {
                company: row.ratios.facts.company.clone(),
                year: row.ratios.facts.year,
                sector: row.ratios.facts.sector.clone(),
                composite: round_to_tenth(cat.composite(&normalized)),
                profitability: round_to_tenth(cat.profitability),
                growth: round_to_tenth(cat.growth),
                solidity: round_to_tenth(cat.solidity),
                liquidity: round_to_tenth(cat.liquidity),
                cashflow: round_to_tenth(cat.cashflow),
                extra_financial: round_to_tenth(cat.extra_financial),
            })
            .collect();

        // sort_by is stable
        out.sort_by(|a, b| b.composite.total_cmp(&a.composite));

        tracing::debug!("Scored {} companies with weights {:?}", out.len(), self.weights);
        Ok(out)
    }
}

/// Score latest-period rows with explicit weights.
pub fn score(
    latest: &[RatioRecord],
    extra: &[ExtraFinancialRecord],
    weights: &WeightConfig,
) -> Result<Vec<ScoreRecord>> {
    ScoringEngine::with_weights(*weights).score(latest, extra)
}
