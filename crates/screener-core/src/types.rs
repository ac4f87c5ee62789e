use serde::{Deserialize, Serialize};

/// Raw financial statement facts for one company and fiscal year.
///
/// Monetary fields are unit-agnostic (the sample data uses millions) and may be
/// missing; a missing input simply yields missing ratios downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    #[serde(rename = "entreprise")]
    pub company: String,
    #[serde(rename = "secteur")]
    pub sector: String,
    #[serde(rename = "annee")]
    pub year: i32,
    #[serde(rename = "chiffre_affaires_m")]
    pub revenue: Option<f64>,
    #[serde(rename = "ebit_m")]
    pub ebit: Option<f64>,
    #[serde(rename = "resultat_net_m")]
    pub net_income: Option<f64>,
    #[serde(rename = "actifs_totaux_m")]
    pub total_assets: Option<f64>,
    #[serde(rename = "capitaux_propres_m")]
    pub equity: Option<f64>,
    #[serde(rename = "dette_totale_m")]
    pub total_debt: Option<f64>,
    #[serde(rename = "actifs_courants_m")]
    pub current_assets: Option<f64>,
    #[serde(rename = "passifs_courants_m")]
    pub current_liabilities: Option<f64>,
    #[serde(rename = "flux_tresorerie_op_m")]
    pub operating_cash_flow: Option<f64>,
    #[serde(rename = "capex_m")]
    pub capex: Option<f64>,
}

/// Financial facts augmented with derived ratios.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioRecord {
    pub facts: FinancialRecord,
    pub net_margin: Option<f64>,
    pub ebit_margin: Option<f64>,
    pub roa: Option<f64>,
    pub roe: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub fcf: Option<f64>,
    pub fcf_margin: Option<f64>,
    pub cash_conversion: Option<f64>,
    pub revenue_growth: Option<f64>,
}

impl RatioRecord {
    pub fn company(&self) -> &str {
        &self.facts.company
    }

    pub fn year(&self) -> i32 {
        self.facts.year
    }
}

/// Extra-financial (sustainability) indicators, one row per company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraFinancialRecord {
    #[serde(rename = "entreprise")]
    pub company: String,
    /// tCO2e per unit of revenue (lower is better)
    #[serde(rename = "intensite_carbone")]
    pub carbon_intensity: Option<f64>,
    /// Share of revenue from green activities, 0..1
    #[serde(rename = "part_ca_vert")]
    pub green_revenue_share: Option<f64>,
    /// ESG global score, 0..100
    #[serde(rename = "score_esg_global")]
    pub esg_score: Option<f64>,
}

/// Scoring families combined into the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreCategory {
    Profitability,
    Growth,
    Solidity,
    Liquidity,
    Cashflow,
    ExtraFinancial,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 6] = [
        ScoreCategory::Profitability,
        ScoreCategory::Growth,
        ScoreCategory::Solidity,
        ScoreCategory::Liquidity,
        ScoreCategory::Cashflow,
        ScoreCategory::ExtraFinancial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::Profitability => "profitability",
            ScoreCategory::Growth => "growth",
            ScoreCategory::Solidity => "solidity",
            ScoreCategory::Liquidity => "liquidity",
            ScoreCategory::Cashflow => "cashflow",
            ScoreCategory::ExtraFinancial => "extra_financial",
        }
    }

    /// Short axis label used in score profiles
    pub fn to_label(&self) -> &'static str {
        match self {
            ScoreCategory::Profitability => "Profit",
            ScoreCategory::Growth => "Growth",
            ScoreCategory::Solidity => "Solidity",
            ScoreCategory::Liquidity => "Liquidity",
            ScoreCategory::Cashflow => "Cash",
            ScoreCategory::ExtraFinancial => "Extra",
        }
    }
}

/// Ranked output row: one per company, latest fiscal year.
///
/// Field order matches the exported column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "entreprise")]
    pub company: String,
    #[serde(rename = "annee")]
    pub year: i32,
    #[serde(rename = "secteur")]
    pub sector: String,
    #[serde(rename = "score_global")]
    pub composite: f64,
    #[serde(rename = "score_profitabilite")]
    pub profitability: f64,
    #[serde(rename = "score_croissance")]
    pub growth: f64,
    #[serde(rename = "score_solidite")]
    pub solidity: f64,
    #[serde(rename = "score_liquidite")]
    pub liquidity: f64,
    #[serde(rename = "score_cashflow")]
    pub cashflow: f64,
    #[serde(rename = "score_extra_financier")]
    pub extra_financial: f64,
}

impl ScoreRecord {
    pub fn category(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Profitability => self.profitability,
            ScoreCategory::Growth => self.growth,
            ScoreCategory::Solidity => self.solidity,
            ScoreCategory::Liquidity => self.liquidity,
            ScoreCategory::Cashflow => self.cashflow,
            ScoreCategory::ExtraFinancial => self.extra_financial,
        }
    }

    /// (label, score) pairs in category order, for radar-style profiles
    pub fn profile(&self) -> Vec<(&'static str, f64)> {
        ScoreCategory::ALL
            .iter()
            .map(|c| (c.to_label(), self.category(*c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_follows_category_order() {
        let record = ScoreRecord {
            company: "Alpha".to_string(),
            year: 2023,
            sector: "Industrie".to_string(),
            composite: 55.0,
            profitability: 10.0,
            growth: 20.0,
            solidity: 30.0,
            liquidity: 40.0,
            cashflow: 50.0,
            extra_financial: 60.0,
        };

        let profile = record.profile();
        assert_eq!(profile.len(), 6);
        assert_eq!(profile[0], ("Profit", 10.0));
        assert_eq!(profile[5], ("Extra", 60.0));
    }
}
