//! Scoring Engine
//!
//! Converts heterogeneous ratios into comparable percentile scores and ranks
//! companies by a user-weighted composite.

pub mod models;
pub mod scorer;


pub use models::{CategoryScores, WeightConfig};
pub use scorer::{join_extra, score, JoinedRow, ScoringEngine, CURRENT_RATIO_FLOOR};

#[cfg(test)]
pub(crate) mod test_support {
    use screener_core::{ExtraFinancialRecord, FinancialRecord, RatioRecord};

    /// Latest-period row where only net margin (and ROE alongside it) and
    /// leverage vary; every other ratio is identical across companies.
    pub fn ratio_row(company: &str, net_margin: f64, debt_to_equity: f64) -> RatioRecord {
        RatioRecord {
            facts: FinancialRecord {
                company: company.to_string(),
                sector: "Industrie".to_string(),
                year: 2023,
                revenue: Some(1000.0),
                ebit: Some(net_margin * 1400.0),
                net_income: Some(net_margin * 1000.0),
                total_assets: Some(2000.0),
                equity: Some(500.0),
                total_debt: Some(debt_to_equity * 500.0),
                current_assets: Some(300.0),
                current_liabilities: Some(200.0),
                operating_cash_flow: Some(150.0),
                capex: Some(70.0),
            },
            net_margin: Some(net_margin),
            ebit_margin: Some(net_margin * 1.4),
            roa: Some(net_margin / 2.0),
            roe: Some(net_margin * 2.0),
            debt_to_equity: Some(debt_to_equity),
            current_ratio: Some(1.5),
            fcf: Some(80.0),
            fcf_margin: Some(0.08),
            cash_conversion: Some(1.1),
            revenue_growth: None,
        }
    }

    pub fn extra(company: &str, carbon: f64, green: f64, esg: f64) -> ExtraFinancialRecord {
        ExtraFinancialRecord {
            company: company.to_string(),
            carbon_intensity: Some(carbon),
            green_revenue_share: Some(green),
            esg_score: Some(esg),
        }
    }
}
