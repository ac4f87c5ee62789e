//! Ratio Engine
//!
//! Derives standard financial ratios from raw per-company, per-year statement
//! facts. Undefined ratios (zero denominator, missing input, no prior year) are
//! `None`; nothing here fails on data quality.

pub mod latest;

pub use latest::latest_period;

use screener_core::{FinancialRecord, RatioRecord, Result, ScreenerError};
use std::collections::BTreeMap;

pub struct RatioEngine;

impl RatioEngine {
    pub fn new() -> Self {
        Self
    }

    /// Division that maps a zero divisor, a missing operand or a non-finite
    /// quotient to `None`.
    fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
        match (numerator, denominator) {
            (Some(n), Some(d)) if d != 0.0 => Some(n / d).filter(|q| q.is_finite()),
            _ => None,
        }
    }

    fn calculate_margin(&self, amount: Option<f64>, revenue: Option<f64>) -> Option<f64> {
        Self::safe_div(amount, revenue)
    }

    fn calculate_roa(&self, net_income: Option<f64>, total_assets: Option<f64>) -> Option<f64> {
        Self::safe_div(net_income, total_assets)
    }

    fn calculate_roe(&self, net_income: Option<f64>, equity: Option<f64>) -> Option<f64> {
        Self::safe_div(net_income, equity)
    }

    fn calculate_debt_to_equity(&self, total_debt: Option<f64>, equity: Option<f64>) -> Option<f64> {
        Self::safe_div(total_debt, equity)
    }

    fn calculate_current_ratio(
        &self,
        current_assets: Option<f64>,
        current_liabilities: Option<f64>,
    ) -> Option<f64> {
        Self::safe_div(current_assets, current_liabilities)
    }

    fn calculate_free_cash_flow(&self, operating_cash_flow: Option<f64>, capex: Option<f64>) -> Option<f64> {
        match (operating_cash_flow, capex) {
            (Some(ocf), Some(capex)) => Some(ocf - capex),
            _ => None,
        }
    }

    /// Operating cash flow over net income; `None` when net income is exactly zero.
    fn calculate_cash_conversion(
        &self,
        operating_cash_flow: Option<f64>,
        net_income: Option<f64>,
    ) -> Option<f64> {
        Self::safe_div(operating_cash_flow, net_income)
    }

    fn calculate_revenue_growth(&self, revenue: Option<f64>, prior_revenue: Option<f64>) -> Option<f64> {
        Self::safe_div(revenue, prior_revenue).map(|ratio| ratio - 1.0)
    }

    /// Augment one record with its ratios. `prior_revenue` is the revenue of the
    /// company's previous fiscal year, `None` for its first year.
    pub fn derive(&self, facts: &FinancialRecord, prior_revenue: Option<f64>) -> RatioRecord {
        let fcf = self.calculate_free_cash_flow(facts.operating_cash_flow, facts.capex);

        RatioRecord {
            net_margin: self.calculate_margin(facts.net_income, facts.revenue),
            ebit_margin: self.calculate_margin(facts.ebit, facts.revenue),
            roa: self.calculate_roa(facts.net_income, facts.total_assets),
            roe: self.calculate_roe(facts.net_income, facts.equity),
            debt_to_equity: self.calculate_debt_to_equity(facts.total_debt, facts.equity),
            current_ratio: self.calculate_current_ratio(facts.current_assets, facts.current_liabilities),
            fcf,
            fcf_margin: self.calculate_margin(fcf, facts.revenue),
            cash_conversion: self.calculate_cash_conversion(facts.operating_cash_flow, facts.net_income),
            revenue_growth: self.calculate_revenue_growth(facts.revenue, prior_revenue),
            facts: facts.clone(),
        }
    }

    /// Compute ratios for a multi-year table.
    ///
    /// Records are partitioned by company and ordered by year before the
    /// year-over-year growth pass, so input order is irrelevant. The output is
    /// sorted by (company, year). A repeated (company, year) pair is rejected.
    pub fn compute(&self, records: &[FinancialRecord]) -> Result<Vec<RatioRecord>> {
        let mut by_company: BTreeMap<&str, Vec<&FinancialRecord>> = BTreeMap::new();
        for record in records {
            by_company.entry(record.company.as_str()).or_default().push(record);
        }

        let mut out = Vec::with_capacity(records.len());
        for (company, mut history) in by_company {
            history.sort_by_key(|r| r.year);

            if let Some(pair) = history.windows(2).find(|w| w[0].year == w[1].year) {
                return Err(ScreenerError::DataIntegrity(format!(
                    "duplicate financial record for {} in {}",
                    company, pair[0].year
                )));
            }

            let mut prior_revenue = None;
            for facts in history {
                out.push(self.derive(facts, prior_revenue));
                if facts.revenue.is_none() {
                    tracing::debug!("{} {}: missing revenue, next year's growth undefined", company, facts.year);
                }
                prior_revenue = facts.revenue;
            }
        }

        tracing::debug!("Computed ratios for {} records", out.len());
        Ok(out)
    }
}

impl Default for RatioEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use screener_core::FinancialRecord;

    pub fn record(company: &str, year: i32, revenue: f64, net_income: f64) -> FinancialRecord {
        FinancialRecord {
            company: company.to_string(),
            sector: "Industrie".to_string(),
            year,
            revenue: Some(revenue),
            ebit: Some(net_income * 1.4),
            net_income: Some(net_income),
            total_assets: Some(revenue * 1.5),
            equity: Some(revenue * 0.6),
            total_debt: Some(revenue * 0.4),
            current_assets: Some(revenue * 0.5),
            current_liabilities: Some(revenue * 0.25),
            operating_cash_flow: Some(net_income * 1.2),
            capex: Some(revenue * 0.05),
        }
    }
}
