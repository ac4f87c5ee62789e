//! Read-only views over a scored universe: top-N, company profiles and
//! per-company time series.

use screener_core::{ExtraFinancialRecord, RatioRecord, Result, ScoreRecord, ScreenerError};
use serde::Serialize;

/// First `n` rows of the ranked table.
pub fn top_n(scores: &[ScoreRecord], n: usize) -> &[ScoreRecord] {
    &scores[..n.min(scores.len())]
}

/// Distinct company names, sorted.
pub fn companies(scores: &[ScoreRecord]) -> Vec<&str> {
    let mut names: Vec<&str> = scores.iter().map(|s| s.company.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Render a fraction as a percentage with one decimal, or "n/a".
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "n/a".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyRatios {
    pub net_margin: Option<f64>,
    pub roe: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub fcf_margin: Option<f64>,
    pub revenue_growth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyProfile {
    pub company: String,
    pub sector: String,
    pub year: i32,
    /// 1-based position in the ranked table
    pub rank: usize,
    pub revenue: Option<f64>,
    pub ebit: Option<f64>,
    pub net_income: Option<f64>,
    pub ratios: KeyRatios,
    pub extra: Option<ExtraFinancialRecord>,
    pub composite: f64,
    pub score_profile: Vec<(&'static str, f64)>,
}

/// Gather everything shown for one company.
///
/// `ratios` may hold every year; the profile uses the scored year.
pub fn company_profile(
    company: &str,
    scores: &[ScoreRecord],
    ratios: &[RatioRecord],
    extra: &[ExtraFinancialRecord],
) -> Result<CompanyProfile> {
    let (position, score) = scores
        .iter()
        .enumerate()
        .find(|(_, s)| s.company == company)
        .ok_or_else(|| ScreenerError::UnknownCompany(company.to_string()))?;

    let latest = ratios
        .iter()
        .find(|r| r.company() == company && r.year() == score.year)
        .ok_or_else(|| {
            ScreenerError::DataIntegrity(format!(
                "no ratio row for {} in scored year {}",
                company, score.year
            ))
        })?;

    Ok(CompanyProfile {
        company: score.company.clone(),
        sector: score.sector.clone(),
        year: score.year,
        rank: position + 1,
        revenue: latest.facts.revenue,
        ebit: latest.facts.ebit,
        net_income: latest.facts.net_income,
        ratios: KeyRatios {
            net_margin: latest.net_margin,
            roe: latest.roe,
            debt_to_equity: latest.debt_to_equity,
            current_ratio: latest.current_ratio,
            fcf_margin: latest.fcf_margin,
            revenue_growth: latest.revenue_growth,
        },
        extra: extra.iter().find(|e| e.company == company).cloned(),
        composite: score.composite,
        score_profile: score.profile(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IncomePoint {
    pub year: i32,
    pub revenue: Option<f64>,
    pub ebit: Option<f64>,
    pub net_income: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioPoint {
    pub year: i32,
    pub net_margin_pct: Option<f64>,
    pub ebit_margin_pct: Option<f64>,
    pub roe_pct: Option<f64>,
}

fn history<'a>(company: &str, ratios: &'a [RatioRecord]) -> Result<Vec<&'a RatioRecord>> {
    let mut rows: Vec<&RatioRecord> = ratios.iter().filter(|r| r.company() == company).collect();
    if rows.is_empty() {
        return Err(ScreenerError::UnknownCompany(company.to_string()));
    }
    rows.sort_by_key(|r| r.year());
    Ok(rows)
}

/// Revenue, EBIT and net income by year, ascending.
pub fn income_series(company: &str, ratios: &[RatioRecord]) -> Result<Vec<IncomePoint>> {
    Ok(history(company, ratios)?
        .into_iter()
        .map(|r| IncomePoint {
            year: r.year(),
            revenue: r.facts.revenue,
            ebit: r.facts.ebit,
            net_income: r.facts.net_income,
        })
        .collect())
}

/// Margins and ROE in percent by year, ascending.
pub fn ratio_series(company: &str, ratios: &[RatioRecord]) -> Result<Vec<RatioPoint>> {
    let pct = |v: Option<f64>| v.map(|x| x * 100.0);
    Ok(history(company, ratios)?
        .into_iter()
        .map(|r| RatioPoint {
            year: r.year(),
            net_margin_pct: pct(r.net_margin),
            ebit_margin_pct: pct(r.ebit_margin),
            roe_pct: pct(r.roe),
        })
        .collect())
}
