//! Plain-text rendering for the terminal.

use screener_core::ScoreRecord;
use screener_data::{format_percent, CompanyProfile, IncomePoint, RatioPoint};

const MIN_WIDTH: usize = 4;

/// Render an aligned table; numeric-looking cells are right-aligned.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(MIN_WIDTH)
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(header, *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map(String::as_str).unwrap_or("-");
                format_cell(value, *width, looks_numeric(value))
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn format_cell(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim_end_matches('%');
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

fn amount(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}

pub fn score_table(scores: &[ScoreRecord]) -> String {
    let headers = [
        "#", "company", "sector", "year", "score", "profit", "growth", "solidity", "liquidity",
        "cash", "extra",
    ];
    let rows: Vec<Vec<String>> = scores
        .iter()
        .enumerate()
        .map(|(i, s)| {
            vec![
                (i + 1).to_string(),
                s.company.clone(),
                s.sector.clone(),
                s.year.to_string(),
                format!("{:.1}", s.composite),
                format!("{:.1}", s.profitability),
                format!("{:.1}", s.growth),
                format!("{:.1}", s.solidity),
                format!("{:.1}", s.liquidity),
                format!("{:.1}", s.cashflow),
                format!("{:.1}", s.extra_financial),
            ]
        })
        .collect();
    render_table(&headers, &rows)
}

pub fn profile_card(profile: &CompanyProfile) -> String {
    let ratios = &profile.ratios;
    let mut rows = vec![
        vec!["sector".to_string(), profile.sector.clone()],
        vec!["year".to_string(), profile.year.to_string()],
        vec!["rank".to_string(), profile.rank.to_string()],
        vec!["composite".to_string(), format!("{:.1}", profile.composite)],
        vec!["revenue".to_string(), amount(profile.revenue)],
        vec!["ebit".to_string(), amount(profile.ebit)],
        vec!["net income".to_string(), amount(profile.net_income)],
        vec!["net margin".to_string(), format_percent(ratios.net_margin)],
        vec!["roe".to_string(), format_percent(ratios.roe)],
        vec![
            "debt/equity".to_string(),
            ratios.debt_to_equity.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}")),
        ],
        vec![
            "current ratio".to_string(),
            ratios.current_ratio.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}")),
        ],
        vec!["fcf margin".to_string(), format_percent(ratios.fcf_margin)],
        vec!["revenue growth".to_string(), format_percent(ratios.revenue_growth)],
    ];

    if let Some(extra) = &profile.extra {
        rows.push(vec!["carbon intensity".to_string(), amount(extra.carbon_intensity)]);
        rows.push(vec!["green revenue".to_string(), format_percent(extra.green_revenue_share)]);
        rows.push(vec!["esg score".to_string(), amount(extra.esg_score)]);
    }

    for (label, value) in &profile.score_profile {
        rows.push(vec![format!("score {}", label.to_lowercase()), format!("{value:.1}")]);
    }

    format!("{}\n\n{}", profile.company, render_table(&["field", "value"], &rows))
}

pub fn income_table(points: &[IncomePoint]) -> String {
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| vec![p.year.to_string(), amount(p.revenue), amount(p.ebit), amount(p.net_income)])
        .collect();
    render_table(&["year", "revenue", "ebit", "net income"], &rows)
}

pub fn ratio_table(points: &[RatioPoint]) -> String {
    let pct = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |x| format!("{x:.1}%"));
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                p.year.to_string(),
                pct(p.net_margin_pct),
                pct(p.ebit_margin_pct),
                pct(p.roe_pct),
            ]
        })
        .collect();
    render_table(&["year", "net margin", "ebit margin", "roe"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_alignment() {
        let rows = vec![
            vec!["Alpha".to_string(), "7.5".to_string()],
            vec!["Longer name".to_string(), "100.0".to_string()],
        ];
        let table = render_table(&["company", "score"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        // numbers are right-aligned on the same column edge
        assert!(lines[2].ends_with("  7.5"));
        assert!(lines[3].ends_with("100.0"));
        assert_eq!(lines[2].len(), lines[3].len());
    }

    #[test]
    fn test_missing_cells_render_as_dash() {
        let table = render_table(&["a", "b"], &[vec!["x".to_string()]]);
        assert!(table.lines().nth(2).unwrap().ends_with('-'));
    }

    #[test]
    fn test_looks_numeric() {
        assert!(looks_numeric("12.5"));
        assert!(looks_numeric("-3.0%"));
        assert!(!looks_numeric("n/a"));
        assert!(!looks_numeric("%"));
    }

    #[test]
    fn test_score_table_ranks_from_one() {
        let record = ScoreRecord {
            company: "Alpha".to_string(),
            year: 2023,
            sector: "Industrie".to_string(),
            composite: 64.0,
            profitability: 50.0,
            growth: 50.0,
            solidity: 100.0,
            liquidity: 50.0,
            cashflow: 50.0,
            extra_financial: 50.0,
        };
        let table = score_table(&[record]);
        let row = table.lines().nth(2).unwrap();
        assert!(row.trim_start().starts_with("1  Alpha"));
        assert!(row.contains("64.0"));
    }
}
