//! CSV loading for the financial and extra-financial tables.

use crate::schema::{line_of, ColumnIndex, EXTRA_COLUMNS, EXTRA_TABLE, FINANCIAL_COLUMNS, FINANCIAL_TABLE};
use screener_core::{ExtraFinancialRecord, FinancialRecord, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

fn reader_for<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Parse the financial facts table.
///
/// Every required column must be present in the header. Empty numeric cells
/// load as missing values. Rows are returned sorted by (company, year).
pub fn load_financials<R: Read>(input: R) -> Result<Vec<FinancialRecord>> {
    let mut reader = reader_for(input);
    let headers = reader.headers()?.clone();
    let cols = ColumnIndex::resolve(FINANCIAL_TABLE, &headers, &FINANCIAL_COLUMNS)?;

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = line_of(&record, index);

        rows.push(FinancialRecord {
            company: cols.key(&record, line, "entreprise")?,
            sector: cols.text(&record, "secteur"),
            year: cols.year(&record, line, "annee")?,
            revenue: cols.number(&record, line, "chiffre_affaires_m")?,
            ebit: cols.number(&record, line, "ebit_m")?,
            net_income: cols.number(&record, line, "resultat_net_m")?,
            total_assets: cols.number(&record, line, "actifs_totaux_m")?,
            equity: cols.number(&record, line, "capitaux_propres_m")?,
            total_debt: cols.number(&record, line, "dette_totale_m")?,
            current_assets: cols.number(&record, line, "actifs_courants_m")?,
            current_liabilities: cols.number(&record, line, "passifs_courants_m")?,
            operating_cash_flow: cols.number(&record, line, "flux_tresorerie_op_m")?,
            capex: cols.number(&record, line, "capex_m")?,
        });
    }

    rows.sort_by(|a, b| a.company.cmp(&b.company).then(a.year.cmp(&b.year)));
    tracing::debug!("Parsed {} financial records", rows.len());
    Ok(rows)
}

/// Parse the extra-financial table. Rows are returned sorted by company.
pub fn load_extra_financials<R: Read>(input: R) -> Result<Vec<ExtraFinancialRecord>> {
    let mut reader = reader_for(input);
    let headers = reader.headers()?.clone();
    let cols = ColumnIndex::resolve(EXTRA_TABLE, &headers, &EXTRA_COLUMNS)?;

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = line_of(&record, index);

        rows.push(ExtraFinancialRecord {
            company: cols.key(&record, line, "entreprise")?,
            carbon_intensity: cols.number(&record, line, "intensite_carbone")?,
            green_revenue_share: cols.number(&record, line, "part_ca_vert")?,
            esg_score: cols.number(&record, line, "score_esg_global")?,
        });
    }

    // stable: duplicate companies keep file order for the integrity check downstream
    rows.sort_by(|a, b| a.company.cmp(&b.company));
    tracing::debug!("Parsed {} extra-financial records", rows.len());
    Ok(rows)
}

pub fn load_financials_path(path: impl AsRef<Path>) -> Result<Vec<FinancialRecord>> {
    let path = path.as_ref();
    let rows = load_financials(File::open(path)?)?;
    tracing::info!("Loaded {} financial records from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn load_extra_financials_path(path: impl AsRef<Path>) -> Result<Vec<ExtraFinancialRecord>> {
    let path = path.as_ref();
    let rows = load_extra_financials(File::open(path)?)?;
    tracing::info!("Loaded {} extra-financial records from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_core::ScreenerError;

    const FINANCIALS: &str = "\
entreprise,secteur,annee,chiffre_affaires_m,ebit_m,resultat_net_m,actifs_totaux_m,capitaux_propres_m,dette_totale_m,actifs_courants_m,passifs_courants_m,flux_tresorerie_op_m,capex_m
Beta,Energie,2023,500,60,40,900,300,200,250,180,70,30
Alpha,Industrie,2023,1200,150,90,2000,800,400,600,350,140,60
Alpha,Industrie,2022,1100,130,,1900,760,420,560,340,120,55
";

    const EXTRA: &str = "\
entreprise,intensite_carbone,part_ca_vert,score_esg_global
Beta,310.5,0.05,48
Alpha,120,0.22,71
";

    #[test]
    fn test_load_financials_sorted() {
        let rows = load_financials(FINANCIALS.as_bytes()).unwrap();
        let keys: Vec<(&str, i32)> = rows.iter().map(|r| (r.company.as_str(), r.year)).collect();
        assert_eq!(keys, vec![("Alpha", 2022), ("Alpha", 2023), ("Beta", 2023)]);
        assert_eq!(rows[0].net_income, None);
        assert_eq!(rows[1].revenue, Some(1200.0));
        assert_eq!(rows[2].sector, "Energie");
    }

    #[test]
    fn test_load_extra_sorted() {
        let rows = load_extra_financials(EXTRA.as_bytes()).unwrap();
        assert_eq!(rows[0].company, "Alpha");
        assert_eq!(rows[1].carbon_intensity, Some(310.5));
        assert_eq!(rows[1].esg_score, Some(48.0));
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "entreprise,secteur,annee,chiffre_affaires_m\nAlpha,Industrie,2023,100\n";
        let err = load_financials(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ScreenerError::Schema { ref column, .. } if column == "ebit_m"));
    }

    #[test]
    fn test_missing_column_fails_even_without_rows() {
        let csv = "entreprise,intensite_carbone,score_esg_global\n";
        let err = load_extra_financials(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ScreenerError::Schema { ref column, .. } if column == "part_ca_vert"));
    }

    #[test]
    fn test_malformed_number_reports_line() {
        let csv = "entreprise,intensite_carbone,part_ca_vert,score_esg_global\nAlpha,12,0.1,70\nBeta,high,0.2,60\n";
        let err = load_extra_financials(csv.as_bytes()).unwrap_err();
        match err {
            ScreenerError::Parse { row, column, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, "intensite_carbone");
                assert_eq!(value, "high");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_financials_path("/nonexistent/donnees_financieres.csv").unwrap_err();
        assert!(matches!(err, ScreenerError::Io(_)));
    }
}
