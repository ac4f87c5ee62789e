//! CSV export of the score table and the input datasets.
//!
//! Headers are always written, even for an empty table, so a downstream
//! reader can still validate the schema.

use crate::schema::{ColumnIndex, EXTRA_COLUMNS, FINANCIAL_COLUMNS, SCORE_COLUMNS, SCORE_TABLE};
use screener_core::{ExtraFinancialRecord, FinancialRecord, Result, ScoreRecord};
use serde::Serialize;
use std::io::{Read, Write};

fn write_table<W: Write, T: Serialize>(output: W, columns: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the ranked score table in rank order.
pub fn write_scores<W: Write>(output: W, scores: &[ScoreRecord]) -> Result<()> {
    write_table(output, &SCORE_COLUMNS, scores)?;
    tracing::debug!("Wrote {} score rows", scores.len());
    Ok(())
}

pub fn write_financials<W: Write>(output: W, records: &[FinancialRecord]) -> Result<()> {
    write_table(output, &FINANCIAL_COLUMNS, records)
}

pub fn write_extra_financials<W: Write>(output: W, records: &[ExtraFinancialRecord]) -> Result<()> {
    write_table(output, &EXTRA_COLUMNS, records)
}

/// Read back a previously exported score table, preserving row order.
pub fn read_scores<R: Read>(input: R) -> Result<Vec<ScoreRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();
    ColumnIndex::resolve(SCORE_TABLE, &headers, &SCORE_COLUMNS)?;

    let mut scores = Vec::new();
    for result in reader.deserialize() {
        let record: ScoreRecord = result?;
        scores.push(record);
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_extra_financials, load_financials};
    use approx::assert_abs_diff_eq;
    use ratio_engine::{latest_period, RatioEngine};
    use scoring_engine::{score, WeightConfig};
    use screener_core::ScreenerError;

    fn sample_score(company: &str, composite: f64) -> ScoreRecord {
        ScoreRecord {
            company: company.to_string(),
            year: 2023,
            sector: "Industrie".to_string(),
            composite,
            profitability: 62.5,
            growth: 50.0,
            solidity: 87.5,
            liquidity: 25.0,
            cashflow: 50.0,
            extra_financial: 37.5,
        }
    }

    #[test]
    fn test_score_header_order() {
        let mut buf = Vec::new();
        write_scores(&mut buf, &[sample_score("Alpha", 71.3)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), SCORE_COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "Alpha,2023,Industrie,71.3,62.5,50.0,87.5,25.0,50.0,37.5"
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let mut buf = Vec::new();
        write_scores(&mut buf, &[]).unwrap();
        let scores = read_scores(buf.as_slice()).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_scores_read_back_in_rank_order() {
        let scores = vec![sample_score("Gamma", 80.0), sample_score("Alpha", 40.0)];
        let mut buf = Vec::new();
        write_scores(&mut buf, &scores).unwrap();
        assert_eq!(read_scores(buf.as_slice()).unwrap(), scores);
    }

    #[test]
    fn test_read_scores_requires_every_column() {
        let csv = "entreprise,annee,secteur,score_global\nAlpha,2023,Industrie,50\n";
        let err = read_scores(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ScreenerError::Schema { ref column, .. } if column == "score_profitabilite"));
    }

    #[test]
    fn test_missing_values_survive_export() {
        let csv = "entreprise,intensite_carbone,part_ca_vert,score_esg_global\nAlpha,,0.3,\n";
        let extra = load_extra_financials(csv.as_bytes()).unwrap();

        let mut buf = Vec::new();
        write_extra_financials(&mut buf, &extra).unwrap();
        assert_eq!(load_extra_financials(buf.as_slice()).unwrap(), extra);
    }

    #[test]
    fn test_financials_export_reloads() {
        let csv = "\
entreprise,secteur,annee,chiffre_affaires_m,ebit_m,resultat_net_m,actifs_totaux_m,capitaux_propres_m,dette_totale_m,actifs_courants_m,passifs_courants_m,flux_tresorerie_op_m,capex_m
Alpha,Industrie,2023,1200,150,90,2000,800,400,600,350,140,
";
        let records = load_financials(csv.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_financials(&mut buf, &records).unwrap();
        let reloaded = load_financials(buf.as_slice()).unwrap();
        assert_eq!(reloaded, records);
        assert_eq!(reloaded[0].capex, None);
    }

    #[test]
    fn test_scored_pipeline_survives_export() {
        let financials = "\
entreprise,secteur,annee,chiffre_affaires_m,ebit_m,resultat_net_m,actifs_totaux_m,capitaux_propres_m,dette_totale_m,actifs_courants_m,passifs_courants_m,flux_tresorerie_op_m,capex_m
Alpha,Industrie,2022,1100,130,80,1900,760,420,560,340,120,55
Alpha,Industrie,2023,1200,150,90,2000,800,400,600,350,140,60
Beta,Energie,2022,520,64,41,880,290,210,240,170,75,28
Beta,Energie,2023,500,60,40,900,300,200,250,180,70,30
Gamma,Sante,2023,300,45,33,520,280,60,170,90,41,9
";
        let extra = "\
entreprise,intensite_carbone,part_ca_vert,score_esg_global
Alpha,120,0.22,71
Beta,310.5,0.05,48
";
        let records = load_financials(financials.as_bytes()).unwrap();
        let extra = load_extra_financials(extra.as_bytes()).unwrap();
        let ratios = RatioEngine::new().compute(&records).unwrap();
        let latest = latest_period(&ratios).unwrap();
        let scores = score(&latest, &extra, &WeightConfig::default()).unwrap();

        let mut buf = Vec::new();
        write_scores(&mut buf, &scores).unwrap();
        let reloaded = read_scores(buf.as_slice()).unwrap();

        assert_eq!(reloaded.len(), scores.len());
        for (before, after) in scores.iter().zip(reloaded.iter()) {
            assert_eq!(before.company, after.company);
            assert_eq!(before.year, after.year);
            assert_abs_diff_eq!(before.composite, after.composite, epsilon = 0.05);
            assert_eq!(format!("{:.1}", before.composite), format!("{:.1}", after.composite));
        }
    }
}
