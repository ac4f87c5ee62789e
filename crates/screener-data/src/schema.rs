//! Column schemas for the input and output tables.

use csv::StringRecord;
use screener_core::{Result, ScreenerError};
use std::collections::HashMap;

pub const FINANCIAL_TABLE: &str = "financials";
pub const EXTRA_TABLE: &str = "extra_financials";
pub const SCORE_TABLE: &str = "scores";

pub const FINANCIAL_COLUMNS: [&str; 13] = [
    "entreprise",
    "secteur",
    "annee",
    "chiffre_affaires_m",
    "ebit_m",
    "resultat_net_m",
    "actifs_totaux_m",
    "capitaux_propres_m",
    "dette_totale_m",
    "actifs_courants_m",
    "passifs_courants_m",
    "flux_tresorerie_op_m",
    "capex_m",
];

pub const EXTRA_COLUMNS: [&str; 4] = [
    "entreprise",
    "intensite_carbone",
    "part_ca_vert",
    "score_esg_global",
];

pub const SCORE_COLUMNS: [&str; 10] = [
    "entreprise",
    "annee",
    "secteur",
    "score_global",
    "score_profitabilite",
    "score_croissance",
    "score_solidite",
    "score_liquidite",
    "score_cashflow",
    "score_extra_financier",
];

/// Maps required column names to their position in a header row.
///
/// Column order in the file is free and unknown columns are ignored; only a
/// missing required column is an error.
pub(crate) struct ColumnIndex {
    table: &'static str,
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    pub fn resolve(table: &'static str, headers: &StringRecord, required: &[&'static str]) -> Result<Self> {
        let mut positions = HashMap::with_capacity(required.len());
        for &column in required {
            let position = headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}') == column)
                .ok_or_else(|| ScreenerError::Schema {
                    table: table.to_string(),
                    column: column.to_string(),
                })?;
            positions.insert(column, position);
        }
        Ok(Self { table, positions })
    }

    fn raw<'r>(&self, record: &'r StringRecord, column: &'static str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
            .trim()
    }

    fn parse_error(&self, row: usize, column: &str, value: &str) -> ScreenerError {
        ScreenerError::Parse {
            table: self.table.to_string(),
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    /// Non-empty text cell (identifiers)
    pub fn key(&self, record: &StringRecord, row: usize, column: &'static str) -> Result<String> {
        let value = self.raw(record, column);
        if value.is_empty() {
            return Err(self.parse_error(row, column, value));
        }
        Ok(value.to_string())
    }

    pub fn text(&self, record: &StringRecord, column: &'static str) -> String {
        self.raw(record, column).to_string()
    }

    /// Fiscal year; accepts "2023" as well as "2023.0"
    pub fn year(&self, record: &StringRecord, row: usize, column: &'static str) -> Result<i32> {
        let value = self.raw(record, column);
        if let Ok(year) = value.parse::<i32>() {
            return Ok(year);
        }
        match value.parse::<f64>() {
            Ok(y) if y.fract() == 0.0 && y.abs() < i32::MAX as f64 => Ok(y as i32),
            _ => Err(self.parse_error(row, column, value)),
        }
    }

    /// Numeric cell; empty or NaN cells are missing values
    pub fn number(&self, record: &StringRecord, row: usize, column: &'static str) -> Result<Option<f64>> {
        let value = self.raw(record, column);
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<f64>()
            .map(|v| Some(v).filter(|x| x.is_finite()))
            .map_err(|_| self.parse_error(row, column, value))
    }
}

/// 1-based line number of a record, falling back to its data index
pub(crate) fn line_of(record: &StringRecord, index: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(index + 2)
}
