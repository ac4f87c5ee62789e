//! Screener Data
//!
//! CSV loading and export for the screener tables, plus read-only views used by
//! the command line front end.

pub mod export;
pub mod loader;
pub mod schema;
pub mod views;

pub use export::{read_scores, write_extra_financials, write_financials, write_scores};
pub use loader::{
    load_extra_financials, load_extra_financials_path, load_financials, load_financials_path,
};
pub use schema::{EXTRA_COLUMNS, FINANCIAL_COLUMNS, SCORE_COLUMNS};
pub use views::{
    companies, company_profile, format_percent, income_series, ratio_series, top_n,
    CompanyProfile, IncomePoint, KeyRatios, RatioPoint,
};
