use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Schema error: table '{table}' is missing required column '{column}'")]
    Schema { table: String, column: String },

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Parse error: table '{table}', row {row}, column '{column}': invalid value '{value}'")]
    Parse {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid weight for {category}: {value} (weights must be finite and non-negative)")]
    InvalidWeight { category: String, value: f64 },

    #[error("Unknown company: {0}")]
    UnknownCompany(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
