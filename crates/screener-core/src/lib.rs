pub mod error;
pub mod percentile;
pub mod types;

pub use error::*;
pub use percentile::{percentile_scores, round_to_tenth, Sense, NEUTRAL_SCORE};
pub use types::*;
