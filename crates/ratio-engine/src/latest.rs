//! Latest-Period Selector

use screener_core::{RatioRecord, Result, ScreenerError};
use std::collections::BTreeMap;

/// Keep one row per company: the one with the highest fiscal year.
///
/// Output is ordered by company. Two rows sharing a company's latest year make
/// the choice ambiguous and are reported as a data integrity error rather than
/// resolved silently.
pub fn latest_period(records: &[RatioRecord]) -> Result<Vec<RatioRecord>> {
    let mut latest: BTreeMap<&str, &RatioRecord> = BTreeMap::new();
    let mut ambiguous: BTreeMap<&str, i32> = BTreeMap::new();

    for record in records {
        let current_year = latest.get(record.company()).map(|r| r.year());
        match current_year {
            Some(year) if year > record.year() => {}
            Some(year) if year == record.year() => {
                ambiguous.insert(record.company(), record.year());
            }
            _ => {
                latest.insert(record.company(), record);
                ambiguous.remove(record.company());
            }
        }
    }

    if let Some((company, year)) = ambiguous.into_iter().next() {
        return Err(ScreenerError::DataIntegrity(format!(
            "multiple records for {} in latest year {}",
            company, year
        )));
    }

    tracing::debug!("Selected latest period for {} companies out of {} rows", latest.len(), records.len());
    Ok(latest.into_values().cloned().collect())
}
