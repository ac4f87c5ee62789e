//! Rank-based normalization shared by every scored indicator.
//!
//! Raw ratios live on very different scales (margins, leverage multiples, tonnes of
//! CO2 per unit of revenue). Each column is converted to a 0-100 score from its
//! percentile rank within the peer population, so a single extreme value cannot
//! stretch the scale for everybody else.

/// Score given to missing values and to undifferentiated populations.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Fewer non-null values than this and the whole column scores neutral.
pub const MIN_POPULATION: usize = 2;

/// Direction of "better" for a raw indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Higher raw value is better
    Max,
    /// Lower raw value is better
    Min,
}

impl Sense {
    /// Orient a percentile (0.0-1.0) so that higher always means better.
    pub fn orient(&self, percentile: f64) -> f64 {
        match self {
            Sense::Max => percentile,
            Sense::Min => 1.0 - percentile,
        }
    }
}

fn usable(value: &Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Percentile rank of every non-null value among the non-null values (0.0-1.0].
///
/// Ranks are 1-based and tied values share the average of their ranks, so the
/// largest value always maps to 1.0. Missing and non-finite entries stay `None`.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| usable(v).map(|x| (i, x)))
        .collect();

    let mut ranks = vec![None; values.len()];
    let n = present.len();
    if n == 0 {
        return ranks;
    }

    present.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && present[end].1 == present[start].1 {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &(idx, _) in &present[start..end] {
            ranks[idx] = Some(avg_rank / n as f64);
        }
        start = end;
    }

    ranks
}

/// Convert a column of raw values into 0-100 scores.
///
/// Null entries score [`NEUTRAL_SCORE`]. When fewer than [`MIN_POPULATION`]
/// values are present, every entry (null or not) scores neutral.
pub fn percentile_scores(values: &[Option<f64>], sense: Sense) -> Vec<f64> {
    let population = values.iter().filter(|v| usable(v).is_some()).count();
    if population < MIN_POPULATION {
        return vec![NEUTRAL_SCORE; values.len()];
    }

    percentile_ranks(values)
        .into_iter()
        .map(|rank| match rank {
            Some(p) => 100.0 * sense.orient(p),
            None => NEUTRAL_SCORE,
        })
        .collect()
}

/// Round to one decimal place, ties to even.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
