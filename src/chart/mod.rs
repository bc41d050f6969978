//! Read-only projection of an item's records into an occurrence series, and a text rendering of it.

pub mod render;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::utils::time::parse_timestamp;

/// The n-th occurrence (1 based) of an item happened at `moment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrencePoint {
    pub moment: NaiveDateTime,
    pub rank: usize,
}

/// Turns records into a monotonic rank-over-time series, ordered by time whatever the input order.
/// Records that can't be parsed (only possible for a hand edited data file) are skipped and don't
/// take a rank.
pub fn occurrence_series<'a>(records: impl IntoIterator<Item = &'a str>) -> Vec<OccurrencePoint> {
    let mut moments = records
        .into_iter()
        .filter_map(|record| {
            let moment = parse_timestamp(record);
            if moment.is_none() {
                warn!("Skipping unparsable record {record:?}");
            }
            moment
        })
        .collect::<Vec<_>>();
    moments.sort();

    moments
        .into_iter()
        .enumerate()
        .map(|(index, moment)| OccurrencePoint {
            moment,
            rank: index + 1,
        })
        .collect()
}
