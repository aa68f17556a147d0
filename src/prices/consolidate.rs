//! src/prices/consolidate.rs
//!
//! Hourly consolidation: groups raw samples by clock hour, averages each
//! group and emits the groups in ascending hour order.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use super::model::{PriceHour, PriceSeries, RawSample};

/// Truncate an ISO-8601 timestamp to its hour key (`YYYY-MM-DDTHH:00`).
///
/// Accepts either `T` or a space between date and time. Returns `None` for
/// anything that is not a valid calendar date and hour.
pub fn hour_key(timestamp: &str) -> Option<String> {
    let prefix = timestamp.get(..13)?;
    let bytes = prefix.as_bytes();
    let digits_ok = [0, 1, 2, 3, 5, 6, 8, 9, 11, 12]
        .iter()
        .all(|&i| bytes[i].is_ascii_digit());
    let seps_ok = bytes[4] == b'-' && bytes[7] == b'-' && matches!(bytes[10], b'T' | b' ');
    if !digits_ok || !seps_ok {
        return None;
    }

    let key = format!("{}T{}:00", &prefix[..10], &prefix[11..13]);
    NaiveDateTime::parse_from_str(&key, "%Y-%m-%dT%H:%M").ok()?;
    Some(key)
}

/// Reduce `samples` to one averaged [`PriceHour`] per distinct hour.
///
/// Samples with an unparseable timestamp or a non-finite price are skipped.
/// Empty input yields an empty series.
pub fn consolidate(samples: &[RawSample]) -> PriceSeries {
    // hour key -> (sum, count)
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let mut skipped = 0usize;

    for sample in samples {
        let Some(key) = hour_key(&sample.timestamp) else {
            warn!(timestamp = %sample.timestamp, "skipping sample with malformed timestamp");
            skipped += 1;
            continue;
        };
        if !sample.price.is_finite() {
            warn!(timestamp = %sample.timestamp, "skipping sample with non-finite price");
            skipped += 1;
            continue;
        }
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += sample.price;
        entry.1 += 1;
    }

    let hours: Vec<PriceHour> = groups
        .into_iter()
        .map(|(key, (sum, count))| PriceHour::new(key, sum / count as f64))
        .collect();

    debug!(
        raw = samples.len(),
        skipped,
        hourly = hours.len(),
        "consolidated samples"
    );
    PriceSeries::from_sorted(hours)
}
