//! src/prices/window.rs
//!
//! Rolling display window and calendar-day partitioning of a consolidated
//! series. Both are pure functions of their inputs.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};

use super::model::{DayPartition, PriceHour, PriceSeries};

/// Hour key of the hour containing `instant`.
pub fn reference_hour_key(instant: NaiveDateTime) -> String {
    instant.format("%Y-%m-%dT%H:00").to_string()
}

/// Keep the entries at or after the hour of `reference`, at most
/// `window_hours` of them. Fewer qualifying entries are returned as-is.
pub fn select_window(
    series: &PriceSeries,
    reference: NaiveDateTime,
    window_hours: usize,
) -> PriceSeries {
    let from = reference_hour_key(reference);
    let hours: Vec<PriceHour> = series
        .iter()
        .filter(|h| h.hour_start >= from)
        .take(window_hours)
        .cloned()
        .collect();
    PriceSeries::from_sorted(hours)
}

/// Split `series` into one bucket per supplied date. Entries whose date
/// matches none of `days` are dropped; order within a bucket is preserved.
pub fn partition_by_day(series: &PriceSeries, days: &[NaiveDate]) -> BTreeMap<NaiveDate, PriceSeries> {
    let prefixes: Vec<(NaiveDate, String)> = days
        .iter()
        .map(|d| (*d, d.format("%Y-%m-%d").to_string()))
        .collect();

    let mut buckets: BTreeMap<NaiveDate, Vec<PriceHour>> =
        days.iter().map(|d| (*d, Vec::new())).collect();
    for hour in series {
        if let Some((date, _)) = prefixes.iter().find(|(_, p)| hour.date_prefix() == p) {
            if let Some(bucket) = buckets.get_mut(date) {
                bucket.push(hour.clone());
            }
        }
    }

    buckets
        .into_iter()
        .map(|(d, hours)| (d, PriceSeries::from_sorted(hours)))
        .collect()
}

impl DayPartition {
    /// Partition into `today` and the following calendar day.
    pub fn split(series: &PriceSeries, today: NaiveDate) -> Self {
        let Some(tomorrow) = today.checked_add_days(Days::new(1)) else {
            return Self {
                today: partition_by_day(series, &[today])
                    .remove(&today)
                    .unwrap_or_default(),
                tomorrow: PriceSeries::empty(),
            };
        };
        let mut buckets = partition_by_day(series, &[today, tomorrow]);
        Self {
            today: buckets.remove(&today).unwrap_or_default(),
            tomorrow: buckets.remove(&tomorrow).unwrap_or_default(),
        }
    }
}
