//! src/prices/model.rs
//!
//! Raw samples as delivered by a price source, consolidated hourly prices,
//! and the hour-sorted series built from them.
//!
//! Hour keys are fixed-width, zero-padded ISO prefixes (`YYYY-MM-DDTHH:00`),
//! so plain string comparison orders them chronologically.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// One price observation as received from a source. Sources may publish
/// several samples per hour (e.g. 15-minute resolution).
#[derive(Clone, Debug, PartialEq)]
pub struct RawSample {
    /// ISO-8601 timestamp with at least minute granularity.
    pub timestamp: String,
    pub price: f64,
}

impl RawSample {
    pub fn new(timestamp: impl Into<String>, price: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            price,
        }
    }
}

/// Average price of one clock hour.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceHour {
    /// Hour key, `YYYY-MM-DDTHH:00`.
    pub hour_start: String,
    pub price: f64,
}

impl PriceHour {
    pub fn new(hour_start: impl Into<String>, price: f64) -> Self {
        Self {
            hour_start: hour_start.into(),
            price,
        }
    }

    /// Calendar-date prefix of the hour key (`YYYY-MM-DD`).
    pub fn date_prefix(&self) -> &str {
        self.hour_start.get(..10).unwrap_or(&self.hour_start)
    }

    /// Whether this hour falls on `date`.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date_prefix() == date.format("%Y-%m-%d").to_string()
    }

    /// Hour of day (0..=23) taken from the key.
    pub fn hour_of_day(&self) -> Option<u32> {
        self.hour_start.get(11..13)?.parse().ok()
    }

    /// `HH:MM` part of the key, used as the row label.
    pub fn clock_label(&self) -> &str {
        self.hour_start.get(11..16).unwrap_or("")
    }
}

/// Hour-sorted sequence of [`PriceHour`] with at most one entry per hour key.
///
/// Built fresh by [`consolidate`](super::consolidate) or derived by the
/// window stage; never mutated in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceSeries {
    hours: Vec<PriceHour>,
}

impl PriceSeries {
    /// Wrap hours that are already strictly ascending by key.
    pub(crate) fn from_sorted(hours: Vec<PriceHour>) -> Self {
        debug_assert!(
            hours.windows(2).all(|w| w[0].hour_start < w[1].hour_start),
            "price series must be strictly ascending by hour key"
        );
        Self { hours }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceHour> {
        self.hours.iter()
    }

    pub fn as_slice(&self) -> &[PriceHour] {
        &self.hours
    }

    /// (min, max) over all prices, `None` for an empty series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut mn = f64::INFINITY;
        let mut mx = f64::NEG_INFINITY;
        for h in &self.hours {
            if h.price < mn {
                mn = h.price;
            }
            if h.price > mx {
                mx = h.price;
            }
        }
        if mn.is_finite() && mx.is_finite() {
            Some((mn, mx))
        } else {
            None
        }
    }

    /// Fill in the hours of `dates` from `previous` where this series has
    /// none. Used when a date's fetch failed so its hours stay on screen.
    pub fn carry_over(self, previous: &PriceSeries, dates: &[NaiveDate]) -> Self {
        if dates.is_empty() {
            return self;
        }
        let mut merged: BTreeMap<String, PriceHour> = previous
            .iter()
            .filter(|h| dates.iter().any(|d| h.is_on(*d)))
            .map(|h| (h.hour_start.clone(), h.clone()))
            .collect();
        merged.extend(self.hours.into_iter().map(|h| (h.hour_start.clone(), h)));
        Self::from_sorted(merged.into_values().collect())
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceHour;
    type IntoIter = std::slice::Iter<'a, PriceHour>;

    fn into_iter(self) -> Self::IntoIter {
        self.hours.iter()
    }
}

/// The "today" and "tomorrow" buckets of a windowed series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayPartition {
    pub today: PriceSeries,
    pub tomorrow: PriceSeries,
}

impl DayPartition {
    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.tomorrow.is_empty()
    }
}
