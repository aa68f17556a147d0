//! src/net/fetch.rs
//!
//! Price sources. `ElprisetClient` downloads one day of Nordic spot prices
//! per request from the elprisetjustnu.se API; `DemoSource` synthesizes a
//! plausible day offline.
//!
//! The API answers `GET {base}/{YYYY}/{MM}-{DD}_{AREA}.json` with an array of
//! `{ "SEK_per_kWh", "EUR_per_kWh", "EXR", "time_start", "time_end" }`.
//! Since the move to 15-minute market resolution a day can carry 96 entries;
//! consolidation folds them back into hours.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::prices::RawSample;

pub const DEFAULT_BASE_URL: &str = "https://www.elprisetjustnu.se/api/v1/prices";

/// Anything that can deliver one day of raw samples.
pub trait PriceSource {
    fn fetch(&self, date: NaiveDate) -> Result<Vec<RawSample>, FetchError>;

    /// Short name for logs and the title bar.
    fn name(&self) -> &str;
}

/// Swedish bidding zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PriceArea {
    #[value(name = "SE1", alias = "se1")]
    Se1,
    #[value(name = "SE2", alias = "se2")]
    Se2,
    #[default]
    #[value(name = "SE3", alias = "se3")]
    Se3,
    #[value(name = "SE4", alias = "se4")]
    Se4,
}

impl PriceArea {
    pub fn code(self) -> &'static str {
        match self {
            PriceArea::Se1 => "SE1",
            PriceArea::Se2 => "SE2",
            PriceArea::Se3 => "SE3",
            PriceArea::Se4 => "SE4",
        }
    }
}

/// Which price column of the API response becomes the sample price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Currency {
    #[default]
    Sek,
    Eur,
}

impl Currency {
    pub fn unit(self) -> &'static str {
        match self {
            Currency::Sek => "SEK/kWh",
            Currency::Eur => "EUR/kWh",
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    time_start: Option<String>,
    #[serde(rename = "SEK_per_kWh")]
    sek_per_kwh: Option<f64>,
    #[serde(rename = "EUR_per_kWh")]
    eur_per_kwh: Option<f64>,
}

/// Decode an API response body. Entries that lack a start time or the
/// requested price column are skipped; only an unreadable body is an error.
pub fn decode_prices(body: &str, currency: Currency) -> Result<Vec<RawSample>, FetchError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = entries.len();

    let samples: Vec<RawSample> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            let entry = match serde_json::from_value::<WireEntry>(value) {
                Ok(e) => e,
                Err(e) => {
                    warn!(index = i, error = %e, "skipping undecodable price entry");
                    return None;
                }
            };
            let price = match currency {
                Currency::Sek => entry.sek_per_kwh,
                Currency::Eur => entry.eur_per_kwh,
            };
            match (entry.time_start, price) {
                (Some(ts), Some(p)) => Some(RawSample::new(ts, p)),
                _ => {
                    warn!(index = i, "skipping price entry without time_start or price");
                    None
                }
            }
        })
        .collect();

    debug!(total, kept = samples.len(), "decoded price entries");
    Ok(samples)
}

/// Blocking HTTP client for the elprisetjustnu.se price API.
pub struct ElprisetClient {
    http: reqwest::blocking::Client,
    base_url: String,
    area: PriceArea,
    currency: Currency,
}

impl ElprisetClient {
    pub fn new(
        base_url: &str,
        area: PriceArea,
        currency: Currency,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("spot-board/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            area,
            currency,
        })
    }

    /// Request URL for one day.
    pub fn url_for(&self, date: NaiveDate) -> String {
        format!(
            "{}/{}/{}_{}.json",
            self.base_url,
            date.format("%Y"),
            date.format("%m-%d"),
            self.area.code()
        )
    }
}

impl PriceSource for ElprisetClient {
    fn fetch(&self, date: NaiveDate) -> Result<Vec<RawSample>, FetchError> {
        let url = self.url_for(date);
        info!(%url, "fetching prices");

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotPublished(date));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text()?;
        let samples = decode_prices(&body, self.currency)?;
        info!(%date, entries = samples.len(), "received prices");
        Ok(samples)
    }

    fn name(&self) -> &str {
        self.area.code()
    }
}

/// Offline source producing a two-peak day at 15-minute resolution.
pub struct DemoSource {
    seed: u64,
}

impl DemoSource {
    pub const SAMPLES_PER_DAY: usize = 96;

    /// Fixed seed: the same date always yields the same prices.
    pub fn seeded(seed: u64) -> Self {
        Self { seed }
    }

    pub fn random() -> Self {
        Self::seeded(rand::random())
    }

    fn base_price(hour: f64) -> f64 {
        let morning = 0.5 * (-(hour - 8.0).powi(2) / 4.0).exp();
        let evening = 0.8 * (-(hour - 18.0).powi(2) / 6.0).exp();
        0.4 + morning + evening
    }
}

impl PriceSource for DemoSource {
    fn fetch(&self, date: NaiveDate) -> Result<Vec<RawSample>, FetchError> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ date.num_days_from_ce() as u64);
        let day_level: f64 = rng.random_range(0.7..1.4);

        let samples = (0..Self::SAMPLES_PER_DAY)
            .map(|i| {
                let (h, m) = (i / 4, (i % 4) * 15);
                let hour = h as f64 + m as f64 / 60.0;
                let noise: f64 = rng.random_range(-0.05..0.05);
                let price = (Self::base_price(hour) * day_level + noise).max(0.0);
                RawSample::new(format!("{date}T{h:02}:{m:02}:00+01:00"), price)
            })
            .collect();
        debug!(%date, "generated demo prices");
        Ok(samples)
    }

    fn name(&self) -> &str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::consolidate;

    const BODY: &str = r#"[
        {"SEK_per_kWh":0.5,"EUR_per_kWh":0.044,"EXR":11.3,"time_start":"2024-01-20T00:00:00+01:00","time_end":"2024-01-20T00:15:00+01:00"},
        {"SEK_per_kWh":0.7,"EUR_per_kWh":0.062,"EXR":11.3,"time_start":"2024-01-20T00:15:00+01:00","time_end":"2024-01-20T00:30:00+01:00"},
        {"EUR_per_kWh":0.05,"EXR":11.3,"time_start":"2024-01-20T00:30:00+01:00"},
        {"SEK_per_kWh":"oops","time_start":"2024-01-20T00:45:00+01:00"},
        {"SEK_per_kWh":0.9,"EUR_per_kWh":0.08}
    ]"#;

    #[test]
    fn decode_keeps_well_formed_entries_only() {
        let sek = decode_prices(BODY, Currency::Sek).unwrap();
        assert_eq!(
            sek,
            vec![
                RawSample::new("2024-01-20T00:00:00+01:00", 0.5),
                RawSample::new("2024-01-20T00:15:00+01:00", 0.7),
            ]
        );
        let eur = decode_prices(BODY, Currency::Eur).unwrap();
        assert_eq!(eur.len(), 3);
    }

    #[test]
    fn decode_rejects_non_array_body() {
        assert!(matches!(
            decode_prices("<html>busy</html>", Currency::Sek),
            Err(FetchError::Decode(_))
        ));
        assert!(decode_prices("[]", Currency::Sek).unwrap().is_empty());
    }

    #[test]
    fn url_uses_year_month_day_and_area() {
        let c = ElprisetClient::new(
            "https://example.test/api/v1/prices/",
            PriceArea::Se4,
            Currency::Sek,
            Duration::from_secs(1),
        )
        .unwrap();
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            c.url_for(d),
            "https://example.test/api/v1/prices/2024/01-05_SE4.json"
        );
    }

    #[test]
    fn demo_day_consolidates_to_24_hours() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let samples = DemoSource::seeded(7).fetch(d).unwrap();
        assert_eq!(samples.len(), DemoSource::SAMPLES_PER_DAY);
        let series = consolidate(&samples);
        assert_eq!(series.len(), 24);
        assert!(series.iter().all(|h| h.price >= 0.0));
    }

    #[test]
    fn seeded_demo_is_deterministic_per_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let a = DemoSource::seeded(42).fetch(d).unwrap();
        let b = DemoSource::seeded(42).fetch(d).unwrap();
        assert_eq!(a, b);
        let next = DemoSource::seeded(42).fetch(d.succ_opt().unwrap()).unwrap();
        assert_ne!(a, next);
    }
}
