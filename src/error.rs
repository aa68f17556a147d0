//! src/error.rs
//!
//! Typed errors for the data layer and configuration.

use chrono::NaiveDate;
use thiserror::Error;

/// Failure to obtain prices for one date. Never fatal: the refresh cycle
/// treats it as zero samples for that date.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("prices for {0} are not published yet")]
    NotPublished(NaiveDate),

    #[error("could not decode price list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Rejected command-line or environment settings.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("swipe distance must be a non-negative number, got {0}")]
    SwipeDistance(f64),

    #[error("swipe sector must satisfy 0 <= min <= max < 360, got {min}..{max}")]
    SwipeSector { min: f64, max: f64 },

    #[error("window must cover at least one hour")]
    EmptyWindow,

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}
