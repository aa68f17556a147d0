//! src/prices.rs
//!
//! Top-level `prices` module: the data model plus the consolidation and
//! window-selection stages of the pipeline.

pub mod consolidate;
pub mod model;
pub mod window;

/// Re-exports
pub use consolidate::consolidate;
pub use model::{DayPartition, PriceSeries, RawSample};
pub use window::select_window;
