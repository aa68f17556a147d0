//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod bar;
pub mod listing;
pub mod plot;
pub mod status;
pub mod title;

pub use bar::BarPanel;
pub use listing::ListingPanel;
pub use plot::PlotPanel;
pub use status::{StatusLevel, StatusPanel};
pub use title::TitlePanel;
