//! src/layout.rs
//!
//! Layout math for the three view strategies. Nothing here draws: each
//! function turns a prepared series into positioned entries that a panel
//! then paints. Units are whatever the caller measures the surface in
//! (pixels on a device, cells in a terminal).

pub mod bar;
pub mod listing;
pub mod plot;

pub use bar::{BarStyle, bar_layout};
pub use listing::{Column, ListingGeometry, listing_layout};
pub use plot::plot_layout;

/// Drawable rectangle with the origin at the top-left and y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

impl From<ratatui::layout::Rect> for Surface {
    fn from(r: ratatui::layout::Rect) -> Self {
        Self::new(r.x as f64, r.y as f64, r.width as f64, r.height as f64)
    }
}
