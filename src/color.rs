//! src/color.rs
//!
//! Price-to-color ramps. A price is normalized against the (min, max) of the
//! displayed window and mapped onto either a continuous green→amber→red ramp
//! or a three-color palette.

use clap::ValueEnum;
use ratatui::style::Color;

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

pub const BAND_RED: Rgb = Rgb::new(255, 70, 70);
pub const BAND_YELLOW: Rgb = Rgb::new(255, 255, 70);
pub const BAND_GREEN: Rgb = Rgb::new(70, 255, 70);

/// Which ramp maps normalized prices to colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorRamp {
    /// Continuous green (cheap) through amber to red (expensive).
    #[default]
    Linear,
    /// Green up to 0.3, yellow up to 0.7, red above.
    TriBand,
}

/// Position of `price` within `[min_price, max_price]`, 0 for a flat range.
pub fn normalize(price: f64, min_price: f64, max_price: f64) -> f64 {
    if max_price > min_price {
        (price - min_price) / (max_price - min_price)
    } else {
        0.0
    }
}

impl ColorRamp {
    pub fn color_for(self, price: f64, min_price: f64, max_price: f64) -> Rgb {
        self.color_at(normalize(price, min_price, max_price))
    }

    /// Color for an already-normalized value; out-of-range input is clamped.
    pub fn color_at(self, norm: f64) -> Rgb {
        let norm = if norm.is_nan() { 0.0 } else { norm.clamp(0.0, 1.0) };
        match self {
            ColorRamp::Linear => {
                if norm <= 0.5 {
                    Rgb::new((510.0 * norm).round() as u8, 255, 0)
                } else {
                    Rgb::new(255, (255.0 - 510.0 * (norm - 0.5)).round() as u8, 0)
                }
            }
            ColorRamp::TriBand => {
                if norm > 0.7 {
                    BAND_RED
                } else if norm > 0.3 {
                    BAND_YELLOW
                } else {
                    BAND_GREEN
                }
            }
        }
    }
}
