//! src/layout/bar.rs
//!
//! Bar layout: one equal-width slot per hour, bar height proportional to the
//! price above the window minimum, the most expensive hours labelled.

use super::Surface;
use crate::color::{ColorRamp, Rgb};
use crate::prices::PriceSeries;

/// Tunables for the bar renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarStyle {
    /// Added to the price range so equal prices never divide by zero.
    pub epsilon: f64,
    /// How many of the most expensive hours get a price label.
    pub top_n: usize,
    /// Space left between neighbouring bars.
    pub gap: f64,
    pub min_width: f64,
    /// Every n-th slot gets an hour label.
    pub hour_label_every: usize,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            top_n: 6,
            gap: 1.0,
            min_width: 1.0,
            hour_label_every: 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
    pub price: f64,
    pub color: Rgb,
    /// `HH` of the slot when it carries an hour label.
    pub hour_label: Option<String>,
    /// Whether the bar is among the top-N most expensive.
    pub price_label: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarLayout {
    pub bars: Vec<Bar>,
    pub min_price: f64,
    pub max_price: f64,
}

/// Lay out one bar per hour of `series` inside `surface`. Returns `None` for
/// an empty series.
pub fn bar_layout(
    series: &PriceSeries,
    surface: Surface,
    ramp: ColorRamp,
    style: &BarStyle,
) -> Option<BarLayout> {
    let (min_price, max_price) = series.price_range()?;
    let step = surface.width / series.len() as f64;
    let width = (step - style.gap).max(style.min_width);
    let denom = max_price - min_price + style.epsilon;

    let labelled = top_n_indices(series, style.top_n);

    let bars = series
        .iter()
        .enumerate()
        .map(|(i, hour)| {
            let ratio = if denom > 0.0 {
                (hour.price - min_price) / denom
            } else {
                0.0
            };
            let height = ratio * surface.height;
            let hour_label = if style.hour_label_every > 0 && i % style.hour_label_every == 0 {
                hour.hour_of_day().map(|h| format!("{h:02}"))
            } else {
                None
            };
            Bar {
                x: surface.x + i as f64 * step,
                width,
                top: surface.bottom() - height,
                height,
                price: hour.price,
                color: ramp.color_for(hour.price, min_price, max_price),
                hour_label,
                price_label: labelled.contains(&i),
            }
        })
        .collect();

    Some(BarLayout {
        bars,
        min_price,
        max_price,
    })
}

/// Indices of the `n` highest prices; ties go to the earlier hour.
fn top_n_indices(series: &PriceSeries, n: usize) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..series.len()).collect();
    let prices = series.as_slice();
    idx.sort_by(|&a, &b| prices[b].price.total_cmp(&prices[a].price).then(a.cmp(&b)));
    idx.truncate(n);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::model::PriceHour;

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::from_sorted(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| PriceHour::new(format!("2024-01-20T{i:02}:00"), p))
                .collect(),
        )
    }

    #[test]
    fn heights_follow_epsilon_padded_ratio() {
        let s = Surface::new(0.0, 0.0, 40.0, 100.0);
        let l = bar_layout(&series(&[1.0, 2.0, 1.9, 1.0]), s, ColorRamp::TriBand, &BarStyle::default())
            .unwrap();
        let expected = (2.0 - 1.0) / (1.0 + 0.1) * 100.0;
        assert!((l.bars[1].height - expected).abs() < 1e-9);
        assert_eq!(l.bars[0].height, 0.0);
        assert!((l.bars[1].top - (100.0 - expected)).abs() < 1e-9);
        assert!(l.bars.iter().all(|b| b.height < 100.0));
    }

    #[test]
    fn flat_prices_give_zero_height_bars() {
        let s = Surface::new(0.0, 0.0, 40.0, 100.0);
        let l = bar_layout(&series(&[3.0; 4]), s, ColorRamp::Linear, &BarStyle::default()).unwrap();
        assert!(l.bars.iter().all(|b| b.height == 0.0 && b.top == 100.0));
    }

    #[test]
    fn slots_are_equal_width() {
        let s = Surface::new(5.0, 0.0, 40.0, 10.0);
        let l = bar_layout(&series(&[1.0, 2.0, 3.0, 4.0]), s, ColorRamp::Linear, &BarStyle::default())
            .unwrap();
        let xs: Vec<f64> = l.bars.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![5.0, 15.0, 25.0, 35.0]);
        assert!(l.bars.iter().all(|b| b.width == 9.0));
    }

    #[test]
    fn only_top_n_get_price_labels() {
        let s = Surface::new(0.0, 0.0, 80.0, 10.0);
        let prices = [1.0, 8.0, 3.0, 9.0, 2.0, 7.0, 7.0, 0.5];
        let style = BarStyle {
            top_n: 3,
            ..BarStyle::default()
        };
        let l = bar_layout(&series(&prices), s, ColorRamp::Linear, &style).unwrap();
        let labelled: Vec<usize> = l
            .bars
            .iter()
            .enumerate()
            .filter(|(_, b)| b.price_label)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(labelled, vec![1, 3, 5]);
    }

    #[test]
    fn hour_labels_every_sixth_slot() {
        let s = Surface::new(0.0, 0.0, 120.0, 10.0);
        let l = bar_layout(&series(&[1.0; 13]), s, ColorRamp::Linear, &BarStyle::default()).unwrap();
        let labels: Vec<&str> = l.bars.iter().filter_map(|b| b.hour_label.as_deref()).collect();
        assert_eq!(labels, vec!["00", "06", "12"]);
    }
}
