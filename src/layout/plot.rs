//! src/layout/plot.rs
//!
//! Line-plot layout: x spreads the series index range across the surface
//! width, y maps price onto the surface height with higher prices nearer the
//! top.

use super::Surface;
use crate::color::{ColorRamp, Rgb, normalize};
use crate::prices::PriceSeries;

#[derive(Clone, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub price: f64,
    pub color: Rgb,
    pub hour_of_day: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTick {
    pub y: f64,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotLayout {
    pub points: Vec<PlotPoint>,
    pub ticks: Vec<AxisTick>,
    pub min_price: f64,
    pub max_price: f64,
}

/// Position every hour of `series` inside `surface`. Returns `None` for an
/// empty series.
pub fn plot_layout(
    series: &PriceSeries,
    surface: Surface,
    ramp: ColorRamp,
    tick_count: usize,
) -> Option<PlotLayout> {
    let (min_price, max_price) = series.price_range()?;
    let y_of = |price: f64| surface.y + (1.0 - normalize(price, min_price, max_price)) * surface.height;

    let last_index = series.len().saturating_sub(1);
    let points = series
        .iter()
        .enumerate()
        .map(|(i, hour)| {
            let x = if last_index > 0 {
                surface.x + surface.width * i as f64 / last_index as f64
            } else {
                surface.x
            };
            PlotPoint {
                x,
                y: y_of(hour.price),
                price: hour.price,
                color: ramp.color_for(hour.price, min_price, max_price),
                hour_of_day: hour.hour_of_day(),
            }
        })
        .collect();

    let ticks = tick_values(min_price, max_price, tick_count)
        .into_iter()
        .map(|value| AxisTick { y: y_of(value), value })
        .collect();

    Some(PlotLayout {
        points,
        ticks,
        min_price,
        max_price,
    })
}

/// `count` evenly spaced values from `min` to `max` inclusive.
pub fn tick_values(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        n => (0..n)
            .map(|i| min + (max - min) * i as f64 / (n - 1) as f64)
            .collect(),
    }
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
    fn empty_series_has_no_layout() {
        let s = Surface::new(0.0, 0.0, 100.0, 50.0);
        assert!(plot_layout(&PriceSeries::empty(), s, ColorRamp::Linear, 5).is_none());
    }

    #[test]
    fn points_span_width_and_invert_price() {
        let s = Surface::new(10.0, 5.0, 100.0, 50.0);
        let l = plot_layout(&series(&[1.0, 3.0, 2.0]), s, ColorRamp::Linear, 5).unwrap();
        let xy: Vec<(f64, f64)> = l.points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(xy, vec![(10.0, 55.0), (60.0, 5.0), (110.0, 30.0)]);
    }

    #[test]
    fn ticks_are_evenly_spaced_between_min_and_max() {
        let s = Surface::new(0.0, 0.0, 100.0, 40.0);
        let l = plot_layout(&series(&[1.0, 3.0]), s, ColorRamp::Linear, 5).unwrap();
        let values: Vec<f64> = l.ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
        let ys: Vec<f64> = l.ticks.iter().map(|t| t.y).collect();
        assert_eq!(ys, vec![40.0, 30.0, 20.0, 10.0, 0.0]);
    }

    #[test]
    fn single_point_and_flat_series_stay_on_surface() {
        let s = Surface::new(0.0, 0.0, 100.0, 40.0);
        let one = plot_layout(&series(&[2.0]), s, ColorRamp::Linear, 5).unwrap();
        assert_eq!((one.points[0].x, one.points[0].y), (0.0, 40.0));

        let flat = plot_layout(&series(&[2.0, 2.0, 2.0]), s, ColorRamp::Linear, 5).unwrap();
        assert!(flat.points.iter().all(|p| p.y == 40.0 && p.y.is_finite()));
    }
}
