//! src/panels/plot.rs
//!
//! Line plot of the window: braille line segments colored by price, price
//! ticks in a left gutter, hour labels every six hours along the bottom.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use super::status::draw_no_data;
use crate::color::ColorRamp;
use crate::layout::{Surface, plot_layout};
use crate::prices::PriceSeries;

const GUTTER: u16 = 7;

pub struct PlotPanel {
    pub series: PriceSeries,
    pub ramp: ColorRamp,
    pub ticks: usize,
    pub title: String,
}

impl PlotPanel {
    pub fn new(series: PriceSeries, ramp: ColorRamp, ticks: usize, title: &str) -> Self {
        Self {
            series,
            ramp,
            ticks,
            title: title.to_string(),
        }
    }
}

impl crate::ui::Panel for PlotPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        if self.series.is_empty() {
            draw_no_data(f, area, &self.title);
            return;
        }

        let block = Block::default().title(self.title.clone()).borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GUTTER), Constraint::Min(0)])
            .split(inner);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(cols[1]);
        let (plot_rect, axis_rect) = (rows[0], rows[1]);
        if plot_rect.width < 2 || plot_rect.height < 2 {
            return;
        }

        // Canvas units: one per cell, y flipped because the canvas grows upward.
        let w = (plot_rect.width - 1) as f64;
        let h = (plot_rect.height - 1) as f64;
        let Some(layout) = plot_layout(&self.series, Surface::new(0.0, 0.0, w, h), self.ramp, self.ticks)
        else {
            return;
        };

        let points = &layout.points;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, w])
            .y_bounds([0.0, h])
            .paint(|ctx| {
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].x,
                        y1: h - pair[0].y,
                        x2: pair[1].x,
                        y2: h - pair[1].y,
                        color: pair[1].color.into(),
                    });
                }
                if let [only] = points.as_slice() {
                    ctx.draw(&Points {
                        coords: &[(only.x, h - only.y)],
                        color: only.color.into(),
                    });
                }
            });
        f.render_widget(canvas, plot_rect);

        let label = Style::default().fg(Color::Gray);
        let buf = f.buffer_mut();
        for tick in &layout.ticks {
            let y = plot_rect.y + tick.y.round() as u16;
            buf.set_stringn(
                cols[0].x,
                y,
                format!("{:>6.2}", tick.value),
                (GUTTER - 1) as usize,
                label,
            );
        }
        for p in points {
            let Some(hour) = p.hour_of_day.filter(|h| h % 6 == 0) else {
                continue;
            };
            let x = plot_rect.x + p.x.round() as u16;
            buf.set_stringn(
                x,
                axis_rect.y,
                format!("{hour:02}"),
                plot_rect.right().saturating_sub(x) as usize,
                label,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::testing::{contains, render, row};
    use crate::prices::model::PriceHour;

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::from_sorted(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| PriceHour::new(format!("2024-01-20T{:02}:00", i + 4), p))
                .collect(),
        )
    }

    #[test]
    fn draws_ticks_hours_and_line() {
        let panel = PlotPanel::new(series(&[1.0, 2.0, 3.0, 2.5, 1.5]), ColorRamp::Linear, 5, "SE3");
        let buf = render(&panel, 40, 14);
        // inner top row carries the max tick, the row above the axis the min
        assert!(row(&buf, 1).contains("3.00"));
        assert!(row(&buf, 11).contains("1.00"));
        assert!(contains(&buf, "2.00"));
        assert!(row(&buf, 12).contains("06"));

        let braille = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                buf[(x, y)]
                    .symbol()
                    .chars()
                    .any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
            })
            .count();
        assert!(braille > 0);
    }

    #[test]
    fn flat_and_single_hour_series_render() {
        let flat = PlotPanel::new(series(&[2.0, 2.0, 2.0]), ColorRamp::TriBand, 5, "SE3");
        assert!(contains(&render(&flat, 40, 14), "2.00"));
        let one = PlotPanel::new(series(&[2.0]), ColorRamp::Linear, 5, "SE3");
        assert!(contains(&render(&one, 40, 14), "2.00"));
    }

    #[test]
    fn empty_series_says_no_data() {
        let panel = PlotPanel::new(PriceSeries::empty(), ColorRamp::Linear, 5, "SE3");
        assert!(contains(&render(&panel, 40, 14), "No data"));
    }
}
