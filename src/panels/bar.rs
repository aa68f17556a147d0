//! src/panels/bar.rs
//!
//! Bar plot of the window, painted cell by cell. The most expensive hours get
//! their price above the bar; the block title carries max and min.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
};

use super::status::draw_no_data;
use crate::color::ColorRamp;
use crate::layout::{BarStyle, Surface, bar_layout};
use crate::prices::PriceSeries;

pub struct BarPanel {
    pub series: PriceSeries,
    pub ramp: ColorRamp,
    pub style: BarStyle,
    pub title: String,
}

impl BarPanel {
    pub fn new(series: PriceSeries, ramp: ColorRamp, style: BarStyle, title: &str) -> Self {
        Self {
            series,
            ramp,
            style,
            title: title.to_string(),
        }
    }
}

impl crate::ui::Panel for BarPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        if self.series.is_empty() {
            draw_no_data(f, area, &self.title);
            return;
        }

        let mut block = Block::default().title(self.title.clone()).borders(Borders::ALL);
        let inner = block.inner(area);
        // label headroom, bars, hour axis
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);
        let (bars_rect, axis_rect) = (rows[1], rows[2]);

        let Some(layout) = bar_layout(&self.series, Surface::from(bars_rect), self.ramp, &self.style)
        else {
            return;
        };
        block = block.title_bottom(format!(
            " max {:.2}  min {:.2} ",
            layout.max_price, layout.min_price
        ));
        f.render_widget(block, area);
        if bars_rect.width == 0 || bars_rect.height == 0 {
            return;
        }

        let label = Style::default().fg(Color::White);
        let axis = Style::default().fg(Color::Gray);
        let buf = f.buffer_mut();
        for bar in &layout.bars {
            let x0 = bar.x.round() as u16;
            let x1 = ((bar.x + bar.width).round() as u16).min(bars_rect.right()).max(x0 + 1);
            let top = (bar.top.round() as u16).clamp(bars_rect.y, bars_rect.bottom());
            let color: Color = bar.color.into();

            for x in x0..x1.min(bars_rect.right()) {
                if top < bars_rect.bottom() {
                    for y in top..bars_rect.bottom() {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_symbol("█").set_fg(color);
                        }
                    }
                } else if let Some(cell) = buf.cell_mut((x, bars_rect.bottom() - 1)) {
                    cell.set_symbol("▁").set_fg(color);
                }
            }

            if bar.price_label {
                let y = top.saturating_sub(1).max(inner.y);
                buf.set_stringn(
                    x0,
                    y,
                    format!("{:.2}", bar.price),
                    inner.right().saturating_sub(x0) as usize,
                    label,
                );
            }
            if let Some(hour) = &bar.hour_label {
                buf.set_stringn(
                    x0,
                    axis_rect.y,
                    hour,
                    inner.right().saturating_sub(x0) as usize,
                    axis,
                );
            }
        }
    }
}
