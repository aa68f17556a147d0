//! src/panels/listing.rs
//!
//! Listing view: today's hours in the left column, tomorrow's in the right,
//! one row per hour of day, colored by price.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

use super::status::draw_no_data;
use crate::color::ColorRamp;
use crate::layout::{Column, ListingGeometry, listing_layout};
use crate::prices::DayPartition;

pub struct ListingPanel {
    pub partition: DayPartition,
    /// (min, max) over the whole window; `None` when it is empty.
    pub range: Option<(f64, f64)>,
    pub ramp: ColorRamp,
    pub title: String,
}

impl ListingPanel {
    pub fn new(partition: DayPartition, range: Option<(f64, f64)>, ramp: ColorRamp, title: &str) -> Self {
        Self {
            partition,
            range,
            ramp,
            title: title.to_string(),
        }
    }

    /// Column and row placement inside the bordered block.
    fn geometry(inner: Rect) -> ListingGeometry {
        ListingGeometry {
            today_x: inner.x + 1,
            tomorrow_x: inner.x + inner.width / 2,
            y_start: inner.y + 1,
            line_height: 1,
            y_offset: 0,
            visible_bottom: inner.y + inner.height,
        }
    }
}

impl crate::ui::Panel for ListingPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(range) = self.range.filter(|_| !self.partition.is_empty()) else {
            draw_no_data(f, area, &self.title);
            return;
        };

        let block = Block::default().title(self.title.clone()).borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let geometry = Self::geometry(inner);
        let column_width = geometry.tomorrow_x.saturating_sub(geometry.today_x) as usize;
        let right_width = inner.right().saturating_sub(geometry.tomorrow_x) as usize;
        let header = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let buf = f.buffer_mut();
        buf.set_stringn(geometry.today_x, inner.y, "Today", column_width, header);
        buf.set_stringn(geometry.tomorrow_x, inner.y, "Tomorrow", right_width, header);

        for row in listing_layout(&self.partition, range, self.ramp, &geometry) {
            let width = match row.column {
                Column::Today => column_width,
                Column::Tomorrow => right_width,
            };
            buf.set_stringn(row.x, row.y, &row.text, width, Style::default().fg(row.color.into()));
        }
    }
}
