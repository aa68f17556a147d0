//! src/layout/listing.rs
//!
//! Two-column listing: today on the left, tomorrow on the right. Rows are
//! anchored by hour of day, not by position in the series, so hour N always
//! lands on the same row and missing hours leave blank rows.

use crate::color::{ColorRamp, Rgb};
use crate::prices::{DayPartition, PriceSeries};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Today,
    Tomorrow,
}

/// Where the columns sit and how tall a row is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingGeometry {
    pub today_x: u16,
    pub tomorrow_x: u16,
    /// y of the 00:00 row before `y_offset` is applied.
    pub y_start: u16,
    pub line_height: u16,
    /// Constant pulled off every row's y.
    pub y_offset: u16,
    /// First y that is no longer visible.
    pub visible_bottom: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListingRow {
    pub column: Column,
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub price: f64,
    pub color: Rgb,
}

/// Lay out both columns. `range` is the (min, max) the colors are scaled to,
/// normally taken over the whole window so both days share one scale.
pub fn listing_layout(
    partition: &DayPartition,
    range: (f64, f64),
    ramp: ColorRamp,
    geometry: &ListingGeometry,
) -> Vec<ListingRow> {
    let mut rows = Vec::with_capacity(partition.today.len() + partition.tomorrow.len());
    push_column(&mut rows, &partition.today, Column::Today, range, ramp, geometry);
    push_column(&mut rows, &partition.tomorrow, Column::Tomorrow, range, ramp, geometry);
    rows
}

fn push_column(
    rows: &mut Vec<ListingRow>,
    series: &PriceSeries,
    column: Column,
    (min_price, max_price): (f64, f64),
    ramp: ColorRamp,
    g: &ListingGeometry,
) {
    let x = match column {
        Column::Today => g.today_x,
        Column::Tomorrow => g.tomorrow_x,
    };
    for hour in series {
        let Some(hour_of_day) = hour.hour_of_day() else {
            continue;
        };
        let y = (g.y_start as u32 + hour_of_day * g.line_height as u32)
            .saturating_sub(g.y_offset as u32);
        if y >= g.visible_bottom as u32 {
            continue;
        }
        rows.push(ListingRow {
            column,
            x,
            y: y as u16,
            text: format!("{}: {:.2}", hour.clock_label(), hour.price),
            price: hour.price,
            color: ramp.color_for(hour.price, min_price, max_price),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::PriceSeries;
    use crate::prices::model::PriceHour;

    fn series(date: &str, hours: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::from_sorted(
            hours
                .iter()
                .map(|&(h, p)| PriceHour::new(format!("{date}T{h:02}:00"), p))
                .collect(),
        )
    }

    fn geometry(bottom: u16) -> ListingGeometry {
        ListingGeometry {
            today_x: 1,
            tomorrow_x: 30,
            y_start: 3,
            line_height: 1,
            y_offset: 0,
            visible_bottom: bottom,
        }
    }

    #[test]
    fn rows_are_anchored_by_hour_of_day() {
        let p = DayPartition {
            today: series("2024-01-20", &[(21, 1.0), (23, 2.0)]),
            tomorrow: series("2024-01-21", &[(0, 3.0), (5, 4.0)]),
        };
        let rows = listing_layout(&p, (1.0, 4.0), ColorRamp::Linear, &geometry(40));
        let pos: Vec<(Column, u16, u16)> = rows.iter().map(|r| (r.column, r.x, r.y)).collect();
        assert_eq!(
            pos,
            vec![
                (Column::Today, 1, 24),
                (Column::Today, 1, 26),
                (Column::Tomorrow, 30, 3),
                (Column::Tomorrow, 30, 8),
            ]
        );
        assert_eq!(rows[0].text, "21:00: 1.00");
    }

    #[test]
    fn rows_past_visible_height_are_skipped() {
        let p = DayPartition {
            today: series("2024-01-20", &[(1, 1.0), (10, 2.0), (20, 3.0)]),
            tomorrow: PriceSeries::empty(),
        };
        let rows = listing_layout(&p, (1.0, 3.0), ColorRamp::Linear, &geometry(14));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.y < 14));
    }

    #[test]
    fn offset_and_line_height_scale_rows() {
        let g = ListingGeometry {
            today_x: 10,
            tomorrow_x: 250,
            y_start: 50,
            line_height: 17,
            y_offset: 5,
            visible_bottom: 480,
        };
        let p = DayPartition {
            today: series("2024-01-20", &[(2, 1.0)]),
            tomorrow: PriceSeries::empty(),
        };
        let rows = listing_layout(&p, (1.0, 1.0), ColorRamp::Linear, &g);
        assert_eq!(rows[0].y, 50 + 2 * 17 - 5);
    }

    #[test]
    fn colors_use_the_shared_range() {
        let p = DayPartition {
            today: series("2024-01-20", &[(22, 0.0)]),
            tomorrow: series("2024-01-21", &[(0, 10.0)]),
        };
        let rows = listing_layout(&p, (0.0, 10.0), ColorRamp::Linear, &geometry(40));
        assert_eq!(rows[0].color, Rgb::new(0, 255, 0));
        assert_eq!(rows[1].color, Rgb::new(255, 0, 0));
    }
}
