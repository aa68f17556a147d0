//! src/config.rs
//!
//! Command-line / environment configuration and its validated form.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::color::ColorRamp;
use crate::error::ConfigError;
use crate::gesture::GestureConfig;
use crate::layout::BarStyle;
use crate::net::fetch::DEFAULT_BASE_URL;
use crate::net::{Currency, PriceArea};

/// Where prices come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    #[default]
    Elpriset,
    Demo,
}

/// Which renderer draws the Plot view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PlotStyle {
    #[default]
    Line,
    Bar,
}

/// Hourly spot prices for today and tomorrow on a small terminal display.
///
/// Click (tap) to switch between the listing and the plot; drag downward
/// (swipe) to refetch.
///
/// The listing gives every hour of the day its own row, so showing hour 23
/// takes a terminal at least 33 rows tall. Shorter terminals drop the late
/// rows; use the plot view there.
#[derive(Debug, Parser)]
#[command(name = "spot-board", version)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t, env = "SPOT_BOARD_SOURCE")]
    pub source: SourceKind,

    #[arg(long, value_enum, default_value_t, env = "SPOT_BOARD_AREA")]
    pub area: PriceArea,

    #[arg(long, value_enum, default_value_t, env = "SPOT_BOARD_CURRENCY")]
    pub currency: Currency,

    #[arg(long, default_value = DEFAULT_BASE_URL, env = "SPOT_BOARD_BASE_URL")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10, env = "SPOT_BOARD_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Seed for the demo source; random when omitted.
    #[arg(long, env = "SPOT_BOARD_DEMO_SEED")]
    pub demo_seed: Option<u64>,

    /// Number of upcoming hours shown.
    #[arg(long, default_value_t = 24, env = "SPOT_BOARD_WINDOW_HOURS")]
    pub window_hours: usize,

    /// Poll / debounce interval in milliseconds.
    #[arg(long, default_value_t = 100, env = "SPOT_BOARD_POLL_MS")]
    pub poll_ms: u64,

    /// Minimum swipe length in pixels.
    #[arg(long, default_value_t = 30.0, env = "SPOT_BOARD_SWIPE_DISTANCE")]
    pub swipe_distance: f64,

    #[arg(long, default_value_t = 60.0, env = "SPOT_BOARD_SWIPE_SECTOR_MIN")]
    pub swipe_sector_min: f64,

    #[arg(long, default_value_t = 120.0, env = "SPOT_BOARD_SWIPE_SECTOR_MAX")]
    pub swipe_sector_max: f64,

    /// Pixel width of one terminal cell, for touch distances.
    #[arg(long, default_value_t = 8, env = "SPOT_BOARD_CELL_WIDTH_PX")]
    pub cell_width_px: u16,

    #[arg(long, default_value_t = 16, env = "SPOT_BOARD_CELL_HEIGHT_PX")]
    pub cell_height_px: u16,

    #[arg(long, value_enum, default_value_t, env = "SPOT_BOARD_PLOT_STYLE")]
    pub plot_style: PlotStyle,

    #[arg(long, value_enum, default_value_t, env = "SPOT_BOARD_RAMP")]
    pub ramp: ColorRamp,

    #[arg(long, default_value_t = 0.1, env = "SPOT_BOARD_BAR_EPSILON")]
    pub bar_epsilon: f64,

    /// How many of the most expensive hours get a label in the bar plot.
    #[arg(long, default_value_t = 6, env = "SPOT_BOARD_BAR_LABELS")]
    pub bar_labels: usize,

    /// Number of y-axis ticks in the line plot.
    #[arg(long, default_value_t = 5, env = "SPOT_BOARD_TICKS")]
    pub ticks: usize,

    /// Enable the remote control port, e.g. 127.0.0.1:4000.
    #[arg(long, env = "SPOT_BOARD_CONTROL_ADDR")]
    pub control_addr: Option<SocketAddr>,

    #[arg(long, default_value = "spot-board.log", env = "SPOT_BOARD_LOG_FILE")]
    pub log_file: PathBuf,
}

/// Validated runtime settings.
#[derive(Clone, Debug)]
pub struct Settings {
    pub source: SourceKind,
    pub area: PriceArea,
    pub currency: Currency,
    pub base_url: String,
    pub timeout: Duration,
    pub demo_seed: Option<u64>,
    pub window_hours: usize,
    pub poll_interval: Duration,
    pub gesture: GestureConfig,
    pub cell_size_px: (u16, u16),
    pub plot_style: PlotStyle,
    pub ramp: ColorRamp,
    pub bar: BarStyle,
    pub ticks: usize,
    pub control_addr: Option<SocketAddr>,
    pub log_file: PathBuf,
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        if self.window_hours == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        for (name, v) in [
            ("poll-ms", self.poll_ms),
            ("timeout-secs", self.timeout_secs),
            ("cell-width-px", self.cell_width_px as u64),
            ("cell-height-px", self.cell_height_px as u64),
        ] {
            if v == 0 {
                return Err(ConfigError::Zero { name });
            }
        }
        if self.bar_epsilon.is_nan() || self.bar_epsilon <= 0.0 {
            return Err(ConfigError::Zero { name: "bar-epsilon" });
        }
        let gesture = GestureConfig::new(
            self.swipe_distance,
            self.swipe_sector_min,
            self.swipe_sector_max,
        )?;

        Ok(Settings {
            source: self.source,
            area: self.area,
            currency: self.currency,
            base_url: self.base_url,
            timeout: Duration::from_secs(self.timeout_secs),
            demo_seed: self.demo_seed,
            window_hours: self.window_hours,
            poll_interval: Duration::from_millis(self.poll_ms),
            gesture,
            cell_size_px: (self.cell_width_px, self.cell_height_px),
            plot_style: self.plot_style,
            ramp: self.ramp,
            bar: BarStyle {
                epsilon: self.bar_epsilon,
                top_n: self.bar_labels,
                ..BarStyle::default()
            },
            ticks: self.ticks,
            control_addr: self.control_addr,
            log_file: self.log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["spot-board"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_the_device() {
        let s = parse(&[]).into_settings().unwrap();
        assert_eq!(s.window_hours, 24);
        assert_eq!(s.poll_interval, Duration::from_millis(100));
        assert_eq!(s.gesture, GestureConfig::default());
        assert_eq!(s.ramp, ColorRamp::Linear);
        assert_eq!(s.plot_style, PlotStyle::Line);
        assert_eq!(s.area, PriceArea::Se3);
        assert_eq!(s.bar, BarStyle::default());
        assert_eq!(s.ticks, 5);
        assert!(s.control_addr.is_none());
    }

    #[test]
    fn parses_enums_and_thresholds() {
        let s = parse(&[
            "--source", "demo", "--area", "SE4", "--ramp", "tri-band", "--plot-style", "bar",
            "--swipe-distance", "50", "--swipe-sector-min", "45", "--swipe-sector-max", "135",
            "--control-addr", "127.0.0.1:4000",
        ])
        .into_settings()
        .unwrap();
        assert_eq!(s.source, SourceKind::Demo);
        assert_eq!(s.area, PriceArea::Se4);
        assert_eq!(s.ramp, ColorRamp::TriBand);
        assert_eq!(s.plot_style, PlotStyle::Bar);
        assert_eq!(s.gesture, GestureConfig::new(50.0, 45.0, 135.0).unwrap());
        assert_eq!(s.control_addr, Some("127.0.0.1:4000".parse().unwrap()));
    }

    #[test]
    fn rejects_invalid_settings() {
        assert_eq!(
            parse(&["--window-hours", "0"]).into_settings().unwrap_err(),
            ConfigError::EmptyWindow
        );
        assert_eq!(
            parse(&["--poll-ms", "0"]).into_settings().unwrap_err(),
            ConfigError::Zero { name: "poll-ms" }
        );
        assert!(matches!(
            parse(&["--swipe-sector-min", "130"]).into_settings(),
            Err(ConfigError::SwipeSector { .. })
        ));
    }
}
