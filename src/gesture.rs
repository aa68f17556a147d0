//! src/gesture.rs
//!
//! Touch gesture classification and the Listing/Plot view state machine.
//!
//! Only the press and release endpoints of a touch matter. A release that
//! travelled further than `min_distance` pixels inside the downward sector is
//! a refresh swipe; anything else is a tap.
//!
//! | Current | Event         | Next    | Side effect                  |
//! |---------|---------------|---------|------------------------------|
//! | Listing | tap           | Plot    | render plot                  |
//! | Plot    | tap           | Listing | render listing               |
//! | any     | refresh swipe | Listing | refetch, rebuild, render     |

use tracing::debug;

use crate::error::ConfigError;

/// One poll of the touch panel. Coordinates are screen pixels, y downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    pub touched: bool,
    pub x: f64,
    pub y: f64,
}

impl GestureSample {
    pub fn down(x: f64, y: f64) -> Self {
        Self { touched: true, x, y }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self { touched: false, x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Listing,
    Plot,
}

impl ViewState {
    pub fn toggled(self) -> Self {
        match self {
            ViewState::Listing => ViewState::Plot,
            ViewState::Plot => ViewState::Listing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewState::Listing => "listing",
            ViewState::Plot => "plot",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    Refresh,
}

/// Swipe thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Displacement in pixels a release must exceed to count as a swipe.
    pub min_distance: f64,
    /// Inclusive angle sector in degrees, `[0, 360)`, measured from +x toward +y.
    pub sector_min: f64,
    pub sector_max: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_distance: 30.0,
            sector_min: 60.0,
            sector_max: 120.0,
        }
    }
}

impl GestureConfig {
    pub fn new(min_distance: f64, sector_min: f64, sector_max: f64) -> Result<Self, ConfigError> {
        if !min_distance.is_finite() || min_distance < 0.0 {
            return Err(ConfigError::SwipeDistance(min_distance));
        }
        let in_range = |a: f64| (0.0..360.0).contains(&a);
        if !in_range(sector_min) || !in_range(sector_max) || sector_min > sector_max {
            return Err(ConfigError::SwipeSector {
                min: sector_min,
                max: sector_max,
            });
        }
        Ok(Self {
            min_distance,
            sector_min,
            sector_max,
        })
    }

    /// Classify a press/release pair by its displacement.
    pub fn classify(&self, dx: f64, dy: f64) -> Gesture {
        let distance = dx.hypot(dy);
        let mut angle = dy.atan2(dx).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        if distance > self.min_distance && (self.sector_min..=self.sector_max).contains(&angle) {
            Gesture::Refresh
        } else {
            Gesture::Tap
        }
    }
}

/// Outcome of a resolved gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub gesture: Gesture,
    pub from: ViewState,
    pub to: ViewState,
    /// The caller must run one refetch cycle.
    pub refresh: bool,
}

/// Tracks touch edges across polls and owns the current [`ViewState`].
#[derive(Debug)]
pub struct GestureStateMachine {
    config: GestureConfig,
    view: ViewState,
    touched: bool,
    start: Option<(f64, f64)>,
}

impl GestureStateMachine {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            view: ViewState::Listing,
            touched: false,
            start: None,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Feed one poll. Returns a transition on a release edge, `None` otherwise.
    pub fn step(&mut self, sample: GestureSample) -> Option<Transition> {
        let was_touched = self.touched;
        self.touched = sample.touched;

        match (was_touched, sample.touched) {
            (false, true) => {
                self.start = Some((sample.x, sample.y));
                None
            }
            (true, false) => {
                let (sx, sy) = self.start.take()?;
                let gesture = self.config.classify(sample.x - sx, sample.y - sy);
                debug!(
                    ?gesture,
                    dx = sample.x - sx,
                    dy = sample.y - sy,
                    "touch released"
                );
                Some(self.apply(gesture))
            }
            _ => None,
        }
    }

    /// Apply a gesture directly, e.g. from a keyboard shortcut.
    pub fn apply(&mut self, gesture: Gesture) -> Transition {
        let from = self.view;
        let (to, refresh) = match gesture {
            Gesture::Tap => (from.toggled(), false),
            Gesture::Refresh => (ViewState::Listing, true),
        };
        self.view = to;
        Transition {
            gesture,
            from,
            to,
            refresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> GestureStateMachine {
        GestureStateMachine::new(GestureConfig::default())
    }

    #[test]
    fn downward_swipe_is_refresh() {
        assert_eq!(GestureConfig::default().classify(0.0, 40.0), Gesture::Refresh);
    }

    #[test]
    fn short_or_sideways_moves_are_taps() {
        let cfg = GestureConfig::default();
        assert_eq!(cfg.classify(0.0, 0.0), Gesture::Tap);
        assert_eq!(cfg.classify(0.0, 30.0), Gesture::Tap);
        assert_eq!(cfg.classify(50.0, 0.0), Gesture::Tap);
        assert_eq!(cfg.classify(0.0, -50.0), Gesture::Tap);
        assert_eq!(cfg.classify(-50.0, 10.0), Gesture::Tap);
    }

    #[test]
    fn sector_bounds_are_inclusive() {
        let cfg = GestureConfig::default();
        let at = |deg: f64| {
            let r = 100.0;
            let rad = deg.to_radians();
            cfg.classify(r * rad.cos(), r * rad.sin())
        };
        assert_eq!(at(60.0 + 1e-9), Gesture::Refresh);
        assert_eq!(at(119.999), Gesture::Refresh);
        assert_eq!(at(59.0), Gesture::Tap);
        assert_eq!(at(121.0), Gesture::Tap);
    }

    #[test]
    fn swipe_from_100_100_to_100_140_refreshes() {
        let mut m = machine();
        assert_eq!(m.step(GestureSample::down(100.0, 100.0)), None);
        assert_eq!(m.step(GestureSample::down(100.0, 120.0)), None);
        let t = m.step(GestureSample::up(100.0, 140.0)).unwrap();
        assert_eq!(t.gesture, Gesture::Refresh);
        assert!(t.refresh);
        assert_eq!(m.view(), ViewState::Listing);
    }

    #[test]
    fn tap_toggles_exactly_once() {
        let mut m = machine();
        m.step(GestureSample::down(100.0, 100.0));
        let t = m.step(GestureSample::up(100.0, 100.0)).unwrap();
        assert_eq!((t.from, t.to, t.refresh), (ViewState::Listing, ViewState::Plot, false));
        assert_eq!(m.step(GestureSample::up(100.0, 100.0)), None);
        assert_eq!(m.view(), ViewState::Plot);

        m.step(GestureSample::down(10.0, 10.0));
        m.step(GestureSample::up(12.0, 11.0));
        assert_eq!(m.view(), ViewState::Listing);
    }

    #[test]
    fn refresh_from_plot_returns_to_listing_once() {
        let mut m = machine();
        m.apply(Gesture::Tap);
        assert_eq!(m.view(), ViewState::Plot);

        let samples = [
            GestureSample::down(100.0, 100.0),
            GestureSample::down(100.0, 130.0),
            GestureSample::up(100.0, 140.0),
            GestureSample::up(100.0, 140.0),
        ];
        let refreshes = samples
            .into_iter()
            .filter_map(|s| m.step(s))
            .filter(|t| t.refresh)
            .count();
        assert_eq!(refreshes, 1);
        assert_eq!(m.view(), ViewState::Listing);
    }

    #[test]
    fn held_touch_resolves_nothing() {
        let mut m = machine();
        for i in 0..10 {
            assert_eq!(m.step(GestureSample::down(0.0, i as f64 * 10.0)), None);
        }
        assert_eq!(m.view(), ViewState::Listing);
    }

    #[test]
    fn config_rejects_bad_sectors() {
        assert!(GestureConfig::new(30.0, 120.0, 60.0).is_err());
        assert!(GestureConfig::new(30.0, -1.0, 60.0).is_err());
        assert!(GestureConfig::new(30.0, 60.0, 360.0).is_err());
        assert!(GestureConfig::new(-5.0, 60.0, 120.0).is_err());
        assert!(GestureConfig::new(30.0, 60.0, 120.0).is_ok());
    }
}
