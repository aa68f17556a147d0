//! src/app.rs
//!
//! Spot price board: fetches today's and tomorrow's hourly electricity spot
//! prices, consolidates them, and shows the upcoming hours either as a
//! two-column listing or as a plot.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Owns the single [`AppContext`] (consolidated series, view state, status)
//! and runs the cooperative main loop: draw, poll input, apply gestures,
//! sleep out the rest of the poll interval. Fetches run on the loop itself
//! and block it until they finish.
//!
//! # Running
//!
//! ```text
//! cargo run --release -- --area SE3
//! cargo run --release -- --source demo --plot-style bar --ramp tri-band
//! ```
//!
//! Logs go to `spot-board.log` (`--log-file`), filtered by `RUST_LOG`.
//!
//! # Controls
//!
//! - **Click** (tap): toggle between listing and plot.
//! - **Drag downward** (swipe, > 30 px within 60°..120°): refetch and return
//!   to the listing.
//! - **Space / t / Enter**: tap. **r**: refresh. **q / Esc**: quit.
//!
//! The listing anchors each row at its hour of day, one row per hour below
//! the column headers. With the title and status bars that needs 33 terminal
//! rows to reach 23:00; on a smaller terminal the late hours are skipped
//! (an 80x24 terminal shows up to 14:00), so evenings read best in the plot.
//!
//! # Remote Control (ASCII, Line-Based)
//!
//! Enabled with `--control-addr 127.0.0.1:4000`. One command per line, one
//! reply per command:
//!
//! - `tap` → `OK`
//! - `refresh` → `OK`
//! - `status` → `OK listing` / `OK plot`, or `ERR timeout` while a fetch
//!   is running
//! - `exit` → `OK`, then the application stops
//! - `quit` → `OK bye`, closes the connection
//!
//! ```text
//! $ nc 127.0.0.1 4000
//! status
//! OK listing
//! tap
//! OK
//! ```

use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;
use ratatui::layout::Constraint;
use tracing::{info, warn};

use crate::config::{PlotStyle, Settings, SourceKind};
use crate::error::FetchError;
use crate::gesture::{Gesture, GestureStateMachine, Transition, ViewState};
use crate::input::{InputEvent, KeyAction, TerminalInput};
use crate::net::remote::{RemoteCommand, spawn_remote_server};
use crate::net::{DemoSource, ElprisetClient, PriceSource};
use crate::panels::{BarPanel, ListingPanel, PlotPanel, StatusLevel, StatusPanel, TitlePanel};
use crate::prices::{DayPartition, PriceSeries, RawSample, consolidate, select_window};
use crate::ui::{Node, leaf, rows};

/// Result of one fetch-and-consolidate pass over today and tomorrow.
#[derive(Debug)]
pub struct RefreshOutcome {
    /// `None` when every fetch failed.
    pub series: Option<PriceSeries>,
    pub failures: Vec<(NaiveDate, FetchError)>,
}

/// Fetch `today` and the day after, consolidating whatever arrives. A failed
/// date contributes no samples; only when all dates fail is there no series.
pub fn refresh_cycle(source: &dyn PriceSource, today: NaiveDate) -> RefreshOutcome {
    let dates: Vec<NaiveDate> = std::iter::once(today)
        .chain(today.checked_add_days(Days::new(1)))
        .collect();

    let mut samples: Vec<RawSample> = Vec::new();
    let mut failures = Vec::new();
    for date in &dates {
        match source.fetch(*date) {
            Ok(mut s) => samples.append(&mut s),
            Err(e @ FetchError::NotPublished(_)) => {
                info!(%date, "{e}");
                failures.push((*date, e));
            }
            Err(e) => {
                warn!(%date, error = %e, "fetch failed");
                failures.push((*date, e));
            }
        }
    }

    let series = if failures.len() == dates.len() {
        None
    } else {
        let series = consolidate(&samples);
        info!(raw = samples.len(), hourly = series.len(), "refresh complete");
        Some(series)
    };
    RefreshOutcome { series, failures }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub text: String,
    pub level: StatusLevel,
}

impl Status {
    fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Everything the main loop owns.
pub struct AppContext {
    settings: Settings,
    source: Box<dyn PriceSource>,
    consolidated: PriceSeries,
    machine: GestureStateMachine,
    status: Status,
    last_refresh: Option<NaiveDateTime>,
    pending_refresh: bool,
    running: bool,
}

impl AppContext {
    pub fn new(settings: Settings, source: Box<dyn PriceSource>) -> Self {
        let machine = GestureStateMachine::new(settings.gesture);
        Self {
            settings,
            source,
            consolidated: PriceSeries::empty(),
            machine,
            status: Status::new("Starting", StatusLevel::Info),
            last_refresh: None,
            pending_refresh: false,
            running: true,
        }
    }

    pub fn view(&self) -> ViewState {
        self.machine.view()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_status(&mut self, text: &str, level: StatusLevel) {
        self.status = Status::new(text, level);
    }

    /// Run one refetch cycle. Dates that fetched replace their hours; dates
    /// that failed keep whatever the previous series had for them.
    pub fn refresh(&mut self, now: NaiveDateTime) {
        let outcome = refresh_cycle(self.source.as_ref(), now.date());

        let mut notes: Vec<String> = Vec::new();
        let mut level = StatusLevel::Info;
        for (date, err) in &outcome.failures {
            match err {
                FetchError::NotPublished(_) if *date > now.date() => {
                    notes.push("Tomorrow's prices are not published yet".to_string());
                }
                _ => {
                    level = StatusLevel::Warn;
                    notes.push(format!("{date}: {err}"));
                }
            }
        }

        match outcome.series {
            Some(series) => {
                let failed: Vec<NaiveDate> = outcome.failures.iter().map(|(d, _)| *d).collect();
                self.consolidated = series.carry_over(&self.consolidated, &failed);
                self.last_refresh = Some(now);
                notes.insert(
                    0,
                    format!(
                        "Updated {} ({} hours)",
                        now.format("%H:%M"),
                        self.consolidated.len()
                    ),
                );
            }
            None => {
                level = StatusLevel::Error;
                notes.insert(0, "Fetch failed, keeping previous data".to_string());
            }
        }
        self.status = Status::new(notes.join("; "), level);
    }

    /// Window and day partition for `now`, derived from the retained series.
    pub fn view_data(&self, now: NaiveDateTime) -> (PriceSeries, DayPartition) {
        let window = select_window(&self.consolidated, now, self.settings.window_hours);
        let partition = DayPartition::split(&window, now.date());
        (window, partition)
    }

    fn on_transition(&mut self, t: Transition) {
        info!(gesture = ?t.gesture, from = t.from.label(), to = t.to.label(), "view transition");
        if t.refresh {
            self.pending_refresh = true;
        }
    }

    /// Run the refetch a refresh gesture asked for. Returns whether one ran.
    pub fn run_pending_refresh(&mut self, now: NaiveDateTime) -> bool {
        if !std::mem::take(&mut self.pending_refresh) {
            return false;
        }
        self.refresh(now);
        true
    }

    pub fn handle_input(&mut self, ev: InputEvent) {
        let transition = match ev {
            InputEvent::Touch(sample) => self.machine.step(sample),
            InputEvent::Key(KeyAction::Tap) => Some(self.machine.apply(Gesture::Tap)),
            InputEvent::Key(KeyAction::Refresh) => Some(self.machine.apply(Gesture::Refresh)),
            InputEvent::Key(KeyAction::Quit) => {
                self.running = false;
                None
            }
        };
        if let Some(t) = transition {
            self.on_transition(t);
        }
    }

    pub fn handle_remote(&mut self, cmd: RemoteCommand) {
        match cmd {
            RemoteCommand::Tap => {
                let t = self.machine.apply(Gesture::Tap);
                self.on_transition(t);
            }
            RemoteCommand::Refresh => {
                let t = self.machine.apply(Gesture::Refresh);
                self.on_transition(t);
            }
            RemoteCommand::Exit => self.running = false,
            RemoteCommand::Status(reply) => {
                let _ = reply.send(self.view());
            }
        }
    }

    /// Compose the frame for `now`.
    pub fn screen(&self, now: NaiveDateTime) -> Node {
        let s = &self.settings;
        let (window, partition) = self.view_data(now);

        let heading = format!("{} spot prices ({})", self.source.name(), s.currency.unit());
        let updated = self
            .last_refresh
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());
        let detail = format!("view: {}  updated {}", self.view().label(), updated);

        let body = match self.view() {
            ViewState::Listing => leaf(ListingPanel::new(
                partition,
                window.price_range(),
                s.ramp,
                "Prices",
            )),
            ViewState::Plot => {
                let title = format!("Next {} hours", window.len());
                match s.plot_style {
                    PlotStyle::Line => leaf(PlotPanel::new(window, s.ramp, s.ticks, &title)),
                    PlotStyle::Bar => leaf(BarPanel::new(window, s.ramp, s.bar, &title)),
                }
            }
        };

        rows(
            vec![
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ],
            vec![
                leaf(TitlePanel::new(&heading, &detail)),
                body,
                leaf(StatusPanel::new(&self.status.text, self.status.level)),
            ],
        )
    }
}

fn build_source(settings: &Settings) -> Result<Box<dyn PriceSource>, FetchError> {
    Ok(match settings.source {
        SourceKind::Elpriset => Box::new(ElprisetClient::new(
            &settings.base_url,
            settings.area,
            settings.currency,
            settings.timeout,
        )?),
        SourceKind::Demo => Box::new(match settings.demo_seed {
            Some(seed) => DemoSource::seeded(seed),
            None => DemoSource::random(),
        }),
    })
}

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn run(settings: Settings) -> color_eyre::Result<()> {
    let source = build_source(&settings).wrap_err("building price source")?;
    info!(source = source.name(), "starting spot-board");

    let (tx, rx) = std::sync::mpsc::channel();
    if let Some(addr) = settings.control_addr {
        spawn_remote_server(&addr.to_string(), tx)
            .wrap_err_with(|| format!("binding control port {addr}"))?;
    }

    let input = TerminalInput::new(settings.cell_size_px);
    let frame_time = settings.poll_interval;
    let mut ctx = AppContext::new(settings, source);

    let mut terminal = ratatui::init();
    let result = main_loop(&mut terminal, &mut ctx, &input, &rx, frame_time);
    if let Err(e) = TerminalInput::disable_mouse() {
        warn!(error = %e, "could not disable mouse capture");
    }
    ratatui::restore();
    info!("spot-board stopped");
    result
}

fn main_loop(
    terminal: &mut DefaultTerminal,
    ctx: &mut AppContext,
    input: &TerminalInput,
    remote: &Receiver<RemoteCommand>,
    frame_time: Duration,
) -> color_eyre::Result<()> {
    TerminalInput::enable_mouse()?;

    ctx.set_status("Fetching today's and tomorrow's prices...", StatusLevel::Info);
    let root = ctx.screen(now_local());
    terminal.draw(|f| root.draw(f, f.area()))?;
    ctx.refresh(now_local());

    while ctx.is_running() {
        let frame_start = Instant::now();

        let root = ctx.screen(now_local());
        terminal.draw(|f| root.draw(f, f.area()))?;

        for ev in input.poll()? {
            ctx.handle_input(ev);
        }
        while let Ok(cmd) = remote.try_recv() {
            ctx.handle_remote(cmd);
        }
        if !ctx.is_running() {
            break;
        }

        if ctx.pending_refresh {
            ctx.set_status("Refreshing...", StatusLevel::Info);
            let root = ctx.screen(now_local());
            terminal.draw(|f| root.draw(f, f.area()))?;
            ctx.run_pending_refresh(now_local());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
    Ok(())
}
