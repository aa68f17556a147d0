//! src/input.rs
//!
//! Terminal stand-in for the touch panel. Left mouse button press, drag and
//! release become [`GestureSample`]s in pixel units; a few keys map to the
//! same gestures so the board is usable without a mouse.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;

use crate::gesture::GestureSample;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Refresh,
    Tap,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Touch(GestureSample),
    Key(KeyAction),
}

/// Polls crossterm and translates mouse and key events.
pub struct TerminalInput {
    cell_size_px: (u16, u16),
}

impl TerminalInput {
    pub fn new(cell_size_px: (u16, u16)) -> Self {
        Self { cell_size_px }
    }

    pub fn enable_mouse() -> io::Result<()> {
        execute!(io::stdout(), EnableMouseCapture)
    }

    pub fn disable_mouse() -> io::Result<()> {
        execute!(io::stdout(), DisableMouseCapture)
    }

    /// Everything crossterm has buffered, read without blocking, in arrival
    /// order. A press and release within one poll interval come back as two
    /// separate samples.
    pub fn poll(&self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Some(ev) = self.translate(&event::read()?) {
                events.push(ev);
            }
        }
        Ok(events)
    }

    /// Centre of a cell, in pixels.
    fn to_px(&self, column: u16, row: u16) -> (f64, f64) {
        let (w, h) = self.cell_size_px;
        (
            column as f64 * w as f64 + w as f64 / 2.0,
            row as f64 * h as f64 + h as f64 / 2.0,
        )
    }

    pub fn translate(&self, ev: &Event) -> Option<InputEvent> {
        match ev {
            Event::Mouse(m) => {
                let (x, y) = self.to_px(m.column, m.row);
                match m.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => {
                        Some(InputEvent::Touch(GestureSample::down(x, y)))
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        Some(InputEvent::Touch(GestureSample::up(x, y)))
                    }
                    _ => None,
                }
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Key(KeyAction::Quit)),
                KeyCode::Char('r') => Some(InputEvent::Key(KeyAction::Refresh)),
                KeyCode::Char(' ') | KeyCode::Char('t') | KeyCode::Enter => {
                    Some(InputEvent::Key(KeyAction::Tap))
                }
                _ => None,
            },
            _ => None,
        }
    }
}
