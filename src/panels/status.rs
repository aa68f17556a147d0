//! src/panels/status.rs
//!
//! Footer status line plus the shared "no data" placeholder.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusLevel {
    #[default]
    Info,
    Warn,
    Error,
}

impl StatusLevel {
    fn color(self) -> Color {
        match self {
            StatusLevel::Info => Color::Gray,
            StatusLevel::Warn => Color::Yellow,
            StatusLevel::Error => Color::Red,
        }
    }
}

/// One-line status message with the key help as block title.
pub struct StatusPanel {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusPanel {
    pub const HELP: &'static str = "click=toggle  drag down=refresh  r=refresh  q=quit";

    pub fn new(text: &str, level: StatusLevel) -> Self {
        Self {
            text: text.to_string(),
            level,
        }
    }
}

impl crate::ui::Panel for StatusPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.text.clone())
            .style(Style::default().fg(self.level.color()))
            .wrap(Wrap { trim: true })
            .block(Block::default().title(Self::HELP).borders(Borders::ALL));
        f.render_widget(p, area);
    }
}

/// Explicit placeholder for an empty window.
pub fn draw_no_data(f: &mut Frame<'_>, area: Rect, title: &str) {
    let p = Paragraph::new("No data")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    f.render_widget(p, area);
}
