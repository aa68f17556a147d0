//! src/ui/node.rs
//!
//! Panel trait and the layout tree the screen is composed from each frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Anything that can paint itself into a rectangle.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

/// Layout tree: groups split their area between children, leaves draw.
pub enum Node {
    Group {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node>,
    },
    Leaf {
        panel: Box<dyn Panel>,
    },
}

impl Node {
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        match self {
            Node::Group {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk);
                }
            }
            Node::Leaf { panel } => panel.draw(f, area),
        }
    }
}

/// Stack children top to bottom.
pub fn rows(constraints: Vec<Constraint>, children: Vec<Node>) -> Node {
    Node::Group {
        direction: Direction::Vertical,
        constraints,
        children,
    }
}

/// Wrap a panel as a leaf.
pub fn leaf(panel: impl Panel + 'static) -> Node {
    Node::Leaf {
        panel: Box::new(panel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, widgets::Paragraph};

    struct Text(&'static str);

    impl Panel for Text {
        fn draw(&self, f: &mut Frame<'_>, area: Rect) {
            f.render_widget(Paragraph::new(self.0), area);
        }
    }

    #[test]
    fn rows_split_area_in_order() {
        let root = rows(
            vec![Constraint::Length(1), Constraint::Min(0)],
            vec![leaf(Text("head")), leaf(Text("body"))],
        );
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|f| root.draw(f, f.area())).unwrap();
        let buf = terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].symbol(), "h");
        assert_eq!(buf[(0, 1)].symbol(), "b");
    }
}
