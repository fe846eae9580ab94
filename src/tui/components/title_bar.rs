//! # TitleBar Component
//!
//! Top status line: app name, status message, and where the reader is.
//!
//! 1. **Loading**: `"Lectio | Loading the Bible..."`
//! 2. **Browsing**: `"Lectio | World English Bible"`
//! 3. **Inside a book**: `"Lectio | World English Bible | Genesis › 1"`
//!
//! Stateless: every field is a prop copied in by `draw_ui`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    pub status_message: String,
    /// e.g. "Genesis › 1"; empty on the book list.
    pub location: String,
}

impl TitleBar {
    pub fn new(status_message: String, location: String) -> Self {
        Self {
            status_message,
            location,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "Lectio",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )];
        for part in [&self.status_message, &self.location] {
            if !part.is_empty() {
                spans.push(Span::raw(" | "));
                spans.push(Span::raw(part.as_str()));
            }
        }
        frame.render_widget(Line::from(spans), area);
    }
}
