//! # Loading Screen
//!
//! Shown until the corpus fetch lands. A fetch failure keeps it up; the
//! error goes to the log.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct LoadingScreen {
    frame_index: usize,
}

impl LoadingScreen {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }
}

impl Component for LoadingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.frame_index % SPINNER.len()];
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(Color::Cyan)),
                Span::styled(
                    "Loading the Bible...",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(
                format!("Lectio v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_loading_screen_text() {
        let mut terminal = Terminal::new(TestBackend::new(40, 9)).unwrap();
        terminal
            .draw(|f| LoadingScreen::new(3).render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Loading the Bible..."));
        assert!(text.contains('⠸'));
    }
}
