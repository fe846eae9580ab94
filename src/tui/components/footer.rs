//! # Footer Component
//!
//! Bottom line: corpus summary on the left, key hints for the current view
//! on the right.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::corpus::Corpus;
use crate::core::state::View;
use crate::tui::component::Component;

/// "World English Bible • 66 Books • 1189 Chapters"
pub fn corpus_summary(corpus: &Corpus) -> String {
    format!(
        "{} • {} Books • {} Chapters",
        corpus.bible_name,
        corpus.books.len(),
        corpus.chapter_count()
    )
}

pub fn key_hints(view: View) -> &'static str {
    match view {
        View::Books => "←↑↓→ move  Enter open  q quit",
        View::Chapters => "←↑↓→ move  Enter read  Esc books  q quit",
        View::Reader => "↑↓ scroll  p/n chapter  v verses  q quit",
    }
}

pub struct Footer {
    /// Empty while loading.
    pub summary: String,
    pub hints: &'static str,
}

impl Component for Footer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [summary_area, hints_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
        let dim = Style::default().fg(Color::DarkGray);
        frame.render_widget(Paragraph::new(self.summary.as_str()).style(dim), summary_area);
        frame.render_widget(
            Paragraph::new(self.hints)
                .style(dim)
                .alignment(Alignment::Right),
            hints_area,
        );
    }
}
