//! # Reader
//!
//! One chapter: reference heading, the text, and a previous/next bar.
//!
//! ```text
//!                     Genesis 1
//!               Genesis - Chapter 1
//! ┌──────────────────────────────────────────┐
//! │ [1] In the beginning, God created the    │
//! │ heavens and the earth. [2] The earth ... │
//! └────────────────── verse numbers: on (v) ─┘
//!  ◀ Previous (p)                 Next (n) ▶
//! ```
//!
//! The verse-number toggle and scroll offset are presentation state and
//! live here, not in the core `App`. Hiding verse numbers only changes what
//! is drawn.

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::core::corpus::{Book, Chapter};
use crate::core::verse::strip_verse_numbers;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug)]
pub struct ReaderState {
    pub show_verse_numbers: bool,
    pub scroll: u16,
    /// From the last render: wrapped line count minus viewport height.
    pub max_scroll: u16,
    pub page: u16,
}

impl ReaderState {
    pub fn new(show_verse_numbers: bool) -> Self {
        Self {
            show_verse_numbers,
            scroll: 0,
            max_scroll: 0,
            page: 1,
        }
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::new(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderEvent {
    Prev,
    Next,
    Back,
    Home,
}

/// Chapter text as it should be drawn.
pub fn display_content(content: &str, show_verse_numbers: bool) -> Cow<'_, str> {
    if show_verse_numbers {
        Cow::Borrowed(content.trim())
    } else {
        Cow::Owned(strip_verse_numbers(content))
    }
}

pub struct Reader<'a> {
    state: &'a mut ReaderState,
    book: &'a Book,
    chapter: &'a Chapter,
    has_prev: bool,
    has_next: bool,
}

impl<'a> Reader<'a> {
    pub fn new(
        state: &'a mut ReaderState,
        book: &'a Book,
        chapter: &'a Chapter,
        has_prev: bool,
        has_next: bool,
    ) -> Self {
        Self {
            state,
            book,
            chapter,
            has_prev,
            has_next,
        }
    }

    fn nav_span(label: &'static str, enabled: bool) -> Span<'static> {
        let style = if enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label, style)
    }
}

impl EventHandler for Reader<'_> {
    type Event = ReaderEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ReaderEvent> {
        let state = &mut *self.state;
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                state.scroll = state.scroll.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                state.scroll = state.scroll.saturating_add(1).min(state.max_scroll);
                None
            }
            TuiEvent::ScrollPageUp => {
                state.scroll = state.scroll.saturating_sub(state.page);
                None
            }
            TuiEvent::ScrollPageDown => {
                state.scroll = state.scroll.saturating_add(state.page).min(state.max_scroll);
                None
            }
            TuiEvent::CursorLeft | TuiEvent::InputChar('p' | '[') => {
                self.has_prev.then_some(ReaderEvent::Prev)
            }
            TuiEvent::CursorRight | TuiEvent::InputChar('n' | ']') => {
                self.has_next.then_some(ReaderEvent::Next)
            }
            TuiEvent::InputChar('v') => {
                state.show_verse_numbers = !state.show_verse_numbers;
                None
            }
            TuiEvent::InputChar('h') => Some(ReaderEvent::Home),
            TuiEvent::Back => Some(ReaderEvent::Back),
            _ => None,
        }
    }
}

impl Component for Reader<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [header_area, body_area, nav_area] =
            Layout::vertical([Length(2), Min(0), Length(1)]).areas(area);

        // Heading
        let header = Paragraph::new(vec![
            Line::styled(
                self.chapter.reference.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format!("{} - Chapter {}", self.book.name, self.chapter.number),
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, header_area);

        // Body
        let toggle = if self.state.show_verse_numbers { "on" } else { "off" };
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(Line::from(format!(" verse numbers: {toggle} (v) ")).right_aligned())
            .padding(Padding::horizontal(1));
        let inner = block.inner(body_area);
        frame.render_widget(block, body_area);

        let text = display_content(&self.chapter.content, self.state.show_verse_numbers);
        let paragraph = if text.is_empty() {
            Paragraph::new("This chapter has no text.").style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(text.into_owned()).wrap(Wrap { trim: true })
        };

        let lines = u16::try_from(paragraph.line_count(inner.width)).unwrap_or(u16::MAX);
        self.state.max_scroll = lines.saturating_sub(inner.height);
        self.state.page = inner.height.saturating_sub(1).max(1);
        self.state.scroll = self.state.scroll.min(self.state.max_scroll);
        frame.render_widget(paragraph.scroll((self.state.scroll, 0)), inner);

        // Previous / next bar
        let [prev_area, hint_area, next_area] =
            Layout::horizontal([Length(16), Min(0), Length(12)]).areas(nav_area);
        frame.render_widget(
            Paragraph::new(Line::from(Self::nav_span(" ◀ Previous (p)", self.has_prev))),
            prev_area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Self::nav_span("Next (n) ▶ ", self.has_next)))
                .alignment(Alignment::Right),
            next_area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Esc chapters  h books",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
            hint_area,
        );
    }
}
