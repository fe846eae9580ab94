//! # Book Picker
//!
//! Every book of the corpus in a grid, Old Testament first, New Testament
//! under its own heading. Each cell shows the book name over its chapter
//! count.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BookPickerState` lives in `TuiState`
//! - `BookPicker` is created per frame (and per event) with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::corpus::{Book, Corpus, Testament};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::grid::{GridLayout, columns_for, fit, scroll_into_view};
use crate::tui::event::TuiEvent;

const CELL_WIDTH: u16 = 20;
const GAP: u16 = 2;
/// Name line + chapter count line.
const CELL_HEIGHT: u16 = 2;

#[derive(Debug, Default)]
pub struct BookPickerState {
    pub selected: usize,
    /// Column count from the last render; 0 before the first frame.
    pub columns: usize,
    pub scroll: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookPickerEvent {
    Select(String),
}

pub struct BookPicker<'a> {
    state: &'a mut BookPickerState,
    old_testament: Vec<&'a Book>,
    new_testament: Vec<&'a Book>,
}

impl<'a> BookPicker<'a> {
    pub fn new(state: &'a mut BookPickerState, corpus: &'a Corpus) -> Self {
        let old_testament = corpus.books_in(Testament::Old).map(|(_, b)| b).collect();
        let new_testament = corpus.books_in(Testament::New).map(|(_, b)| b).collect();
        Self {
            state,
            old_testament,
            new_testament,
        }
    }

    fn grid(&self, columns: usize) -> GridLayout {
        GridLayout::new(&[self.old_testament.len(), self.new_testament.len()], columns)
    }

    /// Books in grid order.
    fn book_at(&self, index: usize) -> Option<&'a Book> {
        self.old_testament
            .iter()
            .chain(self.new_testament.iter())
            .nth(index)
            .copied()
    }
}

impl EventHandler for BookPicker<'_> {
    type Event = BookPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<BookPickerEvent> {
        match event {
            TuiEvent::Submit => self
                .book_at(self.state.selected)
                .map(|book| BookPickerEvent::Select(book.id.clone())),
            TuiEvent::CursorUp
            | TuiEvent::CursorDown
            | TuiEvent::CursorLeft
            | TuiEvent::CursorRight => {
                let grid = self.grid(self.state.columns);
                self.state.selected = grid.step(self.state.selected, event);
                None
            }
            _ => None,
        }
    }
}

impl Component for BookPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Books ")
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let total = self.old_testament.len() + self.new_testament.len();
        if total == 0 {
            let empty = Paragraph::new("No books in this Bible.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, inner);
            return;
        }

        let columns = columns_for(inner.width, CELL_WIDTH, GAP);
        self.state.columns = columns;
        self.state.selected = self.state.selected.min(total - 1);

        let mut lines: Vec<Line> = Vec::new();
        let mut selected_line = 0;
        let mut first_index = 0;

        for (testament, books) in [
            (Testament::Old, &self.old_testament),
            (Testament::New, &self.new_testament),
        ] {
            if books.is_empty() {
                continue;
            }
            lines.push(Line::styled(
                testament.label(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::default());

            for (row_index, row) in books.chunks(columns).enumerate() {
                let mut names = Vec::with_capacity(row.len() * 2);
                let mut counts = Vec::with_capacity(row.len() * 2);
                for (col, book) in row.iter().enumerate() {
                    let index = first_index + row_index * columns + col;
                    let is_selected = index == self.state.selected;
                    if is_selected {
                        selected_line = lines.len() as u16;
                    }

                    let (name_style, count_style) = if is_selected {
                        let s = Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED);
                        (s, s)
                    } else {
                        (
                            Style::default().fg(Color::Cyan),
                            Style::default().fg(Color::DarkGray),
                        )
                    };

                    if col > 0 {
                        let gap = " ".repeat(GAP as usize);
                        names.push(Span::raw(gap.clone()));
                        counts.push(Span::raw(gap));
                    }
                    names.push(Span::styled(fit(&book.name, CELL_WIDTH as usize), name_style));
                    counts.push(Span::styled(
                        fit(&book.chapter_label(), CELL_WIDTH as usize),
                        count_style,
                    ));
                }
                lines.push(Line::from(names));
                lines.push(Line::from(counts));
            }
            lines.push(Line::default());
            first_index += books.len();
        }

        self.state.scroll =
            scroll_into_view(self.state.scroll, selected_line, CELL_HEIGHT, inner.height);
        frame.render_widget(Paragraph::new(lines).scroll((self.state.scroll, 0)), inner);
    }
}
