//! # Chapter Picker
//!
//! Chapter numbers of the selected book in a grid. Enter opens the chapter,
//! Esc/Backspace returns to the book list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::corpus::Book;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::grid::{GridLayout, columns_for, scroll_into_view};
use crate::tui::event::TuiEvent;

const CELL_WIDTH: u16 = 5;
const GAP: u16 = 1;

#[derive(Debug, Default)]
pub struct ChapterPickerState {
    pub selected: usize,
    pub columns: usize,
    pub scroll: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterPickerEvent {
    Select(String),
    Back,
}

pub struct ChapterPicker<'a> {
    state: &'a mut ChapterPickerState,
    book: &'a Book,
}

impl<'a> ChapterPicker<'a> {
    pub fn new(state: &'a mut ChapterPickerState, book: &'a Book) -> Self {
        Self { state, book }
    }
}

impl EventHandler for ChapterPicker<'_> {
    type Event = ChapterPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ChapterPickerEvent> {
        match event {
            TuiEvent::Back => Some(ChapterPickerEvent::Back),
            TuiEvent::Submit => self
                .book
                .chapters
                .get(self.state.selected)
                .map(|chapter| ChapterPickerEvent::Select(chapter.id.clone())),
            TuiEvent::CursorUp
            | TuiEvent::CursorDown
            | TuiEvent::CursorLeft
            | TuiEvent::CursorRight => {
                let grid = GridLayout::new(&[self.book.chapters.len()], self.state.columns);
                self.state.selected = grid.step(self.state.selected, event);
                None
            }
            _ => None,
        }
    }
}

impl Component for ChapterPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!(" {} ", self.book.name))
            .title_bottom(Line::from(format!(" {} ", self.book.chapter_label())).right_aligned())
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::new(1, 1, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chapters = &self.book.chapters;
        if chapters.is_empty() {
            let empty = Paragraph::new("This book has no chapters.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, inner);
            return;
        }

        let columns = columns_for(inner.width, CELL_WIDTH, GAP);
        self.state.columns = columns;
        self.state.selected = self.state.selected.min(chapters.len() - 1);

        let lines: Vec<Line> = chapters
            .chunks(columns)
            .enumerate()
            .map(|(row, chunk)| {
                let spans: Vec<Span> = chunk
                    .iter()
                    .enumerate()
                    .flat_map(|(col, chapter)| {
                        let index = row * columns + col;
                        let style = if index == self.state.selected {
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                        } else {
                            Style::default().fg(Color::Cyan)
                        };
                        let gap = if col > 0 { " ".repeat(GAP as usize) } else { String::new() };
                        [
                            Span::raw(gap),
                            Span::styled(format!("{:>4} ", chapter.number), style),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let selected_row = (self.state.selected / columns) as u16;
        self.state.scroll = scroll_into_view(self.state.scroll, selected_row, 1, inner.height);
        frame.render_widget(Paragraph::new(lines).scroll((self.state.scroll, 0)), inner);
    }
}
