use crate::core::state::{App, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::footer::{corpus_summary, key_hints};
use crate::tui::components::{
    BookPicker, ChapterPicker, Footer, LoadingScreen, Reader, TitleBar,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    TitleBar::new(app.status_message.clone(), location(app)).render(frame, title_area);

    match app.corpus.as_deref() {
        None => LoadingScreen::new(spinner_frame).render(frame, main_area),
        Some(corpus) => match app.cursor.view {
            View::Books => BookPicker::new(&mut tui.book_picker, corpus).render(frame, main_area),
            View::Chapters => match app.selected_book() {
                Some(book) => {
                    ChapterPicker::new(&mut tui.chapter_picker, book).render(frame, main_area)
                }
                None => draw_missing(frame, main_area, "No book selected."),
            },
            View::Reader => match (app.selected_book(), app.selected_chapter()) {
                (Some(book), Some(chapter)) => Reader::new(
                    &mut tui.reader,
                    book,
                    chapter,
                    app.has_prev(),
                    app.has_next(),
                )
                .render(frame, main_area),
                _ => draw_missing(frame, main_area, "No chapter selected."),
            },
        },
    }

    let mut footer = Footer {
        summary: app.corpus.as_deref().map(corpus_summary).unwrap_or_default(),
        hints: if app.is_loading() {
            "q quit"
        } else {
            key_hints(app.cursor.view)
        },
    };
    footer.render(frame, footer_area);
}

/// Breadcrumb for the title bar: "Genesis", "Genesis › 1", or empty.
pub fn location(app: &App) -> String {
    match (app.selected_book(), app.selected_chapter()) {
        (Some(book), Some(chapter)) => format!("{} › {}", book.name, chapter.number),
        (Some(book), None) => book.name.clone(),
        _ => String::new(),
    }
}

fn draw_missing(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
