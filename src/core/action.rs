//! # Actions
//!
//! Everything that can happen in Lectio becomes an `Action`.
//! User picks a book? That's `Action::SelectBook(id)`.
//! The corpus fetch lands? That's `Action::CorpusLoaded(corpus)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` for the adapter to carry out.
//! No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```
//!
//! ## Navigation
//!
//! ```text
//!            SelectBook             SelectChapter
//!   Books ───────────────▶ Chapters ─────────────▶ Reader ◀─┐
//!     ▲                     │   ▲     BackToChapters  │      │ Prev/NextChapter
//!     │        Home         │   └─────────────────────┤      │
//!     └─────────────────────┴──────── Home ───────────┘──────┘
//! ```
//!
//! Actions that don't apply to the current view, or that name ids the
//! corpus doesn't have, leave the state untouched.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::corpus::Corpus;
use crate::core::navigation;
use crate::core::state::{App, View};

#[derive(Debug)]
pub enum Action {
    CorpusLoaded(Arc<Corpus>),
    LoadFailed(String),
    SelectBook(String),
    SelectChapter(String),
    BackToChapters,
    Home,
    PrevChapter,
    NextChapter,
    Quit,
}

/// Work the adapter must do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action_name(&action));
    match action {
        Action::CorpusLoaded(corpus) => {
            info!(
                "Corpus loaded: {} ({} books, {} chapters)",
                corpus.bible_name,
                corpus.books.len(),
                corpus.chapter_count()
            );
            app.status_message = corpus.bible_name.clone();
            app.corpus = Some(corpus);
        }
        Action::LoadFailed(message) => {
            // Stays on the loading screen; there is no retry.
            warn!("Failed to load Bible data: {}", message);
        }
        Action::SelectBook(id) => {
            let known = app
                .corpus
                .as_deref()
                .is_some_and(|corpus| corpus.book(&id).is_some());
            if known && app.cursor.view == View::Books {
                app.cursor.selected_book_id = Some(id);
                app.cursor.selected_chapter_id = None;
                app.cursor.view = View::Chapters;
            }
        }
        Action::SelectChapter(id) => {
            let known = app.selected_book().is_some_and(|book| book.chapter(&id).is_some());
            if known && app.cursor.view == View::Chapters {
                app.cursor.selected_chapter_id = Some(id);
                app.cursor.view = View::Reader;
            }
        }
        Action::BackToChapters => {
            if app.cursor.view == View::Reader {
                app.cursor.selected_chapter_id = None;
                app.cursor.view = View::Chapters;
            }
        }
        Action::Home => {
            app.cursor.selected_book_id = None;
            app.cursor.selected_chapter_id = None;
            app.cursor.view = View::Books;
        }
        Action::PrevChapter => step(app, navigation::prev),
        Action::NextChapter => step(app, navigation::next),
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}

/// Move the reader cursor to an adjacent chapter, if there is one.
fn step(
    app: &mut App,
    adjacent: fn(&Corpus, navigation::Position) -> Option<navigation::Position>,
) {
    if app.cursor.view != View::Reader {
        return;
    }
    let (Some(corpus), Some(pos)) = (app.corpus.clone(), app.position()) else {
        return;
    };
    if let Some((book_id, chapter_id)) = adjacent(&corpus, pos).and_then(|p| p.ids(&corpus)) {
        app.cursor.selected_book_id = Some(book_id.to_string());
        app.cursor.selected_chapter_id = Some(chapter_id.to_string());
    }
}

/// Short label for logging without dumping a whole corpus into the log.
fn action_name(action: &Action) -> &'static str {
    match action {
        Action::CorpusLoaded(_) => "CorpusLoaded",
        Action::LoadFailed(_) => "LoadFailed",
        Action::SelectBook(_) => "SelectBook",
        Action::SelectChapter(_) => "SelectChapter",
        Action::BackToChapters => "BackToChapters",
        Action::Home => "Home",
        Action::PrevChapter => "PrevChapter",
        Action::NextChapter => "NextChapter",
        Action::Quit => "Quit",
    }
}
