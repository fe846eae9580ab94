//! # Application State
//!
//! Core reading state for Lectio. Domain logic only, no TUI-specific types.
//! Presentation state (scroll offsets, grid cursors, the verse-number toggle)
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── corpus: Option<Arc<Corpus>>   // None until the fetch lands
//! ├── cursor: Cursor                // what the reader is looking at
//! │   ├── selected_book_id
//! │   ├── selected_chapter_id
//! │   └── view: Books | Chapters | Reader
//! └── status_message: String        // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Adjacency flags are computed on demand from the cursor.

use std::sync::Arc;

use crate::core::corpus::{Book, Chapter, Corpus};
use crate::core::navigation::{self, Position};

/// Which of the three screens is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Books,
    Chapters,
    Reader,
}

/// Ephemeral navigation cursor. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub selected_book_id: Option<String>,
    pub selected_chapter_id: Option<String>,
    pub view: View,
}

pub struct App {
    pub corpus: Option<Arc<Corpus>>,
    pub cursor: Cursor,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            corpus: None,
            cursor: Cursor::default(),
            status_message: String::from("Loading the Bible..."),
        }
    }

    /// True until a corpus has been installed.
    pub fn is_loading(&self) -> bool {
        self.corpus.is_none()
    }

    pub fn selected_book(&self) -> Option<&Book> {
        let corpus = self.corpus.as_deref()?;
        corpus.book(self.cursor.selected_book_id.as_deref()?)
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        let book = self.selected_book()?;
        book.chapter(self.cursor.selected_chapter_id.as_deref()?)
    }

    /// Corpus indices of the selected chapter.
    pub fn position(&self) -> Option<Position> {
        let corpus = self.corpus.as_deref()?;
        Position::resolve(
            corpus,
            self.cursor.selected_book_id.as_deref()?,
            self.cursor.selected_chapter_id.as_deref()?,
        )
    }

    pub fn has_prev(&self) -> bool {
        match (self.corpus.as_deref(), self.position()) {
            (Some(corpus), Some(pos)) => navigation::has_prev(corpus, pos),
            _ => false,
        }
    }

    pub fn has_next(&self) -> bool {
        match (self.corpus.as_deref(), self.position()) {
            (Some(corpus), Some(pos)) => navigation::has_next(corpus, pos),
            _ => false,
        }
    }
}
