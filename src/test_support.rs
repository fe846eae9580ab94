//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::core::corpus::{Book, Chapter, Corpus};
use crate::core::state::App;

/// A book with `chapters` chapters, ids `"{id}.{n}"`, two verses each.
pub fn book(id: &str, chapters: usize) -> Book {
    Book {
        id: id.to_string(),
        name: format!("Book {id}"),
        abbreviation: id.to_string(),
        chapters: (1..=chapters)
            .map(|n| Chapter {
                id: format!("{id}.{n}"),
                number: n.to_string(),
                reference: format!("Book {id} {n}"),
                content: format!("[1] First verse of {id} {n}. [2] Second verse."),
            })
            .collect(),
    }
}

pub fn corpus(books: Vec<Book>) -> Corpus {
    Corpus {
        bible_name: "Test Bible".to_string(),
        bible_id: "test".to_string(),
        books,
    }
}

/// Two books: AAA with 3 chapters, BBB with 2.
pub fn two_book_corpus() -> Corpus {
    corpus(vec![book("AAA", 3), book("BBB", 2)])
}

/// Creates a test App with `two_book_corpus` already loaded.
pub fn loaded_app() -> App {
    let mut app = App::new();
    app.corpus = Some(Arc::new(two_book_corpus()));
    app
}

/// Concatenated symbols of a rendered `TestBackend` buffer.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}
