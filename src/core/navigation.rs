//! # Chapter Adjacency
//!
//! Previous/next chapter across book boundaries. Treats the corpus as one
//! flattened walk:
//!
//! ```text
//! GEN.1 → GEN.2 → … → GEN.50 → EXO.1 → … → REV.22
//! ```
//!
//! Positions are indices, not ids. The cursor stores ids and resolves them
//! with [`Position::resolve`] each time, so `has_prev`/`has_next` are always
//! derived from the current corpus and never cached.

use crate::core::corpus::Corpus;

/// Index of a chapter within the corpus: `books[book].chapters[chapter]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub book: usize,
    pub chapter: usize,
}

impl Position {
    pub fn new(book: usize, chapter: usize) -> Self {
        Self { book, chapter }
    }

    /// Resolve a book id and chapter id to indices by linear scan.
    pub fn resolve(corpus: &Corpus, book_id: &str, chapter_id: &str) -> Option<Self> {
        let book = corpus.book_index(book_id)?;
        let chapter = corpus.books[book].chapter_index(chapter_id)?;
        Some(Self { book, chapter })
    }

    /// Book id and chapter id at this position.
    pub fn ids<'a>(&self, corpus: &'a Corpus) -> Option<(&'a str, &'a str)> {
        let book = corpus.books.get(self.book)?;
        let chapter = book.chapters.get(self.chapter)?;
        Some((book.id.as_str(), chapter.id.as_str()))
    }
}

/// The chapter after `pos`: next in the same book, else the first chapter of
/// the following book. Books without chapters are skipped.
pub fn next(corpus: &Corpus, pos: Position) -> Option<Position> {
    let book = corpus.books.get(pos.book)?;
    if pos.chapter >= book.chapters.len() {
        return None;
    }
    if pos.chapter + 1 < book.chapters.len() {
        return Some(Position::new(pos.book, pos.chapter + 1));
    }
    corpus
        .books
        .iter()
        .enumerate()
        .skip(pos.book + 1)
        .find(|(_, b)| !b.chapters.is_empty())
        .map(|(i, _)| Position::new(i, 0))
}

/// The chapter before `pos`: previous in the same book, else the last
/// chapter of the preceding book. Books without chapters are skipped.
pub fn prev(corpus: &Corpus, pos: Position) -> Option<Position> {
    let book = corpus.books.get(pos.book)?;
    if pos.chapter >= book.chapters.len() {
        return None;
    }
    if pos.chapter > 0 {
        return Some(Position::new(pos.book, pos.chapter - 1));
    }
    corpus.books[..pos.book]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, b)| !b.chapters.is_empty())
        .map(|(i, b)| Position::new(i, b.chapters.len() - 1))
}

pub fn has_next(corpus: &Corpus, pos: Position) -> bool {
    next(corpus, pos).is_some()
}

pub fn has_prev(corpus: &Corpus, pos: Position) -> bool {
    prev(corpus, pos).is_some()
}
