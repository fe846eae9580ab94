//! # Corpus
//!
//! The scripture data model as it travels over the wire and sits on disk.
//!
//! ```text
//! Corpus
//! ├── bible_name: String      // "bibleName"
//! ├── bible_id: String        // "bibleId"
//! └── books: Vec<Book>        // canonical order, OT before NT
//!     ├── id / name / abbreviation
//!     └── chapters: Vec<Chapter>   // canonical order, 1..N
//!         └── id / number / reference / content ("[1] ... [2] ...")
//! ```
//!
//! Book and chapter order is load-bearing: adjacency navigation walks the
//! arrays, there is no explicit sort index. Lookups are linear scans by id.

use serde::{Deserialize, Serialize};

/// Book ids that belong to the New Testament. Anything else is Old Testament.
pub const NEW_TESTAMENT_BOOK_IDS: &[&str] = &[
    "MAT", "MRK", "LUK", "JHN", "ACT", "ROM", "1CO", "2CO", "GAL", "EPH", "PHP", "COL", "1TH",
    "2TH", "1TI", "2TI", "TIT", "PHM", "HEB", "JAS", "1PE", "2PE", "1JN", "2JN", "3JN", "JUD",
    "REV",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: String,
    pub number: String,
    pub reference: String,
    /// Missing in a few source chapters; those read as empty.
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    pub bible_name: String,
    pub bible_id: String,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn of(book_id: &str) -> Self {
        if NEW_TESTAMENT_BOOK_IDS.contains(&book_id) {
            Testament::New
        } else {
            Testament::Old
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Testament::Old => "Old Testament",
            Testament::New => "New Testament",
        }
    }
}

impl Book {
    pub fn testament(&self) -> Testament {
        Testament::of(&self.id)
    }

    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    pub fn chapter_index(&self, id: &str) -> Option<usize> {
        self.chapters.iter().position(|c| c.id == id)
    }

    /// "1 chapter" / "N chapters".
    pub fn chapter_label(&self) -> String {
        match self.chapters.len() {
            1 => "1 chapter".to_string(),
            n => format!("{n} chapters"),
        }
    }
}

impl Corpus {
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn book_index(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    /// Total chapters across every book.
    pub fn chapter_count(&self) -> usize {
        self.books.iter().map(|b| b.chapters.len()).sum()
    }

    /// Books of one testament, in corpus order.
    pub fn books_in(&self, testament: Testament) -> impl Iterator<Item = (usize, &Book)> {
        self.books
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.testament() == testament)
    }

    /// Joins an Old Testament and a New Testament document into one corpus.
    ///
    /// OT books come first, then NT books, each in their original order.
    /// Name and id are taken from the New Testament document.
    pub fn merge(old_testament: Corpus, new_testament: Corpus) -> Corpus {
        let mut books = old_testament.books;
        books.extend(new_testament.books);
        Corpus {
            bible_name: new_testament.bible_name,
            bible_id: new_testament.bible_id,
            books,
        }
    }
}
