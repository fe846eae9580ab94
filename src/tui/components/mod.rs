//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! Receive everything as struct fields, rebuilt every frame:
//! - `TitleBar`: app name, status, current location
//! - `Footer`: corpus summary and key hints
//! - `LoadingScreen`: spinner while the corpus is fetched
//!
//! ## Stateful Components (Event-Driven)
//!
//! A persistent `…State` struct lives in `TuiState`; a transient wrapper
//! borrows it together with corpus data for one render or one event:
//! - `BookPicker`: testament-grouped book grid, emits `Select(id)`
//! - `ChapterPicker`: chapter number grid, emits `Select(id)` / `Back`
//! - `Reader`: chapter text with prev/next bar, emits `Prev` / `Next` /
//!   `Back` / `Home`
//!
//! Components never touch `App` directly. The event loop turns their
//! events into `core::Action`s.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── grid.rs            (cell layout shared by the pickers)
//! ├── book_picker.rs
//! ├── chapter_picker.rs
//! ├── reader.rs
//! ├── title_bar.rs
//! ├── footer.rs
//! └── loading.rs
//! ```

pub mod book_picker;
pub mod chapter_picker;
pub mod footer;
pub mod grid;
pub mod loading;
pub mod reader;
mod title_bar;

pub use book_picker::{BookPicker, BookPickerEvent, BookPickerState};
pub use chapter_picker::{ChapterPicker, ChapterPickerEvent, ChapterPickerState};
pub use footer::Footer;
pub use loading::LoadingScreen;
pub use reader::{Reader, ReaderEvent, ReaderState};
pub use title_bar::TitleBar;
