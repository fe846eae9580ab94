//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm ─▶ TuiEvent ─▶ component of the current view ─▶ component event
//!                                                              │
//!                          App ◀── update() ◀── core::Action ◀─┘
//! ```
//!
//! The corpus fetch is the only background work. It runs on tokio and
//! reports back over an `mpsc` channel as `CorpusLoaded` / `LoadFailed`.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::api::CorpusSource;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, View};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    BookPicker, BookPickerEvent, BookPickerState, ChapterPicker, ChapterPickerEvent,
    ChapterPickerState, Reader, ReaderEvent, ReaderState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub book_picker: BookPickerState,
    pub chapter_picker: ChapterPickerState,
    pub reader: ReaderState,
}

impl TuiState {
    pub fn new(show_verse_numbers: bool) -> Self {
        Self {
            book_picker: BookPickerState::default(),
            chapter_picker: ChapterPickerState::default(),
            reader: ReaderState::new(show_verse_numbers),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Translate a UI event into a core action via the component for the
/// current view. Local-only events (scrolling, toggles, grid moves) update
/// `tui` and return `None`.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }
    let corpus = app.corpus.as_deref()?;

    match app.cursor.view {
        View::Books => {
            let BookPickerEvent::Select(id) =
                BookPicker::new(&mut tui.book_picker, corpus).handle_event(event)?;
            Some(Action::SelectBook(id))
        }
        View::Chapters => {
            if matches!(event, TuiEvent::InputChar('h')) {
                return Some(Action::Home);
            }
            let book = app.selected_book()?;
            match ChapterPicker::new(&mut tui.chapter_picker, book).handle_event(event)? {
                ChapterPickerEvent::Select(id) => Some(Action::SelectChapter(id)),
                ChapterPickerEvent::Back => Some(Action::Home),
            }
        }
        View::Reader => {
            let book = app.selected_book()?;
            let chapter = app.selected_chapter()?;
            let mut reader =
                Reader::new(&mut tui.reader, book, chapter, app.has_prev(), app.has_next());
            match reader.handle_event(event)? {
                ReaderEvent::Prev => Some(Action::PrevChapter),
                ReaderEvent::Next => Some(Action::NextChapter),
                ReaderEvent::Back => Some(Action::BackToChapters),
                ReaderEvent::Home => Some(Action::Home),
            }
        }
    }
}

/// Apply an action, then reset presentation state the new cursor makes
/// stale: reader scroll on chapter change, chapter grid on book change.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let before = app.cursor.clone();
    let effect = update(app, action);
    let after = &app.cursor;

    if after.selected_chapter_id != before.selected_chapter_id {
        tui.reader.reset_scroll();
    }
    if after.selected_book_id != before.selected_book_id && after.view == View::Chapters {
        tui.chapter_picker = ChapterPickerState::default();
    }
    effect
}

/// Fetch the corpus in the background and report back as an `Action`.
fn spawn_fetch(source: Arc<dyn CorpusSource>, tx: mpsc::Sender<Action>) {
    info!("Fetching corpus from {}", source.describe());
    tokio::spawn(async move {
        let action = match source.fetch().await {
            Ok(corpus) => Action::CorpusLoaded(Arc::new(corpus)),
            Err(e) => Action::LoadFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver corpus fetch result: receiver dropped");
        }
    });
}

pub fn run(config: &ResolvedConfig, source: Arc<dyn CorpusSource>) -> std::io::Result<()> {
    let mut app = App::new();
    let mut tui = TuiState::new(config.show_verse_numbers);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_fetch(source, tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, &event)
                && dispatch(&mut app, &mut tui, action) == Effect::Quit
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break Ok(());
        }

        // Handle background task actions (the corpus fetch)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received background action");
            dispatch(&mut app, &mut tui, action);
        }
    };

    ratatui::restore();
    info!("Reader closed");
    result
}
