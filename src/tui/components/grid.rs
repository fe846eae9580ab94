//! # Grid Geometry
//!
//! Shared by the book and chapter pickers. Items are laid out row-major in
//! one or more sections; each section starts on a fresh row, so the book
//! picker can put a heading between the testaments.
//!
//! ```text
//!  section 0        row 0:  [0] [1] [2]
//!                   row 1:  [3] [4]
//!  section 1        row 2:  [5] [6] [7]
//! ```
//!
//! Up/Down keep the column where the target row allows it, otherwise land
//! on that row's last cell.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::event::TuiEvent;

pub struct GridLayout {
    /// `(row, col)` per item; rows are counted across all sections.
    cells: Vec<(usize, usize)>,
}

impl GridLayout {
    pub fn new(section_lens: &[usize], columns: usize) -> Self {
        let columns = columns.max(1);
        let mut cells = Vec::with_capacity(section_lens.iter().sum());
        let mut first_row = 0;
        for &len in section_lens {
            for i in 0..len {
                cells.push((first_row + i / columns, i % columns));
            }
            first_row += len.div_ceil(columns);
        }
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<(usize, usize)> {
        self.cells.get(index).copied()
    }

    /// New selection after a cursor key. Other events leave it unchanged.
    pub fn step(&self, selected: usize, event: &TuiEvent) -> usize {
        if self.is_empty() {
            return 0;
        }
        let last = self.len() - 1;
        let selected = selected.min(last);
        match event {
            TuiEvent::CursorLeft => selected.saturating_sub(1),
            TuiEvent::CursorRight => (selected + 1).min(last),
            TuiEvent::CursorUp => self.vertical(selected, true),
            TuiEvent::CursorDown => self.vertical(selected, false),
            _ => selected,
        }
    }

    fn vertical(&self, selected: usize, up: bool) -> usize {
        let Some((row, col)) = self.cell(selected) else {
            return selected;
        };
        let target = match (up, row) {
            (true, 0) => return selected,
            (true, row) => row - 1,
            (false, row) => row + 1,
        };
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, (r, c))| *r == target && *c <= col)
            .map(|(i, _)| i)
            .last()
            .unwrap_or(selected)
    }
}

/// How many cells of `cell_width` (plus `gap` between them) fit in `width`.
pub fn columns_for(width: u16, cell_width: u16, gap: u16) -> usize {
    ((width + gap) / (cell_width + gap)).max(1) as usize
}

/// Adjust a scroll offset so lines `first..first + height` are visible.
pub fn scroll_into_view(offset: u16, first: u16, height: u16, viewport: u16) -> u16 {
    if first < offset {
        first
    } else if first + height > offset + viewport {
        (first + height).saturating_sub(viewport)
    } else {
        offset
    }
}

/// Pad or truncate `text` to exactly `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{text}{}", " ".repeat(width - text_width));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}
