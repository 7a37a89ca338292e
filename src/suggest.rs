// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! Suggestion catalog, filtering and menu paging.
//!
//! The catalog keeps insertion order and allows duplicates. Filtering is a
//! plain substring match against what the user typed; the menu shows at most
//! [`PAGE_SIZE`] entries and scrolls to keep the selection visible.

use std::ops::Range;

use tracing::debug;

/// Number of suggestions shown at once.
pub const PAGE_SIZE: usize = 5;

/// Pixel height of one menu row.
pub const MENU_ROW_HEIGHT: i32 = 16;

/// Gap between the prompt row and a menu drawn below it.
pub const MENU_GAP_BELOW: i32 = 19;

/// Rows reserved when the menu scrolls: the page plus the "+N" row.
const MENU_SCROLL_ROWS: usize = PAGE_SIZE + 1;

#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    catalog: Vec<String>,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Into<String>) {
        self.catalog.push(item.into());
    }

    pub fn add_range<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.catalog.len();
        self.catalog.extend(items.into_iter().map(Into::into));
        debug!(added = self.catalog.len() - before, "suggestions added");
    }

    pub fn clear(&mut self) {
        self.catalog.clear();
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    /// Every candidate that contains `search` and is not equal to it, in
    /// catalog order. An empty search matches nothing.
    pub fn filter(&self, search: &str) -> Vec<&str> {
        if search.is_empty() {
            return Vec::new();
        }
        self.catalog
            .iter()
            .map(String::as_str)
            .filter(|candidate| candidate.contains(search) && *candidate != search)
            .collect()
    }

    pub fn count(&self, search: &str) -> usize {
        self.filter(search).len()
    }

    pub fn select(&self, search: &str, index: usize) -> Option<&str> {
        self.filter(search).get(index).copied()
    }
}

/// A candidate with its leading part hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortened<'a> {
    /// Number of leading characters (cells) hidden.
    pub hidden: usize,
    pub text: &'a str,
}

impl Shortened<'_> {
    /// Length of the visible text in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Hide the part of a dotted candidate that lies before the last `.` of the
/// search word, so the rest stays aligned under what the user is typing.
/// Candidates without a `.` are shown in full.
pub fn shorten<'a>(candidate: &'a str, search: &str) -> Shortened<'a> {
    if !candidate.contains('.') {
        return Shortened {
            hidden: 0,
            text: candidate,
        };
    }

    let last_dot = search
        .chars()
        .enumerate()
        .filter(|(_, ch)| *ch == '.')
        .map(|(idx, _)| idx)
        .last()
        .unwrap_or(0);

    let (hidden, byte_start) = match candidate.char_indices().nth(last_dot) {
        Some((byte_idx, _)) => (last_dot, byte_idx),
        None => (candidate.chars().count(), candidate.len()),
    };

    Shortened {
        hidden,
        text: &candidate[byte_start..],
    }
}

/// Shortened form of the longest candidate. The first one wins on ties.
pub fn longest_shortened<'a>(candidates: &[&'a str], search: &str) -> Shortened<'a> {
    let longest = candidates
        .iter()
        .copied()
        .fold("", |best, candidate| {
            if candidate.chars().count() > best.chars().count() {
                candidate
            } else {
                best
            }
        });
    shorten(longest, search)
}

/// The slice of filtered suggestions that is visible in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionWindow {
    pub start: usize,
    pub len: usize,
    /// Entries scrolled past above the window.
    pub hidden_above: usize,
    /// Entries not yet reached below the window.
    pub hidden_below: usize,
    /// Row of the selected entry inside the window.
    pub cursor_row: Option<usize>,
}

impl SuggestionWindow {
    pub fn compute(count: usize, selected: Option<usize>) -> Self {
        let selected = selected.filter(|&idx| idx < count);

        if count <= PAGE_SIZE {
            return Self {
                start: 0,
                len: count,
                hidden_above: 0,
                hidden_below: 0,
                cursor_row: selected,
            };
        }

        // Keep two entries of context above the selection, but never leave
        // the page short at the end of the list.
        let scroll_level = selected.map_or(0, |idx| idx.saturating_sub(2));
        let start = scroll_level.min(count - PAGE_SIZE);

        Self {
            start,
            len: PAGE_SIZE,
            hidden_above: start,
            hidden_below: count - start - PAGE_SIZE,
            cursor_row: selected.map(|idx| idx - start),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Where the menu goes relative to the prompt row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPlacement {
    Below,
    Above,
}

/// Rows of menu height reserved above the prompt when there is no room
/// below.
pub fn rows_above(count: usize) -> usize {
    count.min(MENU_SCROLL_ROWS)
}

/// Place the menu below the prompt row at `row_y` if it fits inside the
/// viewport, otherwise above it.
pub fn menu_placement(row_y: i32, count: usize, viewport_height: u32) -> MenuPlacement {
    let menu_height = if count > MENU_SCROLL_ROWS {
        MENU_SCROLL_ROWS as i32 * MENU_ROW_HEIGHT - 6
    } else {
        count as i32 * MENU_ROW_HEIGHT
    };
    let bottom = i64::from(row_y) + i64::from(MENU_GAP_BELOW) + i64::from(menu_height);
    if bottom <= i64::from(viewport_height) {
        MenuPlacement::Below
    } else {
        MenuPlacement::Above
    }
}
