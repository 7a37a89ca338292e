// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! An embeddable console widget: a scrollable buffer of styled, word
//! wrapped lines with a single-line prompt and a suggestion menu.
//!
//! The widget draws through the [`Renderer`] trait and is driven by plain
//! method calls, so it can be hosted on any surface that can draw text,
//! lines and rectangles.

pub mod config;
pub mod error;
pub mod layout;
pub mod line;
pub mod prompt;
pub mod render;
pub mod scroll;
pub mod style;
pub mod suggest;
pub mod view;

pub use config::ViewConfig;
pub use error::{Error, Result};
pub use layout::{CellMetrics, Layout};
pub use line::{Buffer, Line, TextSegment};
pub use prompt::{KeyOutcome, PageDirection, PromptEditor, PromptKey};
pub use render::{CommandList, DrawCommand, Font, Point, Rect, Renderer};
pub use scroll::{ScrollController, ScrollbarModel};
pub use style::{ColorRef, Palette, StyleKind};
pub use suggest::SuggestionEngine;
pub use view::{ConsoleView, InputConsumer};
