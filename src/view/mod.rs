// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! The console widget: output buffer, prompt and suggestions behind one
//! event-driven API.
//!
//! The view never draws on its own. Every change that affects the picture
//! sets a redraw flag that the host drains with [`ConsoleView::take_redraw`]
//! before calling [`ConsoleView::paint`].

mod draw;

use std::fmt;

use tracing::debug;

use crate::config::ViewConfig;
use crate::layout::RowTally;
use crate::line::{Buffer, Line, TextSegment};
use crate::prompt::{KeyOutcome, PageDirection, PromptEditor, PromptKey};
use crate::scroll::{Recalc, ScrollController, ScrollbarModel};
use crate::style::{ColorRef, Palette, StyleKind};
use crate::suggest::SuggestionEngine;

/// Receives every line the user commits with Enter.
pub trait InputConsumer {
    fn on_submit(&mut self, view: &mut ConsoleView, text: &str);
}

impl<F> InputConsumer for F
where
    F: FnMut(&mut ConsoleView, &str),
{
    fn on_submit(&mut self, view: &mut ConsoleView, text: &str) {
        self(view, text)
    }
}

pub struct ConsoleView {
    config: ViewConfig,
    buffer: Buffer,
    prompt: PromptEditor,
    suggestions: SuggestionEngine,
    scroll: ScrollController,
    rows: RowTally,
    consumer: Option<Box<dyn InputConsumer>>,
    width: u32,
    height: u32,
    needs_redraw: bool,
}

impl fmt::Debug for ConsoleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleView")
            .field("lines", &self.buffer.len())
            .field("prompt", &self.prompt)
            .field("suggestions", &self.suggestions.catalog().len())
            .field("scroll", &self.scroll)
            .field("has_consumer", &self.consumer.is_some())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl ConsoleView {
    pub fn new(config: ViewConfig) -> Self {
        let rows = RowTally::count(&[], config.cells.chars_per_row(0));
        Self {
            config,
            rows,
            buffer: Buffer::new(),
            prompt: PromptEditor::new(),
            suggestions: SuggestionEngine::new(),
            scroll: ScrollController::new(),
            consumer: None,
            width: 0,
            height: 0,
            needs_redraw: true,
        }
    }

    pub fn with_consumer(config: ViewConfig, consumer: impl InputConsumer + 'static) -> Self {
        let mut view = Self::new(config);
        view.set_consumer(consumer);
        view
    }

    pub fn set_consumer(&mut self, consumer: impl InputConsumer + 'static) {
        self.consumer = Some(Box::new(consumer));
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn prompt(&self) -> &PromptEditor {
        &self.prompt
    }

    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        self.needs_redraw = true;
        &mut self.config.palette
    }

    pub fn suggestions(&self) -> &SuggestionEngine {
        &self.suggestions
    }

    pub fn suggestions_mut(&mut self) -> &mut SuggestionEngine {
        self.needs_redraw = true;
        &mut self.suggestions
    }

    pub fn prompt_info(&self) -> &str {
        self.prompt.prompt_info()
    }

    pub fn set_prompt_info(&mut self, info: impl Into<String>) {
        self.prompt.set_prompt_info(info);
        self.needs_redraw = true;
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_prompting()
    }

    pub fn set_prompting(&mut self, prompting: bool) {
        self.prompt.set_prompting(prompting);
        self.needs_redraw = true;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns whether a redraw was requested since the last call, and
    /// clears the request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    // Scrolling.

    pub fn attach_scrollbar(&mut self) {
        self.scroll.attach_scrollbar();
        self.recalculate_scroll(Recalc::MoveToEnd);
    }

    pub fn detach_scrollbar(&mut self) {
        self.scroll.detach_scrollbar();
        self.recalculate_scroll(Recalc::MoveToEnd);
    }

    pub fn scrollbar(&self) -> Option<&ScrollbarModel> {
        self.scroll.scrollbar()
    }

    /// Vertical pixel offset applied to the first row.
    pub fn scroll_shift(&self) -> i32 {
        self.scroll.shift()
    }

    /// The user moved the scrollbar.
    pub fn scroll_to(&mut self, position: u32) {
        if self.scroll.scroll_to(position) {
            self.needs_redraw = true;
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        let chars_per_row = self.config.cells.chars_per_row(width);
        if chars_per_row != self.rows.chars_per_row() {
            self.rows = RowTally::count(self.buffer.lines(), chars_per_row);
        }
        self.recalculate_scroll(Recalc::Resize);
    }

    /// Wrapped rows of the whole buffer at the current width.
    pub fn row_count(&self) -> usize {
        self.rows.rows()
    }

    pub fn content_height(&self) -> u32 {
        self.config.cells.content_height(self.row_count())
    }

    fn recalculate_scroll(&mut self, recalc: Recalc) {
        let content_height = self.content_height();
        self.scroll.recalculate(content_height, self.height, recalc);
        self.needs_redraw = true;
    }

    // Writing.

    pub fn write_line(&mut self, text: impl Into<String>) {
        let color = self.config.palette.text;
        self.write_line_colored(text, color);
    }

    pub fn write_line_colored(&mut self, text: impl Into<String>, color: ColorRef) {
        self.push_line(Line::from_segment(TextSegment::new(text, color)));
    }

    pub fn write_line_styled(
        &mut self,
        text: impl Into<String>,
        color: ColorRef,
        style: StyleKind,
        style_color: ColorRef,
    ) {
        self.push_line(Line::from_segment(TextSegment::styled(
            text,
            color,
            style,
            style_color,
        )));
    }

    pub fn blank_line(&mut self) {
        self.write_line("");
    }

    /// Append to the last line, or start one if the buffer is empty.
    pub fn write(&mut self, text: impl Into<String>) {
        let color = self.config.palette.text;
        self.write_colored(text, color);
    }

    pub fn write_colored(&mut self, text: impl Into<String>, color: ColorRef) {
        let before = self.buffer.last().map(Line::len);
        self.buffer.append_to_last(TextSegment::new(text, color));
        if let Some(last) = self.buffer.last() {
            match before {
                Some(before) => self.rows.replace_last(before, last),
                None => self.rows.push(last),
            }
        }
        self.recalculate_scroll(Recalc::MoveToEnd);
    }

    /// Append a line built by the caller.
    pub fn push_line(&mut self, line: Line) {
        self.rows.push(&line);
        self.buffer.push_line(line);
        self.recalculate_scroll(Recalc::MoveToEnd);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.rows.clear();
        self.recalculate_scroll(Recalc::MoveToEnd);
    }

    // Input.

    pub fn tick(&mut self) {
        self.prompt.tick();
        self.needs_redraw = true;
    }

    pub fn handle_key(&mut self, key: PromptKey) -> KeyOutcome {
        let outcome = self.prompt.handle_key(key, &self.suggestions);
        match &outcome {
            KeyOutcome::Ignored => {}
            KeyOutcome::Redraw => self.needs_redraw = true,
            KeyOutcome::Submit(text) => self.submit(text),
            KeyOutcome::Scroll(direction) => {
                let moved = match direction {
                    PageDirection::Up => self.scroll.page_up(),
                    PageDirection::Down => self.scroll.page_down(),
                };
                if moved {
                    self.needs_redraw = true;
                }
            }
        }
        outcome
    }

    /// Echo the committed input and hand it to the consumer.
    fn submit(&mut self, text: &str) {
        let palette = self.config.palette;
        let mut line = Line::new();
        if !self.prompt.prompt_info().is_empty() {
            line.push(self.prompt.prompt_info(), palette.prompt_info);
        }
        line.push(text, palette.prompt);
        self.push_line(line);

        debug!(input = text, "submitted");

        // The consumer gets the whole view, so it is taken out for the call.
        if let Some(mut consumer) = self.consumer.take() {
            consumer.on_submit(self, text);
            if self.consumer.is_none() {
                self.consumer = Some(consumer);
            }
        }
    }
}
