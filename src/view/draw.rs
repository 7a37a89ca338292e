// SPDX-License-Identifier: MIT
// Frame painting for the console view

use tracing::debug;

use super::ConsoleView;
use crate::layout::{Layout, LineFlow, cell_of, line_row_count};
use crate::line::{Line, char_slice};
use crate::render::{Point, Rect, Renderer, draw_style};
use crate::style::ColorRef;
use crate::suggest::{
    MENU_GAP_BELOW, MENU_ROW_HEIGHT, MenuPlacement, PAGE_SIZE, SuggestionWindow, longest_shortened,
    menu_placement, rows_above, shorten,
};

/// Pixels per character used to size the backing behind a menu drawn above
/// the prompt.
const BACKING_CHAR_WIDTH: u32 = 12;

/// Pixels per character for the selection tick of a menu that fits on one
/// page. A paged menu uses the cell width.
const TICK_CHAR_WIDTH: i32 = 12;

fn px(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// `count` cells of `size` pixels.
fn cells(count: usize, size: i32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(size)
}

impl ConsoleView {
    /// Paint one frame.
    ///
    /// Background, then the buffered rows shifted by the scroll offset. Only
    /// lines that reach into the viewport are laid out. When prompting, the
    /// prompt info, the suggestion menu, the input and the caret follow on
    /// the row after the last buffered row.
    pub fn paint(&self, renderer: &mut dyn Renderer) {
        let palette = &self.config.palette;
        let ch = px(self.config.cells.cell_height);
        let chars_per_row = self.rows.chars_per_row();

        renderer.fill_rect(palette.background, Rect::new(0, 0, self.width, self.height));

        let lines = self.buffer.lines();
        let line_height = |line: &Line| cells(line_row_count(line.len(), chars_per_row), ch);
        let prompt_top = self
            .scroll
            .shift()
            .saturating_add(cells(self.rows.rows(), ch));

        // Walk up from the bottom to the first line that is still visible.
        let mut first = lines.len();
        let mut y = prompt_top;
        for (idx, line) in lines.iter().enumerate().rev() {
            if y <= 0 {
                break;
            }
            y = y.saturating_sub(line_height(line));
            first = idx;
        }

        for line in &lines[first..] {
            if y >= px(self.height) {
                break;
            }
            self.paint_line(renderer, line, y);
            y = y.saturating_add(line_height(line));
        }

        if self.prompt.is_prompting() {
            self.paint_prompt(renderer, chars_per_row, prompt_top);
        }
    }

    /// Draw the rows of one buffered line whose first row is at `top`,
    /// skipping rows outside the viewport.
    fn paint_line(&self, renderer: &mut dyn Renderer, line: &Line, top: i32) {
        let cell_width = self.config.cells.cell_width;
        let cw = px(cell_width);
        let ch = px(self.config.cells.cell_height);

        let layout = Layout::compute(std::slice::from_ref(line), self.width, self.config.cells);
        let mut y = top;
        for row in layout.rows() {
            if y >= px(self.height) {
                break;
            }
            if y.saturating_add(ch) > 0 {
                for placement in &row.placements {
                    let Some(segment) = line.segments().get(placement.segment) else {
                        continue;
                    };
                    let origin = Point::new(cells(placement.column, cw), y);
                    renderer.draw_text(
                        segment.slice(placement.start, placement.end),
                        &self.config.font,
                        segment.color(),
                        origin,
                    );
                    let width = u32::try_from(placement.end - placement.start)
                        .unwrap_or(u32::MAX)
                        .saturating_mul(cell_width);
                    draw_style(
                        renderer,
                        segment.style(),
                        segment.style_color(),
                        origin,
                        width,
                    );
                }
            }
            y = y.saturating_add(ch);
        }
    }

    fn paint_prompt(&self, renderer: &mut dyn Renderer, chars_per_row: usize, top: i32) {
        let palette = &self.config.palette;
        let cw = px(self.config.cells.cell_width);
        let ch = px(self.config.cells.cell_height);

        let mut flow = LineFlow::new(chars_per_row);
        self.paint_flow(
            renderer,
            &mut flow,
            top,
            self.prompt.prompt_info(),
            palette.prompt_info,
        );

        let row_y = top.saturating_add(cells(flow.row(), ch));
        self.paint_suggestions(renderer, cells(flow.column(), cw), row_y);

        self.paint_flow(
            renderer,
            &mut flow,
            top,
            self.prompt.read_buffer(),
            palette.prompt,
        );

        if self.prompt.blink_on() {
            self.paint_caret(renderer, chars_per_row, top);
        }
    }

    fn paint_flow(
        &self,
        renderer: &mut dyn Renderer,
        flow: &mut LineFlow,
        top: i32,
        text: &str,
        color: ColorRef,
    ) {
        let cw = px(self.config.cells.cell_width);
        let ch = px(self.config.cells.cell_height);
        for span in flow.place(text.chars().count()) {
            renderer.draw_text(
                char_slice(text, span.start, span.end),
                &self.config.font,
                color,
                Point::new(cells(span.column, cw), top + cells(span.row, ch)),
            );
        }
    }

    fn paint_caret(&self, renderer: &mut dyn Renderer, chars_per_row: usize, top: i32) {
        let metrics = &self.config.cells;
        let cw = px(metrics.cell_width);
        let ch = px(metrics.cell_height);

        let index = self.prompt.prompt_info().chars().count() + self.prompt.caret_index();
        let (row, column) = cell_of(index, chars_per_row);
        let x = cells(column, cw);
        let y = top + cells(row, ch) + 3;

        if self.prompt.cursor_offset() == 0 {
            renderer.fill_rect(
                self.config.palette.cursor,
                Rect::new(x + 3, y, metrics.cell_width, metrics.cell_height),
            );
        } else {
            // Underline the character the caret sits before.
            let underline_y = y + ch;
            renderer.draw_line(
                self.config.palette.select_cursor,
                Point::new(x + 1, underline_y),
                Point::new(x + 1 + cw, underline_y),
            );
        }
    }

    /// Draw the menu for the current search word. `x` and `row_y` are where
    /// the prompt info ends.
    fn paint_suggestions(&self, renderer: &mut dyn Renderer, x: i32, row_y: i32) {
        let search = self.prompt.backup();
        let filtered = self.suggestions.filter(search);
        if filtered.is_empty() {
            return;
        }
        let count = filtered.len();

        let origin = match menu_placement(row_y, count, self.height) {
            MenuPlacement::Below => Point::new(x - 6, row_y + MENU_GAP_BELOW),
            MenuPlacement::Above => {
                let rows = rows_above(count);
                let height = cells(rows, MENU_ROW_HEIGHT);
                let origin = Point::new(x - 5, row_y - height);
                let longest = longest_shortened(&filtered, search);
                let width = u32::try_from(longest.char_count())
                    .unwrap_or(u32::MAX)
                    .saturating_mul(BACKING_CHAR_WIDTH);
                renderer.fill_rect(
                    self.config.palette.background,
                    Rect::new(origin.x, origin.y, width, u32::try_from(height).unwrap_or(0)),
                );
                origin
            }
        };

        self.paint_menu(renderer, origin, &filtered, search);
    }

    fn paint_menu(
        &self,
        renderer: &mut dyn Renderer,
        origin: Point,
        filtered: &[&str],
        search: &str,
    ) {
        let palette = &self.config.palette;
        let font = &self.config.font;
        let cw = px(self.config.cells.cell_width);

        let selected = self.prompt.selected();
        if let Some(idx) = selected
            && idx >= filtered.len()
        {
            debug!(selected = idx, count = filtered.len(), "stale suggestion selection");
        }

        let window = SuggestionWindow::compute(filtered.len(), selected);
        let Some(visible) = filtered.get(window.range()) else {
            return;
        };
        let shortened: Vec<_> = visible.iter().map(|item| shorten(item, search)).collect();

        for (row, item) in shortened.iter().enumerate() {
            renderer.draw_text(
                item.text,
                font,
                palette.suggestion_text,
                Point::new(
                    origin.x + 6 + cells(item.hidden, cw),
                    origin.y + cells(row, MENU_ROW_HEIGHT),
                ),
            );
        }

        let bar_shift = cells(
            shortened.iter().map(|item| item.hidden).min().unwrap_or(0),
            cw,
        );
        renderer.fill_rect(
            palette.suggestion_menu,
            Rect::new(
                origin.x + bar_shift,
                origin.y,
                4,
                u32::try_from(cells(window.len, MENU_ROW_HEIGHT)).unwrap_or(0),
            ),
        );

        if let Some(row) = window.cursor_row
            && let (Some(item), Some(full)) = (
                shortened.get(row),
                selected.and_then(|idx| filtered.get(idx)),
            )
        {
            let tick_y = origin.y + cells(row + 1, MENU_ROW_HEIGHT);
            let char_width = if filtered.len() > PAGE_SIZE {
                cw
            } else {
                TICK_CHAR_WIDTH
            };
            renderer.draw_line(
                palette.suggestion_cursor,
                Point::new(origin.x + 8 + cells(item.hidden, cw), tick_y),
                Point::new(origin.x + cells(full.chars().count(), char_width) + 2, tick_y),
            );
        }

        if window.hidden_below > 0 {
            renderer.draw_text(
                &format!("... +{}", window.hidden_below),
                font,
                palette.suggestion_menu,
                Point::new(
                    origin.x + 6 + bar_shift,
                    origin.y + cells(PAGE_SIZE, MENU_ROW_HEIGHT),
                ),
            );
        }

        if window.hidden_above > 0 {
            renderer.draw_text(
                &format!("↑{}", window.hidden_above),
                font,
                palette.suggestion_menu,
                Point::new(origin.x - 25 + bar_shift, origin.y),
            );
        }
    }
}
