// SPDX-License-Identifier: MIT
// Pixel primitives mapped onto a ratatui cell buffer

use std::ops::Range;

use conview::{ColorRef, Font, Point, Rect, Renderer};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as Area;
use ratatui::style::{Color, Modifier, Style};

pub fn to_color(color: ColorRef) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Draws the view on a terminal grid where one cell stands for a
/// `cell_width` by `cell_height` pixel block.
///
/// Text lands in the cell containing its origin. Rectangles and ellipses
/// cover the cells whose centers they contain. Lines become modifiers: a
/// horizontal line low in a cell underlines it, anything else crosses it
/// out.
pub struct CellRenderer<'a> {
    buffer: &'a mut Buffer,
    area: Area,
    cell_width: i32,
    cell_height: i32,
}

impl<'a> CellRenderer<'a> {
    pub fn new(buffer: &'a mut Buffer, area: Area, cell_width: u32, cell_height: u32) -> Self {
        Self {
            buffer,
            area,
            cell_width: i32::try_from(cell_width.max(1)).unwrap_or(i32::MAX),
            cell_height: i32::try_from(cell_height.max(1)).unwrap_or(i32::MAX),
        }
    }

    /// Cells whose centers fall inside `[start, end)` along one axis.
    fn covered(start: i32, end: i32, size: i32) -> Range<i32> {
        let half = size / 2;
        let first = (start - half + size - 1).div_euclid(size);
        let last = (end - half + size - 1).div_euclid(size);
        first..last
    }

    fn with_cell(&mut self, column: i32, row: i32, f: impl FnOnce(&mut ratatui::buffer::Cell)) {
        let (Ok(column), Ok(row)) = (u16::try_from(column), u16::try_from(row)) else {
            return;
        };
        if column >= self.area.width || row >= self.area.height {
            return;
        }
        if let Some(cell) = self
            .buffer
            .cell_mut((self.area.x + column, self.area.y + row))
        {
            f(cell);
        }
    }

    fn modify_span(&mut self, columns: Range<i32>, row: i32, modifier: Modifier) {
        for column in columns {
            self.with_cell(column, row, |cell| {
                cell.set_style(Style::default().add_modifier(modifier));
            });
        }
    }
}

impl Renderer for CellRenderer<'_> {
    fn draw_text(&mut self, text: &str, _font: &Font, color: ColorRef, at: Point) {
        let row = at.y.div_euclid(self.cell_height);
        let start = at.x.div_euclid(self.cell_width);
        let fg = to_color(color);
        for (offset, ch) in (0..).zip(text.chars()) {
            self.with_cell(start + offset, row, |cell| {
                cell.set_char(ch).set_fg(fg);
            });
        }
    }

    fn draw_line(&mut self, _color: ColorRef, from: Point, to: Point) {
        let (left, right) = (from.x.min(to.x), from.x.max(to.x));
        let columns = Self::covered(left, right + 1, self.cell_width);

        if from.y == to.y {
            let row = (from.y - self.cell_height / 2).div_euclid(self.cell_height);
            let offset = from.y - row * self.cell_height;
            let modifier = if offset * 4 >= self.cell_height * 3 {
                Modifier::UNDERLINED
            } else {
                Modifier::CROSSED_OUT
            };
            self.modify_span(columns, row, modifier);
        } else {
            let row = ((from.y + to.y) / 2).div_euclid(self.cell_height);
            self.modify_span(columns, row, Modifier::CROSSED_OUT);
        }
    }

    fn draw_ellipse(&mut self, _color: ColorRef, bounds: Rect) {
        let columns = Self::covered(bounds.x, bounds.right(), self.cell_width);
        for row in Self::covered(bounds.y, bounds.bottom(), self.cell_height) {
            self.modify_span(columns.clone(), row, Modifier::REVERSED);
        }
    }

    fn fill_rect(&mut self, color: ColorRef, rect: Rect) {
        let bg = to_color(color);
        let columns = Self::covered(rect.x, rect.right(), self.cell_width);
        for row in Self::covered(rect.y, rect.bottom(), self.cell_height) {
            for column in columns.clone() {
                self.with_cell(column, row, |cell| {
                    cell.reset();
                    cell.set_bg(bg);
                });
            }
        }
    }
}
