// SPDX-License-Identifier: MIT
// Wrapped row layout and content height for the output buffer

use serde::Deserialize;

use crate::line::Line;

/// Pixel size of one character cell and the content height constants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CellMetrics {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Pixels per wrapped row when sizing the scroll range.
    pub row_height_factor: f64,
    /// Extra pixels added below the last row when sizing the scroll range.
    pub height_padding: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 10,
            cell_height: 12,
            row_height_factor: 12.32,
            height_padding: 20,
        }
    }
}

impl CellMetrics {
    /// Number of cells that fit in one row. Never zero, so a viewport
    /// narrower than one cell still makes progress.
    pub fn chars_per_row(&self, viewport_width: u32) -> usize {
        (viewport_width / self.cell_width.max(1)).max(1) as usize
    }

    /// Height of the scrollable content for `rows` wrapped rows.
    pub fn content_height(&self, rows: usize) -> u32 {
        let height = (rows as f64 * self.row_height_factor).round();
        (height.clamp(0.0, u32::MAX as f64) as u32).saturating_add(self.height_padding)
    }
}

/// A piece of one line wrapped onto a row. Offsets are in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Row relative to the first row of the line.
    pub row: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

/// Wrap cursor for a single logical line.
///
/// Text is poured in segment by segment. A segment that does not fit in the
/// rest of the row fills it and continues on the next row; a row that is
/// exactly full only breaks when more text arrives.
#[derive(Debug, Clone)]
pub struct LineFlow {
    chars_per_row: usize,
    row: usize,
    column: usize,
}

impl LineFlow {
    pub fn new(chars_per_row: usize) -> Self {
        Self {
            chars_per_row: chars_per_row.max(1),
            row: 0,
            column: 0,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Rows used so far, counting the current one.
    pub fn rows_used(&self) -> usize {
        self.row + 1
    }

    /// Pour `len` characters and return the non-empty pieces.
    pub fn place(&mut self, len: usize) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut start = 0;
        loop {
            let room = self.chars_per_row - self.column;
            let remaining = len - start;
            if remaining <= room {
                if remaining > 0 {
                    spans.push(Span {
                        row: self.row,
                        column: self.column,
                        start,
                        end: len,
                    });
                }
                self.column += remaining;
                return spans;
            }
            if room > 0 {
                spans.push(Span {
                    row: self.row,
                    column: self.column,
                    start,
                    end: start + room,
                });
            }
            start += room;
            self.row += 1;
            self.column = 0;
        }
    }
}

/// Row and column of character `index` in a line laid out at
/// `chars_per_row`. The position one past a full row lands at the start of
/// the next row.
pub fn cell_of(index: usize, chars_per_row: usize) -> (usize, usize) {
    let n = chars_per_row.max(1);
    (index / n, index % n)
}

/// Rows a line of `len` characters wraps into. A blank line still takes one.
pub fn line_row_count(len: usize, chars_per_row: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(chars_per_row.max(1))
    }
}

/// Running wrapped-row total of a buffer at one row width.
///
/// Appending a line or extending the last one adjusts the total without
/// walking the buffer; only a change of row width recounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTally {
    chars_per_row: usize,
    rows: usize,
}

impl RowTally {
    pub fn count(lines: &[Line], chars_per_row: usize) -> Self {
        let chars_per_row = chars_per_row.max(1);
        Self {
            chars_per_row,
            rows: lines
                .iter()
                .map(|line| line_row_count(line.len(), chars_per_row))
                .sum(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn chars_per_row(&self) -> usize {
        self.chars_per_row
    }

    pub fn push(&mut self, line: &Line) {
        self.rows += line_row_count(line.len(), self.chars_per_row);
    }

    /// The last line grew from `before` characters to `line`.
    pub fn replace_last(&mut self, before: usize, line: &Line) {
        let old = line_row_count(before, self.chars_per_row);
        self.rows = self.rows.saturating_sub(old) + line_row_count(line.len(), self.chars_per_row);
    }

    pub fn clear(&mut self) {
        self.rows = 0;
    }
}

/// One segment slice placed on a visual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub segment: usize,
    pub start: usize,
    pub end: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRow {
    /// Index of the logical line this row belongs to.
    pub line: usize,
    pub placements: Vec<Placement>,
}

impl VisualRow {
    fn new(line: usize) -> Self {
        Self {
            line,
            placements: Vec::new(),
        }
    }
}

/// The buffer wrapped at one viewport width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<VisualRow>,
}

impl Layout {
    pub fn compute(lines: &[Line], viewport_width: u32, metrics: CellMetrics) -> Self {
        let chars_per_row = metrics.chars_per_row(viewport_width);
        let mut rows = Vec::new();

        for (line_idx, line) in lines.iter().enumerate() {
            let mut flow = LineFlow::new(chars_per_row);
            let mut line_rows = vec![VisualRow::new(line_idx)];
            for (seg_idx, segment) in line.segments().iter().enumerate() {
                for span in flow.place(segment.len()) {
                    while line_rows.len() <= span.row {
                        line_rows.push(VisualRow::new(line_idx));
                    }
                    line_rows[span.row].placements.push(Placement {
                        segment: seg_idx,
                        start: span.start,
                        end: span.end,
                        column: span.column,
                    });
                }
            }
            while line_rows.len() < flow.rows_used() {
                line_rows.push(VisualRow::new(line_idx));
            }
            rows.extend(line_rows);
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[VisualRow] {
        &self.rows
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::TextSegment;
    use crate::style::ColorRef;

    fn plain(text: &str) -> Line {
        Line::from_segment(TextSegment::new(text, ColorRef::LIME))
    }

    #[test]
    fn test_chars_per_row() {
        let metrics = CellMetrics::default();
        assert_eq!(metrics.chars_per_row(300), 30);
        assert_eq!(metrics.chars_per_row(309), 30);
        assert_eq!(metrics.chars_per_row(5), 1);
        assert_eq!(metrics.chars_per_row(0), 1);
    }

    #[test]
    fn test_long_line_wraps_into_three_rows() {
        let line = plain(&"x".repeat(65));
        let layout = Layout::compute(&[line], 300, CellMetrics::default());

        assert_eq!(layout.rows().len(), 3);
        let lens: Vec<usize> = layout
            .rows()
            .iter()
            .map(|row| row.placements.iter().map(|p| p.end - p.start).sum())
            .collect();
        assert_eq!(lens, vec![30, 30, 5]);
        // round(3 * 12.32) + 20
        assert_eq!(CellMetrics::default().content_height(layout.rows().len()), 57);
    }

    #[test]
    fn test_exactly_full_row_does_not_add_row() {
        let layout = Layout::compute(&[plain(&"y".repeat(60))], 300, CellMetrics::default());
        assert_eq!(layout.rows().len(), 2);
    }

    #[test]
    fn test_segments_continue_on_same_row() {
        let mut line = Line::new();
        line.push("abcdefgh", ColorRef::GRAY); // 8
        line.push("1234", ColorRef::MAGENTA); // 4, wraps after 2
        let layout = Layout::compute(&[line], 100, CellMetrics::default());

        assert_eq!(layout.rows().len(), 2);
        assert_eq!(
            layout.rows()[0].placements,
            vec![
                Placement {
                    segment: 0,
                    start: 0,
                    end: 8,
                    column: 0
                },
                Placement {
                    segment: 1,
                    start: 0,
                    end: 2,
                    column: 8
                },
            ]
        );
        assert_eq!(
            layout.rows()[1].placements,
            vec![Placement {
                segment: 1,
                start: 2,
                end: 4,
                column: 0
            }]
        );
    }

    #[test]
    fn test_segment_after_full_row_starts_next_row() {
        let mut line = Line::new();
        line.push("0123456789", ColorRef::GRAY);
        line.push("ab", ColorRef::GRAY);
        let layout = Layout::compute(&[line], 100, CellMetrics::default());

        assert_eq!(layout.rows().len(), 2);
        assert_eq!(layout.rows()[1].placements[0].column, 0);
        assert_eq!(layout.rows()[1].placements[0].segment, 1);
    }

    #[test]
    fn test_empty_segment_after_full_row_adds_nothing() {
        let mut line = Line::new();
        line.push("0123456789", ColorRef::GRAY);
        line.push("", ColorRef::GRAY);
        let layout = Layout::compute(&[line], 100, CellMetrics::default());
        assert_eq!(layout.rows().len(), 1);
    }

    #[test]
    fn test_blank_line_takes_one_row() {
        let lines = vec![plain("above"), plain(""), plain("below")];
        let layout = Layout::compute(&lines, 300, CellMetrics::default());

        assert_eq!(layout.rows().len(), 3);
        assert!(layout.rows()[1].placements.is_empty());
        assert_eq!(layout.rows()[1].line, 1);
        assert_eq!(layout.rows()[2].line, 2);
    }

    #[test]
    fn test_rows_per_line_match_ceiling_rule() {
        let metrics = CellMetrics::default();
        for len in 0..100 {
            let layout = Layout::compute(&[plain(&"z".repeat(len))], 300, metrics);
            let expected = if len == 0 { 1 } else { len.div_ceil(30) };
            assert_eq!(layout.rows().len(), expected, "len {len}");
            assert_eq!(line_row_count(len, 30), expected, "len {len}");
        }
    }

    fn mixed_buffer() -> Vec<Line> {
        let mut styled = Line::new();
        styled.push("0123456789", ColorRef::GRAY);
        styled.push("", ColorRef::GRAY);
        styled.push("abcdefghijklmnopqrstuvwxyz", ColorRef::MAGENTA);
        let mut tail = Line::new();
        tail.push("", ColorRef::GRAY);
        tail.push("héllo", ColorRef::LIME);
        vec![
            plain(""),
            plain(&"x".repeat(30)),
            plain(&"x".repeat(31)),
            styled,
            Line::new(),
            tail,
            plain(&"w".repeat(95)),
        ]
    }

    #[test]
    fn test_row_tally_matches_layout() {
        let metrics = CellMetrics::default();
        let lines = mixed_buffer();
        for width in [0, 10, 55, 100, 300, 1000] {
            let layout = Layout::compute(&lines, width, metrics);
            let tally = RowTally::count(&lines, metrics.chars_per_row(width));
            assert_eq!(tally.rows(), layout.rows().len(), "width {width}");
        }
    }

    #[test]
    fn test_row_tally_follows_appends() {
        let metrics = CellMetrics::default();
        let mut lines: Vec<Line> = Vec::new();
        let mut tally = RowTally::count(&lines, metrics.chars_per_row(100));

        for line in mixed_buffer() {
            tally.push(&line);
            lines.push(line);
            assert_eq!(tally.rows(), Layout::compute(&lines, 100, metrics).rows().len());
        }

        let last = lines.len() - 1;
        let before = lines[last].len();
        lines[last].push("more text that spills onto another row", ColorRef::RED);
        tally.replace_last(before, &lines[last]);
        assert_eq!(tally.rows(), Layout::compute(&lines, 100, metrics).rows().len());

        tally.clear();
        assert_eq!(tally.rows(), 0);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut styled = Line::new();
        styled.push("prompt> ", ColorRef::GRAY);
        styled.push("some longer command text that wraps", ColorRef::MAGENTA);
        let lines = vec![plain("hello"), styled, plain("")];

        let first = Layout::compute(&lines, 170, CellMetrics::default());
        let second = Layout::compute(&lines, 170, CellMetrics::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_content_height_is_monotonic() {
        let metrics = CellMetrics::default();
        let mut prev = metrics.content_height(0);
        assert_eq!(prev, 20);
        for rows in 1..500 {
            let h = metrics.content_height(rows);
            assert!(h >= prev);
            prev = h;
        }
    }

    #[test]
    fn test_flow_and_cell_of_agree() {
        let mut flow = LineFlow::new(10);
        flow.place(7);
        assert_eq!((flow.row(), flow.column()), cell_of(7, 10));
        flow.place(5);
        assert_eq!((flow.row(), flow.column()), cell_of(12, 10));
        assert_eq!(cell_of(20, 10), (2, 0));
    }
}
