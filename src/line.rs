// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! Styled text model: segments, lines and the output buffer.
//!
//! Lengths are counted in characters, one character per grid cell.

use crate::style::{ColorRef, StyleKind};

/// A run of text sharing one color and one decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    text: String,
    color: ColorRef,
    style: StyleKind,
    style_color: ColorRef,
}

impl TextSegment {
    pub fn new(text: impl Into<String>, color: ColorRef) -> Self {
        Self {
            text: text.into(),
            color,
            style: StyleKind::None,
            style_color: color,
        }
    }

    pub fn styled(
        text: impl Into<String>,
        color: ColorRef,
        style: StyleKind,
        style_color: ColorRef,
    ) -> Self {
        Self {
            text: text.into(),
            color,
            style,
            style_color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> ColorRef {
        self.color
    }

    pub fn style(&self) -> StyleKind {
        self.style
    }

    pub fn style_color(&self) -> ColorRef {
        self.style_color
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Characters `start..end` of the text, clamped to its length.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        char_slice(&self.text, start, end)
    }
}

/// Substring by character positions, clamped to the string.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |idx: usize| {
        text.char_indices()
            .nth(idx)
            .map(|(byte, _)| byte)
            .unwrap_or(text.len())
    };
    let from = byte_at(start);
    let to = byte_at(end.max(start));
    &text[from..to]
}

/// One logical row of output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    segments: Vec<TextSegment>,
    /// Characters across all segments.
    len: usize,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segment(segment: TextSegment) -> Self {
        Self {
            len: segment.len(),
            segments: vec![segment],
        }
    }

    pub fn push_segment(&mut self, segment: TextSegment) {
        self.len += segment.len();
        self.segments.push(segment);
    }

    pub fn push(&mut self, text: impl Into<String>, color: ColorRef) {
        self.push_segment(TextSegment::new(text, color));
    }

    pub fn push_styled(
        &mut self,
        text: impl Into<String>,
        color: ColorRef,
        style: StyleKind,
        style_color: ColorRef,
    ) {
        self.push_segment(TextSegment::styled(text, color, style, style_color));
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    /// Sum of the segment lengths.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(TextSegment::is_empty)
    }

    pub fn full_text(&self) -> String {
        self.segments.iter().map(TextSegment::text).collect()
    }
}

/// Append-only list of lines owned by the view.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    lines: Vec<Line>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Append a segment to the last line, or start the first line if the
    /// buffer is empty.
    pub fn append_to_last(&mut self, segment: TextSegment) {
        match self.lines.last_mut() {
            Some(line) => line.push_segment(segment),
            None => self.lines.push(Line::from_segment(segment)),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn last(&self) -> Option<&Line> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length_counts_chars() {
        let mut line = Line::new();
        line.push("héllo", ColorRef::LIME);
        line.push("", ColorRef::GRAY);
        line.push_styled(" wörld", ColorRef::RED, StyleKind::Underlined, ColorRef::WHITE);

        assert_eq!(line.len(), 11);
        assert_eq!(line.full_text(), "héllo wörld");
        assert_eq!(line.segments().len(), 3);
        assert_eq!(line.segments()[2].style(), StyleKind::Underlined);
        assert_eq!(line.segments()[2].style_color(), ColorRef::WHITE);
    }

    #[test]
    fn test_plain_segment_has_no_style() {
        let seg = TextSegment::new("x", ColorRef::CYAN);
        assert_eq!(seg.style(), StyleKind::None);
        assert_eq!(seg.style_color(), ColorRef::CYAN);
    }

    #[test]
    fn test_append_to_last_starts_line_when_empty() {
        let mut buffer = Buffer::new();
        buffer.append_to_last(TextSegment::new("first", ColorRef::LIME));
        assert_eq!(buffer.len(), 1);

        buffer.append_to_last(TextSegment::new(" more", ColorRef::GRAY));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.last().map(Line::full_text).as_deref(), Some("first more"));

        buffer.push_line(Line::from_segment(TextSegment::new("second", ColorRef::LIME)));
        buffer.append_to_last(TextSegment::new("!", ColorRef::LIME));
        assert_eq!(buffer.lines()[0].full_text(), "first more");
        assert_eq!(buffer.lines()[1].full_text(), "second!");
    }

    #[test]
    fn test_slice_by_chars() {
        let seg = TextSegment::new("añbc", ColorRef::LIME);
        assert_eq!(seg.slice(1, 3), "ñb");
        assert_eq!(seg.slice(2, 10), "bc");
        assert_eq!(seg.slice(5, 9), "");
        assert_eq!(char_slice("abc", 2, 1), "");
    }

    #[test]
    fn test_clear() {
        let mut buffer = Buffer::new();
        buffer.push_line(Line::new());
        buffer.push_line(Line::new());
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_empty_segments_make_empty_line() {
        let line = Line::from_segment(TextSegment::new("", ColorRef::LIME));
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
    }
}
