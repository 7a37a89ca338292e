// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! Drawing surface abstraction.
//!
//! The view paints in pixel coordinates through [`Renderer`]. Hosts map the
//! primitives onto whatever surface they own; [`CommandList`] records them so
//! a frame can be inspected or replayed.

use serde::Deserialize;

use crate::style::{ColorRef, StyleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }
}

/// Font used for all text. Hosts that draw on a character grid ignore it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Courier New".to_string(),
            size: 12.0,
        }
    }
}

pub trait Renderer {
    fn draw_text(&mut self, text: &str, font: &Font, color: ColorRef, at: Point);
    fn draw_line(&mut self, color: ColorRef, from: Point, to: Point);
    fn draw_ellipse(&mut self, color: ColorRef, bounds: Rect);
    fn fill_rect(&mut self, color: ColorRef, rect: Rect);
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        text: String,
        color: ColorRef,
        at: Point,
    },
    Line {
        color: ColorRef,
        from: Point,
        to: Point,
    },
    Ellipse {
        color: ColorRef,
        bounds: Rect,
    },
    FillRect {
        color: ColorRef,
        rect: Rect,
    },
}

/// A [`Renderer`] that records every primitive in order.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every recorded text command, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Position of the first text command whose text is `text`.
    pub fn position_of_text(&self, text: &str) -> Option<Point> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Text { text: t, at, .. } if t == text => Some(*at),
            _ => None,
        })
    }

    /// Replay the recorded frame onto another renderer.
    pub fn replay(&self, font: &Font, target: &mut dyn Renderer) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Text { text, color, at } => target.draw_text(text, font, *color, *at),
                DrawCommand::Line { color, from, to } => target.draw_line(*color, *from, *to),
                DrawCommand::Ellipse { color, bounds } => target.draw_ellipse(*color, *bounds),
                DrawCommand::FillRect { color, rect } => target.fill_rect(*color, *rect),
            }
        }
    }
}

impl Renderer for CommandList {
    fn draw_text(&mut self, text: &str, _font: &Font, color: ColorRef, at: Point) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            color,
            at,
        });
    }

    fn draw_line(&mut self, color: ColorRef, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line { color, from, to });
    }

    fn draw_ellipse(&mut self, color: ColorRef, bounds: Rect) {
        self.commands.push(DrawCommand::Ellipse { color, bounds });
    }

    fn fill_rect(&mut self, color: ColorRef, rect: Rect) {
        self.commands.push(DrawCommand::FillRect { color, rect });
    }
}

/// Draw the decoration for `style` over text starting at `origin` and
/// `width` pixels wide.
pub fn draw_style(
    renderer: &mut dyn Renderer,
    style: StyleKind,
    color: ColorRef,
    origin: Point,
    width: u32,
) {
    let w = i32::try_from(width).unwrap_or(i32::MAX);
    match style {
        StyleKind::None => {}
        StyleKind::StrikeOut => {
            let y = origin.y + 8;
            renderer.draw_line(
                color,
                Point::new(origin.x + 3, y),
                Point::new(origin.x + w - 3, y),
            );
        }
        StyleKind::Underlined => {
            let y = origin.y + 16;
            renderer.draw_line(
                color,
                Point::new(origin.x + 3, y),
                Point::new(origin.x + w - 3, y),
            );
        }
        StyleKind::Circled => {
            renderer.draw_ellipse(color, Rect::new(origin.x + 3, origin.y + 3, width, 12));
        }
        StyleKind::Cross => {
            let left = origin.x + 3;
            let top = origin.y + 3;
            renderer.draw_line(
                color,
                Point::new(left, top),
                Point::new(left + w, top + 12),
            );
            renderer.draw_line(
                color,
                Point::new(left, top + 12),
                Point::new(left + w, top),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_style_draws_nothing() {
        let mut list = CommandList::new();
        draw_style(&mut list, StyleKind::None, ColorRef::RED, Point::new(0, 0), 50);
        assert!(list.commands().is_empty());
    }

    #[test]
    fn test_strike_and_underline_offsets() {
        let mut list = CommandList::new();
        draw_style(&mut list, StyleKind::StrikeOut, ColorRef::RED, Point::new(20, 24), 50);
        draw_style(&mut list, StyleKind::Underlined, ColorRef::RED, Point::new(20, 24), 50);
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Line {
                    color: ColorRef::RED,
                    from: Point::new(23, 32),
                    to: Point::new(67, 32),
                },
                DrawCommand::Line {
                    color: ColorRef::RED,
                    from: Point::new(23, 40),
                    to: Point::new(67, 40),
                },
            ]
        );
    }

    #[test]
    fn test_circle_and_cross() {
        let mut list = CommandList::new();
        draw_style(&mut list, StyleKind::Circled, ColorRef::CYAN, Point::new(0, 12), 40);
        draw_style(&mut list, StyleKind::Cross, ColorRef::CYAN, Point::new(0, 12), 40);
        assert_eq!(
            list.commands()[0],
            DrawCommand::Ellipse {
                color: ColorRef::CYAN,
                bounds: Rect::new(3, 15, 40, 12),
            }
        );
        assert_eq!(
            list.commands()[1..],
            [
                DrawCommand::Line {
                    color: ColorRef::CYAN,
                    from: Point::new(3, 15),
                    to: Point::new(43, 27),
                },
                DrawCommand::Line {
                    color: ColorRef::CYAN,
                    from: Point::new(3, 27),
                    to: Point::new(43, 15),
                },
            ]
        );
    }

    #[test]
    fn test_replay_copies_commands() {
        let mut list = CommandList::new();
        list.fill_rect(ColorRef::BLACK, Rect::new(0, 0, 10, 10));
        list.draw_text("hi", &Font::default(), ColorRef::LIME, Point::new(1, 2));

        let mut copy = CommandList::new();
        list.replay(&Font::default(), &mut copy);
        assert_eq!(copy.commands(), list.commands());
        assert_eq!(copy.texts(), vec!["hi"]);
        assert_eq!(copy.position_of_text("hi"), Some(Point::new(1, 2)));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(-5, 10, 20, 6);
        assert_eq!(rect.right(), 15);
        assert_eq!(rect.bottom(), 16);
    }
}
