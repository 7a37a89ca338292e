// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! Colors and decorative text styles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// An RGB color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRef {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRef {
    pub const BLACK: ColorRef = ColorRef::rgb(0, 0, 0);
    pub const WHITE: ColorRef = ColorRef::rgb(255, 255, 255);
    pub const GRAY: ColorRef = ColorRef::rgb(128, 128, 128);
    pub const RED: ColorRef = ColorRef::rgb(255, 0, 0);
    pub const GREEN: ColorRef = ColorRef::rgb(0, 128, 0);
    pub const LIME: ColorRef = ColorRef::rgb(0, 255, 0);
    pub const YELLOW: ColorRef = ColorRef::rgb(255, 255, 0);
    pub const CYAN: ColorRef = ColorRef::rgb(0, 255, 255);
    pub const MAGENTA: ColorRef = ColorRef::rgb(255, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "gray" | "grey" => Self::GRAY,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "lime" => Self::LIME,
            "yellow" => Self::YELLOW,
            "cyan" => Self::CYAN,
            "magenta" => Self::MAGENTA,
            _ => return None,
        };
        Some(color)
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for ColorRef {
    type Err = Error;

    /// Accepts `#rrggbb` or one of the named constants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(Error::InvalidColor(s.to_string()));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
            };
            return Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }
        Self::named(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for ColorRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Decoration drawn over a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleKind {
    #[default]
    None,
    StrikeOut,
    Underlined,
    Circled,
    Cross,
}

impl StyleKind {
    pub const ALL: [StyleKind; 5] = [
        StyleKind::None,
        StyleKind::StrikeOut,
        StyleKind::Underlined,
        StyleKind::Circled,
        StyleKind::Cross,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::None => "none",
            StyleKind::StrikeOut => "strikeout",
            StyleKind::Underlined => "underlined",
            StyleKind::Circled => "circled",
            StyleKind::Cross => "cross",
        }
    }
}

/// Colors used by the view. Every field can be overridden from the config
/// file under `[palette]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: ColorRef,
    pub text: ColorRef,
    pub prompt_info: ColorRef,
    pub prompt: ColorRef,
    pub cursor: ColorRef,
    pub select_cursor: ColorRef,
    pub suggestion_menu: ColorRef,
    pub suggestion_text: ColorRef,
    pub suggestion_cursor: ColorRef,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: ColorRef::BLACK,
            text: ColorRef::LIME,
            prompt_info: ColorRef::GRAY,
            prompt: ColorRef::MAGENTA,
            cursor: ColorRef::LIME,
            select_cursor: ColorRef::LIME,
            suggestion_menu: ColorRef::GREEN,
            suggestion_text: ColorRef::GRAY,
            suggestion_cursor: ColorRef::MAGENTA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_and_named() {
        assert_eq!("#ff00ff".parse::<ColorRef>().unwrap(), ColorRef::MAGENTA);
        assert_eq!("#00FF00".parse::<ColorRef>().unwrap(), ColorRef::LIME);
        assert_eq!("Gray".parse::<ColorRef>().unwrap(), ColorRef::GRAY);
        assert_eq!(ColorRef::rgb(1, 2, 171).to_string(), "#0102ab");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#12345".parse::<ColorRef>().is_err());
        assert!("#gg0000".parse::<ColorRef>().is_err());
        assert!("#ééé".parse::<ColorRef>().is_err());
        assert!("chartreuse".parse::<ColorRef>().is_err());
    }
}
