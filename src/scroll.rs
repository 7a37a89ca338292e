// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! Vertical scrolling over the wrapped buffer.
//!
//! With a scrollbar attached ("bound" mode) the user can scroll back and the
//! view follows the scrollbar value. Without one the view always shows the
//! bottom of the content.

use tracing::trace;

/// State of the host scrollbar as last written by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollbarModel {
    pub min: u32,
    pub max: u32,
    /// Page size, the viewport height.
    pub large_change: u32,
    pub value: u32,
    pub enabled: bool,
}

impl ScrollbarModel {
    /// Largest value the user can reach.
    pub fn max_value(&self) -> u32 {
        self.max.saturating_sub(self.large_change)
    }
}

/// Why the scroll state is being recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recalc {
    /// Content changed: follow the bottom.
    MoveToEnd,
    /// Viewport changed size only: keep the user's position.
    Resize,
}

#[derive(Debug, Default)]
pub struct ScrollController {
    scrollbar: Option<ScrollbarModel>,
    shift: i32,
}

fn neg_px(value: u32) -> i32 {
    -i32::try_from(value).unwrap_or(i32::MAX)
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_scrollbar(&mut self) {
        if self.scrollbar.is_none() {
            self.scrollbar = Some(ScrollbarModel::default());
        }
    }

    pub fn detach_scrollbar(&mut self) {
        self.scrollbar = None;
    }

    pub fn scrollbar(&self) -> Option<&ScrollbarModel> {
        self.scrollbar.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.scrollbar.is_some()
    }

    /// Vertical pixel offset applied to the first row. Zero or negative.
    pub fn shift(&self) -> i32 {
        self.shift
    }

    pub fn recalculate(&mut self, content_height: u32, viewport_height: u32, recalc: Recalc) {
        match self.scrollbar.as_mut() {
            Some(bar) => {
                if viewport_height > content_height {
                    bar.enabled = false;
                    bar.value = 0;
                    self.shift = 0;
                } else {
                    bar.enabled = true;
                    bar.min = 0;
                    bar.max = content_height;
                    bar.large_change = viewport_height;
                    bar.value = match recalc {
                        Recalc::MoveToEnd => bar.max_value(),
                        Recalc::Resize => bar.value.min(bar.max_value()),
                    };
                    self.shift = neg_px(bar.value);
                }
            }
            None => {
                self.shift = if viewport_height < content_height {
                    neg_px(content_height - viewport_height)
                } else {
                    0
                };
            }
        }
        trace!(
            content_height,
            viewport_height,
            ?recalc,
            shift = self.shift,
            "scroll recalculated"
        );
    }

    /// Apply a user scroll to `position`. Returns false when there is no
    /// enabled scrollbar to move.
    pub fn scroll_to(&mut self, position: u32) -> bool {
        match self.scrollbar.as_mut() {
            Some(bar) if bar.enabled => {
                bar.value = position.min(bar.max_value());
                self.shift = neg_px(bar.value);
                true
            }
            _ => false,
        }
    }

    pub fn page_up(&mut self) -> bool {
        match self.scrollbar {
            Some(bar) => self.scroll_to(bar.value.saturating_sub(bar.large_change)),
            None => false,
        }
    }

    pub fn page_down(&mut self) -> bool {
        match self.scrollbar {
            Some(bar) => self.scroll_to(bar.value.saturating_add(bar.large_change)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound() -> ScrollController {
        let mut scroll = ScrollController::new();
        scroll.attach_scrollbar();
        scroll
    }

    #[test]
    fn test_bound_disables_when_content_fits() {
        let mut scroll = bound();
        scroll.recalculate(100, 300, Recalc::MoveToEnd);

        let bar = scroll.scrollbar().copied().unwrap();
        assert!(!bar.enabled);
        assert_eq!(scroll.shift(), 0);
    }

    #[test]
    fn test_bound_follows_bottom_on_content_change() {
        let mut scroll = bound();
        scroll.recalculate(1000, 300, Recalc::MoveToEnd);

        let bar = scroll.scrollbar().copied().unwrap();
        assert!(bar.enabled);
        assert_eq!(bar.min, 0);
        assert_eq!(bar.max, 1000);
        assert_eq!(bar.large_change, 300);
        assert_eq!(bar.value, 700);
        assert_eq!(scroll.shift(), -700);
    }

    #[test]
    fn test_bound_resize_keeps_position() {
        let mut scroll = bound();
        scroll.recalculate(1000, 300, Recalc::MoveToEnd);
        assert!(scroll.scroll_to(200));
        assert_eq!(scroll.shift(), -200);

        scroll.recalculate(1000, 400, Recalc::Resize);
        assert_eq!(scroll.scrollbar().unwrap().value, 200);
        assert_eq!(scroll.shift(), -200);

        // Position is pulled back into range when the viewport grows past it.
        scroll.recalculate(1000, 900, Recalc::Resize);
        assert_eq!(scroll.scrollbar().unwrap().value, 100);
        assert_eq!(scroll.shift(), -100);
    }

    #[test]
    fn test_content_change_after_scroll_back_jumps_to_end() {
        let mut scroll = bound();
        scroll.recalculate(1000, 300, Recalc::MoveToEnd);
        scroll.scroll_to(0);
        scroll.recalculate(1012, 300, Recalc::MoveToEnd);
        assert_eq!(scroll.shift(), -712);
    }

    #[test]
    fn test_scroll_to_clamps_to_scrollbar_range() {
        let mut scroll = bound();
        scroll.recalculate(1000, 300, Recalc::MoveToEnd);
        assert!(scroll.scroll_to(5000));
        assert_eq!(scroll.shift(), -700);
    }

    #[test]
    fn test_scroll_to_ignored_without_enabled_scrollbar() {
        let mut scroll = ScrollController::new();
        assert!(!scroll.scroll_to(10));

        let mut scroll = bound();
        scroll.recalculate(10, 300, Recalc::MoveToEnd);
        assert!(!scroll.scroll_to(10));
        assert_eq!(scroll.shift(), 0);
    }

    #[test]
    fn test_unbound_anchors_bottom() {
        let mut scroll = ScrollController::new();
        scroll.recalculate(1000, 300, Recalc::MoveToEnd);
        assert_eq!(scroll.shift(), -700);

        scroll.recalculate(1000, 600, Recalc::Resize);
        assert_eq!(scroll.shift(), -400);

        scroll.recalculate(100, 600, Recalc::MoveToEnd);
        assert_eq!(scroll.shift(), 0);
    }

    #[test]
    fn test_paging() {
        let mut scroll = bound();
        scroll.recalculate(1000, 300, Recalc::MoveToEnd);

        assert!(scroll.page_up());
        assert_eq!(scroll.shift(), -400);
        assert!(scroll.page_up());
        assert!(scroll.page_up());
        assert_eq!(scroll.shift(), 0);
        assert!(scroll.page_down());
        assert_eq!(scroll.shift(), -300);
        assert!(scroll.page_down());
        assert!(scroll.page_down());
        assert_eq!(scroll.shift(), -700);
    }
}
