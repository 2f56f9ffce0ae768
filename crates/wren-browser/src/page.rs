//! Scroll state over a rendered display list.
//!
//! The display list is laid out in page coordinates. A [`Page`] tracks how
//! far the viewport has been scrolled and hands out only the commands that
//! fall inside it.

use wren_css::{DisplayCommand, DisplayList, LayoutOptions};

/// Distance moved by one scroll step, in pixels.
pub const SCROLL_STEP: f32 = 100.0;

/// A display list plus a vertical scroll offset.
#[derive(Debug, Clone)]
pub struct Page {
    display_list: DisplayList,
    document_height: f32,
    options: LayoutOptions,
    scroll: f32,
}

impl Page {
    /// Create a page scrolled to the top.
    #[must_use]
    pub const fn new(display_list: DisplayList, document_height: f32, options: LayoutOptions) -> Self {
        Self {
            display_list,
            document_height,
            options,
            scroll: 0.0,
        }
    }

    /// The current scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> f32 {
        self.scroll
    }

    /// The furthest the page can scroll: the content height plus both
    /// vertical margins, less one viewport.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        (self.document_height + 2.0 * self.options.margin_y - self.options.viewport_height)
            .max(0.0)
    }

    /// Scroll to `offset`, clamped to the scrollable range.
    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll = offset.clamp(0.0, self.max_scroll());
    }

    /// Scroll down one step.
    pub fn scroll_down(&mut self) {
        self.set_scroll(self.scroll + SCROLL_STEP);
    }

    /// Scroll up one step.
    pub fn scroll_up(&mut self) {
        self.set_scroll(self.scroll - SCROLL_STEP);
    }

    /// Commands that overlap the viewport at the current scroll offset.
    #[must_use]
    pub fn visible_commands(&self) -> Vec<&DisplayCommand> {
        self.display_list
            .iter()
            .filter(|command| command.is_visible(self.scroll, self.options.viewport_height))
            .collect()
    }

    /// Every command, visible or not.
    #[must_use]
    pub const fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    /// Height of the laid-out content.
    #[must_use]
    pub const fn document_height(&self) -> f32 {
        self.document_height
    }

    /// The viewport and margins.
    #[must_use]
    pub const fn options(&self) -> &LayoutOptions {
        &self.options
    }
}
