//! Layout Engine
//!
//! Converts a styled markup tree into a box tree with absolute coordinates.
//! Two layout modes exist: block boxes stack their children vertically and
//! inline boxes break their text into lines.
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Rectangles
//! - [`inline`] - Font metrics, the font cache and line breaking
//! - [`layout_box`] - Document and block boxes and the layout pass

pub mod box_model;
pub mod inline;
pub mod layout_box;

// Re-exports for convenience
pub use box_model::Rect;
pub use inline::{
    ApproximateFontMetrics, FontCache, FontMetrics, LINE_LEADING, LineBuilder, LineMetrics,
    WordFragment,
};
pub use layout_box::{DocumentBox, LayoutBox, LayoutMode};

use serde::{Deserialize, Serialize};

/// Viewport and page margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Width of the viewport in pixels.
    pub viewport_width: f32,
    /// Height of the viewport in pixels. Used for scrolling, not layout.
    pub viewport_height: f32,
    /// Horizontal page margin on each side.
    pub margin_x: f32,
    /// Vertical page margin above the content.
    pub margin_y: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            margin_x: 13.0,
            margin_y: 18.0,
        }
    }
}

impl LayoutOptions {
    /// Width available to content after the horizontal margins.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        (self.viewport_width - 2.0 * self.margin_x).max(0.0)
    }
}

// [HTML Living Standard § 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
// Block-level elements by default.

/// Elements whose presence as a child puts the parent box in block mode.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "html",
    "body",
    "article",
    "section",
    "nav",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hgroup",
    "header",
    "footer",
    "address",
    "p",
    "hr",
    "pre",
    "blockquote",
    "ol",
    "ul",
    "menu",
    "li",
    "dl",
    "dt",
    "dd",
    "figure",
    "figcaption",
    "main",
    "div",
    "table",
    "form",
    "fieldset",
    "legend",
    "details",
    "summary",
];

/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
///
/// Elements that generate no boxes and contribute no words.
pub const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "title", "meta", "link", "base"];

/// Whether `tag` is in [`BLOCK_ELEMENTS`].
#[must_use]
pub fn is_block_element(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}

/// Whether `tag` is in [`HIDDEN_ELEMENTS`].
#[must_use]
pub fn is_hidden_element(tag: &str) -> bool {
    HIDDEN_ELEMENTS.contains(&tag)
}
