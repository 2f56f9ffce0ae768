//! Stylesheet parser, selector matching, cascade, layout and painting for the
//! Wren renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Stylesheet Parser** - a character-level recursive-descent parser for
//!   `selector { property: value; }` rules with local error recovery
//! - **Selectors** - tag and descendant selectors with an additive priority
//! - **Cascade** - inheritance, priority-ordered rule application, inline
//!   `style` overrides and percentage font sizes
//!   ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//! - **Layout** - block stacking and inline line breaking over a box tree
//! - **Paint** - flattening the box tree into a display list
//!
//! # Not Yet Implemented
//!
//! - Class, ID, attribute and pseudo-class selectors
//! - Lengths other than `px` and `%`
//! - Margins, padding, borders
//! - Floats, positioning, flex, grid, tables

/// Cascade and style resolution per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Box tree construction and line breaking.
pub mod layout;
/// Display list generation.
pub mod paint;
/// Stylesheet parser.
pub mod parser;
/// Selector matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Resolved style values: colors, fonts, lengths.
pub mod style;
/// User-agent stylesheet.
pub mod ua_stylesheet;

// Re-exports for convenience
pub use cascade::{compute_styles, sort_rules};
pub use layout::{
    ApproximateFontMetrics, DocumentBox, FontCache, FontMetrics, LayoutBox, LayoutMode,
    LayoutOptions, LineMetrics, Rect, WordFragment,
};
pub use paint::{DisplayCommand, DisplayList, Painter};
pub use parser::{CSSParser, CssParseError, DeclarationMap, StyleRule, Stylesheet};
pub use selector::Selector;
pub use style::{ColorValue, ComputedStyle, FontKey, FontSlant, FontWeight};
pub use ua_stylesheet::ua_stylesheet;

use wren_dom::{DomTree, NodeId};

/// Collect the text of every `<style>` element in document order.
///
/// Each element's text is followed by a newline so rules from separate
/// elements never run together.
#[must_use]
pub fn extract_style_content(tree: &DomTree) -> String {
    let mut css = String::new();
    for id in tree.iter_all() {
        if tree.tag_name(id) == Some("style") {
            collect_text(tree, id, &mut css);
        }
    }
    css
}

fn collect_text(tree: &DomTree, id: NodeId, css: &mut String) {
    for &child in tree.children(id) {
        if let Some(text) = tree.as_text(child) {
            css.push_str(text);
            css.push('\n');
        }
    }
}
