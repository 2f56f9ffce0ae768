//! Box tree and the layout pass.
//!
//! [§ 9.4 Normal flow](https://www.w3.org/TR/CSS2/visuren.html#normal-flow)
//!
//! "Boxes in the normal flow belong to a formatting context, which may be
//! block or inline, but not both simultaneously."
//!
//! Layout is a single recursive pass per box: position and width flow down
//! from the parent, height flows back up from the children (block mode) or
//! from the lines of text (inline mode).

use std::fmt::Write as _;

use serde::Serialize;
use strum_macros::{Display, EnumString};
use wren_dom::{DomTree, NodeId, NodeKind};

use super::inline::{FontMetrics, LineBuilder, WordFragment};
use super::{LayoutOptions, Rect, is_block_element, is_hidden_element};
use crate::style::ComputedStyle;

/// How a box arranges its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Child boxes stacked vertically.
    Block,
    /// Text broken into lines.
    Inline,
}

impl LayoutMode {
    /// Decide the mode of the box for `node` from the markup structure.
    ///
    /// Text is inline. An element with a block-level element child is block.
    /// Any other element with children is inline. A childless element is
    /// block (and empty).
    #[must_use]
    pub fn of(tree: &DomTree, node: NodeId) -> Self {
        if tree.as_text(node).is_some() {
            return Self::Inline;
        }
        let children = tree.children(node);
        let has_block_child = children
            .iter()
            .any(|&child| tree.tag_name(child).is_some_and(is_block_element));
        if has_block_child || children.is_empty() {
            Self::Block
        } else {
            Self::Inline
        }
    }
}

/// A box wrapping one markup node.
///
/// Geometry is only meaningful after [`LayoutBox::layout`].
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// The markup node this box was generated for.
    pub node: NodeId,
    /// Block or inline.
    pub mode: LayoutMode,
    /// Absolute position and size.
    pub rect: Rect,
    /// Child boxes, for block mode. Always empty in inline mode.
    pub children: Vec<LayoutBox>,
    /// Positioned words, for inline mode. Always empty in block mode.
    pub fragments: Vec<WordFragment>,
}

impl LayoutBox {
    /// Create an unpositioned box for `node`.
    #[must_use]
    pub fn new(tree: &DomTree, node: NodeId) -> Self {
        Self {
            node,
            mode: LayoutMode::of(tree, node),
            rect: Rect::default(),
            children: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// Lay out this box at (`x`, `y`) with the given width, then its
    /// descendants. Rebuilds children and fragments from scratch.
    pub fn layout(&mut self, tree: &DomTree, fonts: &dyn FontMetrics, x: f32, y: f32, width: f32) {
        self.rect = Rect {
            x,
            y,
            width,
            height: 0.0,
        };
        self.children.clear();
        self.fragments.clear();

        #[cfg(feature = "layout-trace")]
        log::trace!(
            target: "wren::layout",
            "{} box for {:?} at ({x}, {y}) width {width}",
            self.mode,
            tree.tag_name(self.node).unwrap_or("#text")
        );

        match self.mode {
            LayoutMode::Block => {
                self.children = tree
                    .children(self.node)
                    .iter()
                    .filter(|&&child| !is_hidden(tree, child))
                    .map(|&child| Self::new(tree, child))
                    .collect();

                // Each child starts where the previous one ended.
                let mut cursor_y = y;
                for child in &mut self.children {
                    child.layout(tree, fonts, x, cursor_y, width);
                    cursor_y = child.rect.bottom();
                }
                self.rect.height = self.children.iter().map(|child| child.rect.height).sum();
            }
            LayoutMode::Inline => {
                let mut lines = LineBuilder::new(fonts, x, y, width);
                add_words(tree, self.node, &mut lines);
                let (fragments, height) = lines.finish();
                self.fragments = fragments;
                self.rect.height = height;
            }
        }
    }

    /// Visit this box and its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    fn describe(&self, tree: &DomTree, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        let label = tree
            .tag_name(self.node)
            .map_or_else(|| "#text".to_string(), |tag| format!("<{tag}>"));
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let _ = writeln!(
            out,
            "{indent}{} {label} x={x} y={y} w={width} h={height}",
            self.mode
        );
        for fragment in &self.fragments {
            let _ = writeln!(
                out,
                "{indent}  {:?} at ({}, {}) {}pt {} {}",
                fragment.text,
                fragment.x,
                fragment.y,
                fragment.font.size,
                fragment.font.weight,
                fragment.font.slant
            );
        }
        for child in &self.children {
            child.describe(tree, depth + 1, out);
        }
    }
}

/// The root of the box tree.
///
/// Owns exactly one box, wrapping the root markup node, placed inside the
/// page margins.
#[derive(Debug, Clone)]
pub struct DocumentBox {
    /// The content area: inside the margins, as tall as the content.
    pub rect: Rect,
    /// The box for the root element.
    pub child: LayoutBox,
    options: LayoutOptions,
}

impl DocumentBox {
    /// Create an unpositioned document box for `tree`.
    #[must_use]
    pub fn new(tree: &DomTree, options: &LayoutOptions) -> Self {
        Self {
            rect: Rect::default(),
            child: LayoutBox::new(tree, tree.root()),
            options: *options,
        }
    }

    /// Lay out the whole tree.
    pub fn layout(&mut self, tree: &DomTree, fonts: &dyn FontMetrics) {
        let x = self.options.margin_x;
        let y = self.options.margin_y;
        let width = self.options.content_width();
        self.child.layout(tree, fonts, x, y, width);
        self.rect = Rect {
            x,
            y,
            width,
            height: self.child.rect.height,
        };
        log::debug!(
            target: "wren::layout",
            "laid out document: {width}px wide, {}px tall",
            self.rect.height
        );
    }

    /// Height of the laid-out content.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rect.height
    }

    /// The options the box was created with.
    #[must_use]
    pub const fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Every box in pre-order, starting with the root element's.
    #[must_use]
    pub fn boxes(&self) -> Vec<&LayoutBox> {
        let mut boxes = Vec::new();
        self.child.walk(&mut |layout_box| boxes.push(layout_box));
        boxes
    }

    /// An indented text rendering of the box tree, one box per line.
    #[must_use]
    pub fn describe(&self, tree: &DomTree) -> String {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let mut out = format!("document x={x} y={y} w={width} h={height}\n");
        self.child.describe(tree, 1, &mut out);
        out
    }
}

fn is_hidden(tree: &DomTree, node: NodeId) -> bool {
    tree.tag_name(node).is_some_and(is_hidden_element)
}

/// Feed the words under `node` to the line builder in document order.
///
/// Each text node's words take their font and color from that node's
/// resolved style. `<br>` ends the current line.
fn add_words(tree: &DomTree, node: NodeId, lines: &mut LineBuilder<'_>) {
    let Some(data) = tree.get(node) else { return };
    match &data.kind {
        NodeKind::Text(text) => {
            let style = ComputedStyle::new(&data.style);
            let font = style.font_key();
            let color = style.color();
            for word in text.split_whitespace() {
                lines.push_word(word, font, color);
            }
        }
        NodeKind::Element(element) => {
            if element.tag_name == "br" {
                lines.flush();
            }
            for &child in &data.children {
                if !is_hidden(tree, child) {
                    add_words(tree, child, lines);
                }
            }
        }
    }
}
