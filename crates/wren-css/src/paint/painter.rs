//! Painter - generates display list from layout tree
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The painter walks the box tree in pre-order. Block boxes paint nothing
//! themselves; inline boxes paint their background and then their words.

use wren_dom::DomTree;

use crate::layout::{DocumentBox, LayoutBox, LayoutMode};
use crate::style::ComputedStyle;

use super::{DisplayCommand, DisplayList};

/// Painter that generates a display list from a box tree.
pub struct Painter<'a> {
    /// The styled tree, used for background colors.
    tree: &'a DomTree,
}

impl<'a> Painter<'a> {
    /// Create a new painter with access to resolved styles.
    #[must_use]
    pub const fn new(tree: &'a DomTree) -> Self {
        Self { tree }
    }

    /// Paint a laid-out document and return the display list.
    #[must_use]
    pub fn paint(&self, document: &DocumentBox) -> DisplayList {
        let mut display_list = DisplayList::new();
        self.paint_box(&document.child, &mut display_list);
        log::debug!(
            target: "wren::paint",
            "painted {} display commands",
            display_list.len()
        );
        display_list
    }

    fn paint_box(&self, layout_box: &LayoutBox, display_list: &mut DisplayList) {
        if layout_box.mode == LayoutMode::Inline {
            // [CSS 2.1 Appendix E.2 Step 2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
            // "the background color of the element"
            if let Some(style) = self.tree.style(layout_box.node)
                && let Some(color) = ComputedStyle::new(style).background_color()
            {
                let rect = layout_box.rect;
                display_list.push(DisplayCommand::DrawRect {
                    top: rect.y,
                    left: rect.x,
                    bottom: rect.bottom(),
                    right: rect.right(),
                    color,
                });
            }

            // [CSS 2.1 Appendix E.2 Step 7](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
            // "the element's text"
            for fragment in &layout_box.fragments {
                display_list.push(DisplayCommand::DrawText {
                    top: fragment.y,
                    left: fragment.x,
                    bottom: fragment.y + fragment.height,
                    right: fragment.x + fragment.width,
                    text: fragment.text.clone(),
                    font: fragment.font,
                    color: fragment.color,
                });
            }
        }

        for child in &layout_box.children {
            self.paint_box(child, display_list);
        }
    }
}
