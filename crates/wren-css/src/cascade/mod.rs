//! Cascade and style resolution
//!
//! This module implements a reduced form of
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/).
//! Each node's resolved style is rebuilt from scratch from its parent's
//! resolved style, the matching rules, and its inline `style` attribute, and
//! written into the node in place.

use wren_dom::{DomTree, NodeId, StyleMap};

use crate::parser::{CSSParser, StyleRule};
use crate::style::{CssValue, DEFAULT_FONT_SIZE_PX, format_px, parse_px};

/// [§ 7.1 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
/// "Some properties are inherited from an ancestor element to its descendants."
///
/// The inherited properties and the values they take at the root.
pub const INHERITED_PROPERTIES: &[(&str, &str)] = &[
    ("font-size", "16px"),
    ("font-style", "normal"),
    ("font-weight", "normal"),
    ("color", "black"),
];

/// Order rules by ascending priority, keeping source order among rules of
/// equal priority.
pub fn sort_rules(rules: &mut [StyleRule]) {
    // `sort_by_key` is stable.
    rules.sort_by_key(StyleRule::priority);
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// Resolve the style of every node reachable from the root and store it in
/// the node's style map.
///
/// `rules` may be in any order; they are applied in ascending priority with
/// ties in the given order. Running this twice with the same rules yields
/// the same maps.
pub fn compute_styles(tree: &mut DomTree, rules: &[StyleRule]) {
    let mut ordered: Vec<&StyleRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority());

    // Pre-order, so a parent is resolved before its children read it.
    let order = tree.tree_to_list(tree.root());
    for &id in &order {
        let style = resolve_style(tree, id, &ordered);
        if let Some(node) = tree.get_mut(id) {
            node.style = style;
        }
    }

    log::debug!(
        target: "wren::css",
        "resolved styles for {} nodes with {} rules",
        order.len(),
        rules.len()
    );
}

/// Compute the resolved style of one node. The parent must already be
/// resolved.
fn resolve_style(tree: &DomTree, id: NodeId, rules: &[&StyleRule]) -> StyleMap {
    let parent_style = tree.parent(id).and_then(|parent| tree.style(parent));

    // [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    let mut style = StyleMap::new();
    for &(property, initial) in INHERITED_PROPERTIES {
        let value = parent_style
            .and_then(|parent| parent.get(property))
            .map_or(initial, String::as_str);
        let _ = style.insert(property.to_string(), value.to_string());
    }

    // [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
    for rule in rules.iter().filter(|rule| rule.selector.matches(tree, id)) {
        for (property, value) in &rule.declarations {
            let _ = style.insert(property.clone(), value.clone());
        }
    }

    // [CSS Style Attributes](https://www.w3.org/TR/css-style-attr/)
    // Declarations in the style attribute outrank every stylesheet rule.
    if let Some(inline) = tree.as_element(id).and_then(|element| element.attr("style")) {
        style.extend(CSSParser::new(inline).parse_declarations());
    }

    resolve_font_size(&mut style, parent_style);
    style
}

/// [§ 5.1.2 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
///
/// A percentage `font-size` is relative to the parent's font size. The root
/// resolves against the default.
fn resolve_font_size(style: &mut StyleMap, parent_style: Option<&StyleMap>) {
    let Some(CssValue::Percent(percent)) = style.get("font-size").map(|v| CssValue::parse(v))
    else {
        return;
    };
    let parent_px = parent_style
        .and_then(|parent| parent.get("font-size"))
        .and_then(|value| parse_px(value))
        .unwrap_or(DEFAULT_FONT_SIZE_PX);
    let _ = style.insert(
        "font-size".to_string(),
        format_px(parent_px * percent / 100.0),
    );
}
