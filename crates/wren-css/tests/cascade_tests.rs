//! Integration tests for the cascade.

use wren_css::{Stylesheet, compute_styles, sort_rules, ua_stylesheet};
use wren_dom::{DomTree, NodeId};
use wren_html::parse_document;

/// Helper to parse markup and resolve styles against a stylesheet
fn styled(markup: &str, css: &str) -> DomTree {
    let mut tree = parse_document(markup);
    compute_styles(&mut tree, &Stylesheet::parse(css).rules);
    tree
}

/// Helper to find every element with the given tag, in document order
fn elements(tree: &DomTree, tag: &str) -> Vec<NodeId> {
    tree.iter_all()
        .filter(|&id| tree.tag_name(id) == Some(tag))
        .collect()
}

/// Helper to read one resolved property
fn prop<'a>(tree: &'a DomTree, id: NodeId, property: &str) -> Option<&'a str> {
    tree.style(id)
        .and_then(|style| style.get(property))
        .map(String::as_str)
}

#[test]
fn test_root_defaults() {
    let tree = styled("<p>x</p>", "");
    let root = tree.root();

    assert_eq!(prop(&tree, root, "font-size"), Some("16px"));
    assert_eq!(prop(&tree, root, "font-style"), Some("normal"));
    assert_eq!(prop(&tree, root, "font-weight"), Some("normal"));
    assert_eq!(prop(&tree, root, "color"), Some("black"));
}

#[test]
fn test_every_node_is_styled() {
    let tree = styled("<div><p>one <b>two</b></p></div>", "");
    for id in tree.iter_all() {
        assert_eq!(prop(&tree, id, "color"), Some("black"), "node {id:?}");
    }
}

#[test]
fn test_inherited_properties_flow_to_text() {
    let tree = styled("<div><p>x</p></div>", "div { color: red; font-weight: bold; }");
    let p = elements(&tree, "p")[0];
    let text = tree.children(p)[0];

    assert_eq!(prop(&tree, p, "color"), Some("red"));
    assert_eq!(prop(&tree, text, "color"), Some("red"));
    assert_eq!(prop(&tree, text, "font-weight"), Some("bold"));
}

#[test]
fn test_non_inherited_properties_stay_put() {
    let tree = styled("<div><p>x</p></div>", "div { background-color: yellow; }");
    let div = elements(&tree, "div")[0];
    let p = elements(&tree, "p")[0];

    assert_eq!(prop(&tree, div, "background-color"), Some("yellow"));
    assert_eq!(prop(&tree, p, "background-color"), None);
}

#[test]
fn test_descendant_rule_applies_only_to_nested() {
    let tree = styled("<div><p>x</p></div><p>y</p>", "div p { color: red; }");
    let ps = elements(&tree, "p");

    assert_eq!(prop(&tree, ps[0], "color"), Some("red"));
    assert_eq!(prop(&tree, ps[1], "color"), Some("black"));
}

#[test]
fn test_higher_priority_beats_source_order() {
    let tree = styled("<div><p>x</p></div>", "div p { color: red; } p { color: blue; }");
    let p = elements(&tree, "p")[0];
    assert_eq!(prop(&tree, p, "color"), Some("red"));
}

#[test]
fn test_equal_priority_later_rule_wins() {
    let tree = styled("<p>x</p>", "p { color: red; } p { color: blue; }");
    let p = elements(&tree, "p")[0];
    assert_eq!(prop(&tree, p, "color"), Some("blue"));
}

#[test]
fn test_inline_style_beats_rules() {
    let tree = styled(
        "<div><p style=\"color: green\">x</p></div>",
        "div p { color: red; }",
    );
    let p = elements(&tree, "p")[0];
    assert_eq!(prop(&tree, p, "color"), Some("green"));
}

#[test]
fn test_percent_font_size_uses_parent() {
    let tree = styled(
        "<div style=\"font-size: 20px\"><p style=\"font-size: 150%\">x</p></div>",
        "",
    );
    let p = elements(&tree, "p")[0];
    let text = tree.children(p)[0];

    assert_eq!(prop(&tree, p, "font-size"), Some("30.0px"));
    // Children inherit the resolved pixel value, not the percentage.
    assert_eq!(prop(&tree, text, "font-size"), Some("30.0px"));
}

#[test]
fn test_percent_font_size_compounds() {
    let tree = styled("<div><p>x</p></div>", "div { font-size: 50%; } p { font-size: 50%; }");
    let div = elements(&tree, "div")[0];
    let p = elements(&tree, "p")[0];

    assert_eq!(prop(&tree, div, "font-size"), Some("8.0px"));
    assert_eq!(prop(&tree, p, "font-size"), Some("4.0px"));
}

#[test]
fn test_root_percent_uses_default() {
    let tree = styled("<p>x</p>", "html { font-size: 150%; }");
    assert_eq!(prop(&tree, tree.root(), "font-size"), Some("24.0px"));
}

#[test]
fn test_fractional_percent() {
    let tree = styled("<small>x</small>", "small { font-size: 90%; }");
    let small = elements(&tree, "small")[0];
    assert_eq!(prop(&tree, small, "font-size"), Some("14.4px"));
}

#[test]
fn test_recomputing_is_idempotent() {
    let rules = Stylesheet::parse("div { font-size: 150%; } p { color: red; }").rules;
    let mut tree = parse_document("<div><p>x</p></div>");

    compute_styles(&mut tree, &rules);
    let first: Vec<_> = tree.iter_all().map(|id| tree.style(id).cloned()).collect();
    compute_styles(&mut tree, &rules);
    let second: Vec<_> = tree.iter_all().map(|id| tree.style(id).cloned()).collect();

    assert_eq!(first, second);
    let div = elements(&tree, "div")[0];
    assert_eq!(prop(&tree, div, "font-size"), Some("24.0px"));
}

#[test]
fn test_rule_order_is_irrelevant_to_result() {
    let mut rules = Stylesheet::parse("div p { color: red; } p { color: blue; }").rules;
    let markup = "<div><p>x</p></div>";

    let mut unsorted = parse_document(markup);
    compute_styles(&mut unsorted, &rules);
    sort_rules(&mut rules);
    let mut sorted = parse_document(markup);
    compute_styles(&mut sorted, &rules);

    let p = elements(&sorted, "p")[0];
    assert_eq!(prop(&sorted, p, "color"), Some("red"));
    assert_eq!(prop(&unsorted, p, "color"), Some("red"));
}

#[test]
fn test_sort_rules_is_stable() {
    let mut rules = Stylesheet::parse("div p { color: red; } a { color: blue; } b { color: green; }").rules;
    sort_rules(&mut rules);

    let selectors: Vec<String> = rules.iter().map(|r| r.selector.to_string()).collect();
    assert_eq!(selectors, vec!["a", "b", "div p"]);
}

#[test]
fn test_user_agent_rules() {
    let mut tree = parse_document("<p><a>link</a> <i>it</i> <b>bold</b></p>");
    compute_styles(&mut tree, &ua_stylesheet().rules);

    let a = elements(&tree, "a")[0];
    let i = elements(&tree, "i")[0];
    let b = elements(&tree, "b")[0];
    assert_eq!(prop(&tree, a, "color"), Some("blue"));
    assert_eq!(prop(&tree, i, "font-style"), Some("italic"));
    assert_eq!(prop(&tree, b, "font-weight"), Some("bold"));
}
