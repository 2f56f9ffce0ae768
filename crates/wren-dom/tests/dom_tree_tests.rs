//! Tests for arena tree construction and traversal.

use wren_dom::{DomTree, ElementData, NodeId, NodeKind};

/// Helper to allocate an element under `parent` and attach it.
fn append_element(tree: &mut DomTree, parent: Option<NodeId>, tag: &str) -> NodeId {
    let id = tree.alloc(NodeKind::Element(ElementData::new(tag)), parent);
    if let Some(parent) = parent {
        tree.append_child(parent, id);
    }
    id
}

/// Helper to allocate a text node under `parent` and attach it.
fn append_text(tree: &mut DomTree, parent: NodeId, text: &str) -> NodeId {
    let id = tree.alloc(NodeKind::Text(text.to_string()), Some(parent));
    tree.append_child(parent, id);
    id
}

// ========== construction ==========

#[test]
fn test_default_tree_is_empty() {
    let tree = DomTree::default();
    assert!(tree.is_empty());
    assert_eq!(tree.root(), NodeId::ROOT);
    assert_eq!(NodeId::default(), NodeId::ROOT);
}

#[test]
fn test_first_allocated_node_is_root() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");

    assert_eq!(html, NodeId::ROOT);
    assert_eq!(tree.root(), html);
    assert_eq!(tree.parent(html), None);
}

#[test]
fn test_tag_names_are_case_folded() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "HTML");
    assert_eq!(tree.tag_name(html), Some("html"));
}

#[test]
fn test_append_child_sets_back_reference() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let body = append_element(&mut tree, Some(html), "body");
    let text = append_text(&mut tree, body, "hello");

    assert_eq!(tree.children(html), &[body]);
    assert_eq!(tree.children(body), &[text]);
    assert_eq!(tree.parent(text), Some(body));
    assert_eq!(tree.as_text(text), Some("hello"));
    assert!(tree.as_element(text).is_none());
}

#[test]
fn test_alloc_without_append_is_detached() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let pending = tree.alloc(NodeKind::Element(ElementData::new("p")), Some(html));

    // The back-reference exists, but the parent does not own it yet.
    assert_eq!(tree.parent(pending), Some(html));
    assert!(tree.children(html).is_empty());

    tree.append_child(html, pending);
    assert_eq!(tree.children(html), &[pending]);
}

#[test]
fn test_append_child_ignores_unknown_ids() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    tree.append_child(html, NodeId(99));
    tree.append_child(NodeId(42), html);
    assert!(tree.children(html).is_empty());
    assert_eq!(tree.children(NodeId(42)), &[] as &[NodeId]);
}

// ========== traversal ==========

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let body = append_element(&mut tree, Some(html), "body");
    let div = append_element(&mut tree, Some(body), "div");
    let p = append_element(&mut tree, Some(div), "p");

    let ancestors: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(ancestors, vec![div, body, html]);
    assert_eq!(tree.ancestors(html).count(), 0);
}

#[test]
fn test_tree_to_list_is_document_order() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let head = append_element(&mut tree, Some(html), "head");
    let link = append_element(&mut tree, Some(head), "link");
    let body = append_element(&mut tree, Some(html), "body");
    let p = append_element(&mut tree, Some(body), "p");
    let text = append_text(&mut tree, p, "x");

    assert_eq!(tree.tree_to_list(html), vec![html, head, link, body, p, text]);
    assert_eq!(tree.tree_to_list(body), vec![body, p, text]);
    assert_eq!(tree.iter_all().count(), 6);
}

#[test]
fn test_body_lookup() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let _head = append_element(&mut tree, Some(html), "head");
    let body = append_element(&mut tree, Some(html), "body");

    assert_eq!(tree.body(), Some(body));
}

#[test]
fn test_style_starts_empty() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    assert!(tree.style(html).is_some_and(|s| s.is_empty()));

    if let Some(node) = tree.get_mut(html) {
        let _ = node.style.insert("color".to_string(), "red".to_string());
    }
    assert_eq!(
        tree.style(html).and_then(|s| s.get("color")).map(String::as_str),
        Some("red")
    );
}

#[test]
fn test_attr_lookup() {
    let mut attrs = wren_dom::AttributesMap::new();
    let _ = attrs.insert("href".to_string(), "a.css".to_string());
    let element = ElementData::with_attrs("LINK", attrs);

    assert_eq!(element.tag_name, "link");
    assert_eq!(element.attr("href"), Some("a.css"));
    assert_eq!(element.attr("rel"), None);
}
