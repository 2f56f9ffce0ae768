//! Markup tree implementation for the Wren renderer.
//!
//! This crate provides an arena-based tree of element and text nodes.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! A node's `children` list is the only owning relationship; `parent` is a
//! plain index used for upward traversal (selector matching, inheritance) and
//! never frees anything. Dropping the [`DomTree`] drops every node.

use std::collections::{BTreeMap, HashMap};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Resolved style of a node: property name to value in the small value
/// grammar (keyword, `<number>px`, `<number>%`).
///
/// Empty until the cascade annotates the node.
pub type StyleMap = BTreeMap<String, String>;

/// A type-safe index into the markup tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The first allocated node. The tree builder always allocates the root
    /// `html` element first.
    pub const ROOT: Self = Self(0);
}

/// A node in the markup tree.
///
/// Stores indices for parent/child relationships plus the style map the
/// cascade writes in place.
#[derive(Debug, Clone)]
pub struct Node {
    /// Element or text payload.
    pub kind: NodeKind,

    /// Back-reference to the parent, `None` for the root. Non-owning.
    pub parent: Option<NodeId>,

    /// Owned children in document order.
    pub children: Vec<NodeId>,

    /// Resolved style, filled in by the cascade.
    pub style: StyleMap,
}

/// The two kinds of markup node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A run of character data.
    Text(String),
    /// An element with a tag name and attributes.
    Element(ElementData),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Case-folded tag name.
    pub tag_name: String,
    /// Attributes with case-folded names and unquoted values.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: AttributesMap::new(),
        }
    }

    /// Create element data with the given attributes.
    #[must_use]
    pub fn with_attrs(tag_name: &str, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
        }
    }

    /// Returns the value of an attribute if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena-based markup tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
    /// The root element.
    root: NodeId,
}

impl DomTree {
    /// Create an empty tree. The first allocated node becomes the root
    /// unless [`DomTree::set_root`] says otherwise.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NodeId::ROOT,
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Mark `id` as the root of the tree.
    pub const fn set_root(&mut self, id: NodeId) {
        self.root = id;
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    ///
    /// The node records `parent` as its back-reference but is not yet in the
    /// parent's children list; call [`DomTree::append_child`] for that.
    pub fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
            style: StyleMap::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent` and points the child's
    /// back-reference at `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child.0 >= self.nodes.len() {
            return;
        }
        let Some(parent_node) = self.nodes.get_mut(parent.0) else {
            return;
        };
        parent_node.children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            NodeKind::Element(_) => None,
        })
    }

    /// The tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// The resolved style of a node. Empty before the cascade has run.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<&StyleMap> {
        self.get(id).map(|n| &n.style)
    }

    /// Flatten the subtree rooted at `id` into a list in document order
    /// (pre-order, parents before children).
    #[must_use]
    pub fn tree_to_list(&self, id: NodeId) -> Vec<NodeId> {
        let mut list = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.get(current).is_none() {
                continue;
            }
            list.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        list
    }

    /// Iterate over every node reachable from the root in document order.
    #[must_use]
    pub fn iter_all(&self) -> std::vec::IntoIter<NodeId> {
        self.tree_to_list(self.root).into_iter()
    }

    /// The first child of the root element that is a `body` element.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.children(self.root)
            .iter()
            .find(|&&id| self.tag_name(id) == Some("body"))
            .copied()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
