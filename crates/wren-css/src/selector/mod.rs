//! Selector matching
//!
//! Two kinds of selector are supported, per
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/):
//! type selectors and the descendant combinator. Matching is a pure
//! predicate over the tree.

use std::fmt;

use wren_dom::{DomTree, NodeId};

/// A selector with an additive priority used to order the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Holds the case-folded tag name.
    Tag(String),

    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    Descendant {
        /// Must match some strict ancestor of the node.
        ancestor: Box<Selector>,
        /// Must match the node itself.
        descendant: Box<Selector>,
    },
}

impl Selector {
    /// A type selector for `tag`.
    #[must_use]
    pub fn tag(tag: &str) -> Self {
        Self::Tag(tag.to_ascii_lowercase())
    }

    /// A descendant selector `ancestor descendant`.
    #[must_use]
    pub fn descendant(ancestor: Self, descendant: Self) -> Self {
        Self::Descendant {
            ancestor: Box::new(ancestor),
            descendant: Box::new(descendant),
        }
    }

    /// Cascade priority: 1 per type selector, summed across combinators.
    #[must_use]
    pub fn priority(&self) -> u32 {
        match self {
            Self::Tag(_) => 1,
            Self::Descendant {
                ancestor,
                descendant,
            } => ancestor.priority() + descendant.priority(),
        }
    }

    /// Whether the selector matches `node` in `tree`.
    ///
    /// Text nodes never match.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self {
            Self::Tag(tag) => tree.tag_name(node) == Some(tag.as_str()),
            Self::Descendant {
                ancestor,
                descendant,
            } => {
                descendant.matches(tree, node)
                    && tree
                        .ancestors(node)
                        .any(|candidate| ancestor.matches(tree, candidate))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => f.write_str(tag),
            Self::Descendant {
                ancestor,
                descendant,
            } => write!(f, "{ancestor} {descendant}"),
        }
    }
}
