//! Tree construction.
//!
//! Builds a [`wren_dom::DomTree`] from the token stream, repairing missing
//! structural tags along the way.

mod builder;

pub use builder::{HTMLParser, IssueKind, ParseIssue, print_tree};
