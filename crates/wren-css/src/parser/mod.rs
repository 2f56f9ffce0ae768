//! Stylesheet parser module.

/// Recursive-descent parser over stylesheet text.
pub mod css_parser;

pub use css_parser::{CSSParser, CssParseError, DeclarationMap, StyleRule, Stylesheet};
