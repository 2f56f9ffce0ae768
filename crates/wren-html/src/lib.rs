//! Markup tokenizer and tree builder for the Wren renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a single left-to-right scan that splits markup into text
//!   runs and tags, with attribute splitting and a handful of character
//!   references (`&lt;`, `&gt;`, `&amp;`, `&quot;`)
//! - **Tree Builder** - a stack of open elements with implicit `html`,
//!   `head` and `body` insertion, void elements, and forgiving end tags
//!
//! # Not Yet Implemented
//!
//! - The WHATWG insertion modes and adoption agency algorithm
//! - Raw text handling for `<script>` and `<style>` (a `<` inside them starts a tag)
//! - Full named character reference table

/// Tree construction.
pub mod parser;
/// Tokenizer converting markup text into tokens.
pub mod tokenizer;

pub use parser::{HTMLParser, IssueKind, ParseIssue, print_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};

use wren_dom::DomTree;

/// Tokenize and build a tree in one step.
///
/// Never fails: any input, including the empty string, produces a tree
/// rooted at an `html` element.
#[must_use]
pub fn parse_document(markup: &str) -> DomTree {
    let mut tokenizer = HTMLTokenizer::new(markup.to_string());
    tokenizer.run();
    HTMLParser::new(tokenizer.into_tokens()).run()
}
