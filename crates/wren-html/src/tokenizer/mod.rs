//! Markup tokenizer module.
//!
//! Splits markup text into text runs and tags. Tag text between `<` and `>`
//! is broken into a case-folded name and an attribute list.

/// Tokenizer scan loop.
pub mod scanner;
/// Token types produced by the tokenizer.
pub mod token;

pub use scanner::HTMLTokenizer;
pub use token::{Attribute, Token};
