//! Stylesheet parser.
//!
//! Grammar:
//!
//! ```text
//! stylesheet  := rule*
//! rule        := selector '{' declaration* '}'
//! selector    := word word*
//! declaration := word ':' word ';'
//! word        := [A-Za-z0-9#\-.%]+
//! ```
//!
//! Whitespace and `/* ... */` comments are skipped between tokens. A failure
//! inside a rule's selector skips to the next `}`; a failure inside a
//! declaration skips to the next `;` (and carries on) or `}` (and abandons
//! the rest of the body). Nothing escapes [`CSSParser::parse`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::selector::Selector;

/// Property name to raw value, as written in a rule body or `style`
/// attribute.
pub type DeclarationMap = BTreeMap<String, String>;

/// A parsed rule: a selector and the declarations it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Which nodes the rule applies to.
    pub selector: Selector,
    /// Declarations in the rule body. Later duplicates win.
    pub declarations: DeclarationMap,
}

impl StyleRule {
    /// The selector's priority, used to order rules in the cascade.
    #[must_use]
    pub fn priority(&self) -> u32 {
        self.selector.priority()
    }
}

/// Rules in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// The rules, in the order they appear in the source.
    pub rules: Vec<StyleRule>,
}

impl Stylesheet {
    /// Parse stylesheet text. Never fails; malformed rules are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        CSSParser::new(text).parse()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the sheet has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Take the rules out of the sheet.
    #[must_use]
    pub fn into_rules(self) -> Vec<StyleRule> {
        self.rules
    }
}

/// A recoverable syntax error.
///
/// These never reach the caller of [`CSSParser::parse`]; they are logged and
/// kept for inspection through [`CSSParser::errors`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssParseError {
    /// A word was required but the input had none.
    #[error("expected a word at offset {position}")]
    ExpectedWord {
        /// Character offset of the failure.
        position: usize,
    },
    /// A specific delimiter was required.
    #[error("expected '{expected}' at offset {position}")]
    ExpectedLiteral {
        /// The delimiter that was expected.
        expected: char,
        /// Character offset of the failure.
        position: usize,
    },
}

/// Stylesheet parser.
pub struct CSSParser {
    /// Input characters.
    chars: Vec<char>,
    /// Index of the next character to consume.
    position: usize,
    /// Errors recovered from so far.
    errors: Vec<CssParseError>,
}

impl CSSParser {
    /// Create a parser over stylesheet text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            position: 0,
            errors: Vec::new(),
        }
    }

    /// Errors the parser recovered from.
    #[must_use]
    pub fn errors(&self) -> &[CssParseError] {
        &self.errors
    }

    /// Parse a whole stylesheet.
    pub fn parse(&mut self) -> Stylesheet {
        let mut rules = Vec::new();
        while self.position < self.chars.len() {
            self.whitespace();
            if self.at_end() {
                break;
            }
            match self.rule() {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    self.record(error);
                    if self.ignore_until(&['}']) == Some('}') {
                        self.position += 1;
                        self.whitespace();
                    } else {
                        break;
                    }
                }
            }
        }
        log::debug!(
            target: "wren::css",
            "parsed {} rules ({} recovered errors)",
            rules.len(),
            self.errors.len()
        );
        Stylesheet { rules }
    }

    /// Parse a declaration list with no surrounding braces, as found in a
    /// `style` attribute.
    pub fn parse_declarations(&mut self) -> DeclarationMap {
        self.whitespace();
        self.body()
    }

    fn rule(&mut self) -> Result<StyleRule, CssParseError> {
        let selector = self.selector()?;
        self.literal('{')?;
        self.whitespace();
        let declarations = self.body();
        self.literal('}')?;
        Ok(StyleRule {
            selector,
            declarations,
        })
    }

    /// `selector := word word*`. Each further word nests the selector so far
    /// as the ancestor of a new tag selector.
    fn selector(&mut self) -> Result<Selector, CssParseError> {
        let mut selector = Selector::tag(&self.word()?);
        self.whitespace();
        while !self.at_end() && self.peek() != Some('{') {
            let tag = self.word()?;
            selector = Selector::descendant(selector, Selector::tag(&tag));
            self.whitespace();
        }
        Ok(selector)
    }

    /// Declarations up to (not including) a `}` or end of input.
    fn body(&mut self) -> DeclarationMap {
        let mut declarations = DeclarationMap::new();
        while !self.at_end() && self.peek() != Some('}') {
            if let Err(error) = self.declaration(&mut declarations) {
                self.record(error);
                if self.ignore_until(&[';', '}']) == Some(';') {
                    self.position += 1;
                    self.whitespace();
                } else {
                    break;
                }
            }
        }
        declarations
    }

    /// `declaration := word ':' word ';'`. The pair is stored before the
    /// semicolon is checked, so the last declaration of a body may omit it.
    fn declaration(&mut self, declarations: &mut DeclarationMap) -> Result<(), CssParseError> {
        let (property, value) = self.pair()?;
        let _ = declarations.insert(property, value);
        self.whitespace();
        self.literal(';')?;
        self.whitespace();
        Ok(())
    }

    fn pair(&mut self) -> Result<(String, String), CssParseError> {
        let property = self.word()?.to_ascii_lowercase();
        self.whitespace();
        self.literal(':')?;
        self.whitespace();
        let value = self.word()?;
        Ok((property, value))
    }

    fn word(&mut self) -> Result<String, CssParseError> {
        let start = self.position;
        while let Some(c) = self.peek()
            && is_word_char(c)
        {
            self.position += 1;
        }
        if self.position == start {
            return Err(CssParseError::ExpectedWord { position: start });
        }
        Ok(self.chars[start..self.position].iter().collect())
    }

    fn literal(&mut self, expected: char) -> Result<(), CssParseError> {
        if self.peek() == Some(expected) {
            self.position += 1;
            Ok(())
        } else {
            Err(CssParseError::ExpectedLiteral {
                expected,
                position: self.position,
            })
        }
    }

    /// Skip whitespace and comments.
    fn whitespace(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.position += 1;
            }
            if !self.lookahead_is("/*") {
                return;
            }
            self.position += 2;
            while !self.at_end() && !self.lookahead_is("*/") {
                self.position += 1;
            }
            self.position = (self.position + 2).min(self.chars.len());
        }
    }

    /// Advance to the next character in `stops` without consuming it.
    /// Returns `None` if the input runs out first.
    fn ignore_until(&mut self, stops: &[char]) -> Option<char> {
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                return Some(c);
            }
            self.position += 1;
        }
        None
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn lookahead_is(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(offset, c)| self.chars.get(self.position + offset) == Some(&c))
    }

    fn record(&mut self, error: CssParseError) {
        log::trace!(target: "wren::css", "recovering from {error}");
        self.errors.push(error);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '#' | '-' | '.' | '%')
}
