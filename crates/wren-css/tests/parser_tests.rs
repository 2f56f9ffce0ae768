//! Integration tests for the stylesheet parser.

use wren_css::{CSSParser, CssParseError, DeclarationMap, Selector, Stylesheet};

/// Helper to build a declaration map from pairs
fn decls(pairs: &[(&str, &str)]) -> DeclarationMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_single_rule() {
    let sheet = Stylesheet::parse("p { color: red; }");

    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules[0].selector, Selector::tag("p"));
    assert_eq!(sheet.rules[0].declarations, decls(&[("color", "red")]));
}

#[test]
fn test_rules_keep_source_order() {
    let sheet = Stylesheet::parse("h1 { font-size: 200%; } p { color: blue; } h1 { color: red; }");
    let selectors: Vec<String> = sheet.rules.iter().map(|r| r.selector.to_string()).collect();
    assert_eq!(selectors, vec!["h1", "p", "h1"]);
}

#[test]
fn test_descendant_selector() {
    let sheet = Stylesheet::parse("div  ul li { font-weight: bold; }");
    let expected = Selector::descendant(
        Selector::descendant(Selector::tag("div"), Selector::tag("ul")),
        Selector::tag("li"),
    );

    assert_eq!(sheet.rules[0].selector, expected);
    assert_eq!(sheet.rules[0].priority(), 3);
}

#[test]
fn test_names_are_case_folded() {
    let sheet = Stylesheet::parse("DIV P { COLOR: Red; }");

    assert_eq!(sheet.rules[0].selector.to_string(), "div p");
    // Values keep their case.
    assert_eq!(sheet.rules[0].declarations, decls(&[("color", "Red")]));
}

#[test]
fn test_whitespace_and_comments() {
    let sheet = Stylesheet::parse(
        "/* header */\n\tpre\n{\n  background-color :  gray ;\n  /* inner */ color:white;\n}\n",
    );

    assert_eq!(sheet.len(), 1);
    assert_eq!(
        sheet.rules[0].declarations,
        decls(&[("background-color", "gray"), ("color", "white")])
    );
}

#[test]
fn test_last_declaration_may_omit_semicolon() {
    let sheet = Stylesheet::parse("p { color: red; font-size: 20px }");
    assert_eq!(
        sheet.rules[0].declarations,
        decls(&[("color", "red"), ("font-size", "20px")])
    );
}

#[test]
fn test_later_duplicate_declaration_wins() {
    let sheet = Stylesheet::parse("p { color: red; color: blue; }");
    assert_eq!(sheet.rules[0].declarations, decls(&[("color", "blue")]));
}

#[test]
fn test_word_characters() {
    let sheet = Stylesheet::parse("p { color: #ff0000; font-size: 12.5px; width: 50%; }");
    assert_eq!(
        sheet.rules[0].declarations,
        decls(&[("color", "#ff0000"), ("font-size", "12.5px"), ("width", "50%")])
    );
}

// ========== error recovery ==========

#[test]
fn test_bad_declaration_is_skipped() {
    let mut parser = CSSParser::new("p { color red; font-weight: bold; }");
    let sheet = parser.parse();

    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules[0].declarations, decls(&[("font-weight", "bold")]));
    assert_eq!(
        parser.errors(),
        &[CssParseError::ExpectedLiteral {
            expected: ':',
            position: 10
        }]
    );
}

#[test]
fn test_bad_final_declaration_abandons_body() {
    let sheet = Stylesheet::parse("p { color: red; font-family: \"Times\" } a { color: blue; }");

    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.rules[0].declarations, decls(&[("color", "red")]));
    assert_eq!(sheet.rules[1].declarations, decls(&[("color", "blue")]));
}

#[test]
fn test_bad_selector_skips_rule() {
    let mut parser = CSSParser::new("p > a { color: red; } b { font-weight: bold; }");
    let sheet = parser.parse();

    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules[0].selector, Selector::tag("b"));
    assert!(!parser.errors().is_empty());
}

#[test]
fn test_unsupported_selector_syntax_is_skipped() {
    let sheet = Stylesheet::parse("a:hover { color: red; } @media screen { p { color: blue; } } i { font-style: italic; }");

    // `a:hover` fails at ':'; `@media` fails at '@' and skips to the first
    // '}', leaving a stray '}' that fails as a selector in turn.
    let selectors: Vec<String> = sheet.rules.iter().map(|r| r.selector.to_string()).collect();
    assert_eq!(selectors, vec!["i"]);
}

#[test]
fn test_unterminated_rule_is_dropped() {
    let sheet = Stylesheet::parse("p { color: red; } div { color: blue;");
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules[0].selector, Selector::tag("p"));
}

#[test]
fn test_garbage_never_panics() {
    for input in ["", "{", "}", ";;;", "p {", "p { : ; }", "}}}{{{", "/*", "p { color: }"] {
        let _ = Stylesheet::parse(input);
    }
    assert!(Stylesheet::parse("").is_empty());
    assert!(Stylesheet::parse("   \n ").is_empty());
}

// ========== inline declarations ==========

#[test]
fn test_parse_declarations() {
    let mut parser = CSSParser::new("color: red; Font-Size: 150%");
    assert_eq!(
        parser.parse_declarations(),
        decls(&[("color", "red"), ("font-size", "150%")])
    );
}

#[test]
fn test_parse_declarations_recovers() {
    let mut parser = CSSParser::new("color; font-weight: bold; nonsense");
    assert_eq!(parser.parse_declarations(), decls(&[("font-weight", "bold")]));
}
