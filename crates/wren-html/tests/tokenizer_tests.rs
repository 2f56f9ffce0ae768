//! Integration tests for the markup tokenizer.

use wren_html::{Attribute, HTMLTokenizer, Token};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}

fn text(data: &str) -> Token {
    Token::Text {
        data: data.to_string(),
    }
}

fn start(name: &str) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing: false,
        attributes: Vec::new(),
    }
}

fn end(name: &str) -> Token {
    Token::EndTag {
        name: name.to_string(),
    }
}

#[test]
fn test_plain_text() {
    assert_eq!(tokenize("Hello"), vec![text("Hello")]);
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_text_is_flushed_at_tag_boundaries() {
    assert_eq!(
        tokenize("a<b>c</b>d"),
        vec![text("a"), start("b"), text("c"), end("b"), text("d")]
    );
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(
        tokens,
        vec![Token::Doctype {
            data: "DOCTYPE html".to_string()
        }]
    );
}

#[test]
fn test_comment() {
    let tokens = tokenize("x<!-- a <b> c -->y");
    assert_eq!(
        tokens,
        vec![
            text("x"),
            Token::Comment {
                data: " a <b> c ".to_string()
            },
            text("y"),
        ]
    );
}

#[test]
fn test_abruptly_closed_comments_are_empty() {
    let empty = Token::Comment {
        data: String::new(),
    };
    assert_eq!(
        tokenize("<!--><p>x</p>"),
        vec![empty.clone(), start("p"), text("x"), end("p")]
    );
    assert_eq!(
        tokenize("<!---><p>x</p>"),
        vec![empty, start("p"), text("x"), end("p")]
    );
}

#[test]
fn test_unterminated_comment_runs_to_end() {
    let tokens = tokenize("<!-- never closed <p>");
    assert!(matches!(&tokens[..], [Token::Comment { .. }]));
}

#[test]
fn test_start_tag_name_is_lowercased() {
    assert_eq!(tokenize("<DIV>"), vec![start("div")]);
    assert_eq!(tokenize("</DIV >"), vec![end("div")]);
}

#[test]
fn test_self_closing_flag() {
    let tokens = tokenize("<br/><img src=a.png />");
    match &tokens[..] {
        [
            Token::StartTag {
                name: br,
                self_closing: true,
                ..
            },
            Token::StartTag {
                name: img,
                self_closing: true,
                attributes,
            },
        ] => {
            assert_eq!(br, "br");
            assert_eq!(img, "img");
            assert_eq!(attributes, &[Attribute::new("src".into(), "a.png".into())]);
        }
        other => panic!("unexpected tokens: {other:?}"),
    }
}

#[test]
fn test_attributes() {
    let tokens = tokenize(r#"<link REL=stylesheet href="/main.css" disabled>"#);
    assert_eq!(tokens.len(), 1);
    let token = &tokens[0];

    assert_eq!(token.attribute("rel"), Some("stylesheet"));
    assert_eq!(token.attribute("href"), Some("/main.css"));
    assert_eq!(token.attribute("disabled"), Some(""));
    assert_eq!(token.attribute("type"), None);
}

#[test]
fn test_attribute_value_keeps_lone_quote() {
    let tokens = tokenize("<p title=\">x");
    assert_eq!(tokens[0].attribute("title"), Some("\""));
}

#[test]
fn test_character_references_in_text() {
    assert_eq!(
        tokenize("1 &lt; 2 &amp;&amp; 3 &gt; 2"),
        vec![text("1 < 2 && 3 > 2")]
    );
}

#[test]
fn test_escaped_brackets_do_not_open_tags() {
    assert_eq!(tokenize("&lt;p&gt;"), vec![text("<p>")]);
}

#[test]
fn test_character_references_in_attribute_values() {
    let tokens = tokenize(r#"<a title="&quot;hi&quot; &amp; bye">"#);
    assert_eq!(tokens[0].attribute("title"), Some("\"hi\" & bye"));
}

#[test]
fn test_unterminated_tag_is_dropped() {
    assert_eq!(tokenize("text<p class=x"), vec![text("text")]);
}

#[test]
fn test_bracket_inside_tag_abandons_it() {
    assert_eq!(tokenize("<a<b>"), vec![text("<a"), start("b")]);
}

#[test]
fn test_lone_greater_than_is_text() {
    assert_eq!(tokenize("a > b"), vec![text("a > b")]);
}

#[test]
fn test_empty_tag_is_skipped() {
    assert_eq!(tokenize("a<>b"), vec![text("a"), text("b")]);
}
