//! Integration tests for display list generation.

use wren_css::{
    ApproximateFontMetrics, ColorValue, DisplayCommand, DisplayList, DocumentBox, LayoutOptions,
    Painter, StyleRule, Stylesheet, compute_styles, ua_stylesheet,
};
use wren_html::parse_document;

/// Helper to run the whole pipeline on markup and return the display list
fn paint_with(markup: &str, rules: &[StyleRule]) -> DisplayList {
    let mut tree = parse_document(markup);
    compute_styles(&mut tree, rules);
    let mut document = DocumentBox::new(&tree, &LayoutOptions::default());
    document.layout(&tree, &ApproximateFontMetrics);
    Painter::new(&tree).paint(&document)
}

fn paint(markup: &str, css: &str) -> DisplayList {
    paint_with(markup, &Stylesheet::parse(css).rules)
}

fn words(list: &DisplayList) -> Vec<&str> {
    list.iter()
        .filter_map(|command| match command {
            DisplayCommand::DrawText { text, .. } => Some(text.as_str()),
            DisplayCommand::DrawRect { .. } => None,
        })
        .collect()
}

#[test]
fn test_hello_world() {
    let list = paint("<p>Hello world</p>", "");

    assert_eq!(list.len(), 2);
    assert_eq!(words(&list), vec!["Hello", "world"]);
    let commands = list.commands();
    assert!((commands[0].top() - commands[1].top()).abs() < f32::EPSILON);
    assert!(commands[1].left() > commands[0].right());
}

#[test]
fn test_empty_document_paints_nothing() {
    assert!(paint("", "").is_empty());
}

#[test]
fn test_text_bounds() {
    let list = paint("<p>word</p>", "");
    let DisplayCommand::DrawText {
        top,
        left,
        bottom,
        right,
        font,
        color,
        ..
    } = &list.commands()[0]
    else {
        panic!("expected text");
    };

    // 16px text is 12pt; approximate advance is 0.6 of the size per char.
    assert_eq!(font.size, 12);
    assert!((right - left - 4.0 * 12.0 * 0.6).abs() < 1e-4);
    assert!((bottom - top - 12.0 * 1.2).abs() < 1e-4);
    assert_eq!(*color, ColorValue::BLACK);
}

#[test]
fn test_block_boxes_paint_nothing() {
    let list = paint(
        "<div><p>x</p></div>",
        "div { background-color: yellow; } body { background-color: red; }",
    );

    // Only inline boxes paint backgrounds; both styled elements are blocks.
    assert_eq!(list.len(), 1);
    assert_eq!(words(&list), vec!["x"]);
}

#[test]
fn test_background_precedes_text() {
    let list = paint_with("<pre>let x</pre>", &ua_stylesheet().rules);
    let commands = list.commands();

    assert_eq!(commands.len(), 3);
    let DisplayCommand::DrawRect {
        top,
        left,
        right,
        color,
        ..
    } = &commands[0]
    else {
        panic!("expected the background first");
    };
    assert_eq!(*color, ColorValue::rgb(128, 128, 128));
    assert!((left - 13.0).abs() < f32::EPSILON);
    assert!((right - 787.0).abs() < 1e-4);
    assert!(commands[1].top() >= *top);
    assert_eq!(words(&list), vec!["let", "x"]);
}

#[test]
fn test_transparent_background_is_skipped() {
    let list = paint("<p>x</p>", "p { background-color: transparent; }");
    assert_eq!(list.len(), 1);
}

#[test]
fn test_unknown_background_is_skipped() {
    let list = paint("<p>x</p>", "p { background-color: chartreuse-ish; }");
    assert_eq!(list.len(), 1);
}

#[test]
fn test_paint_order_follows_document() {
    let list = paint("<p>one</p><p>two</p><p>three</p>", "");
    assert_eq!(words(&list), vec!["one", "two", "three"]);

    let tops: Vec<f32> = list.iter().map(DisplayCommand::top).collect();
    assert!(tops.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_is_visible() {
    let command = DisplayCommand::DrawRect {
        top: 100.0,
        left: 0.0,
        bottom: 120.0,
        right: 50.0,
        color: ColorValue::BLACK,
    };

    assert!(command.is_visible(0.0, 600.0));
    assert!(command.is_visible(110.0, 600.0));
    assert!(!command.is_visible(0.0, 50.0));
    assert!(!command.is_visible(200.0, 600.0));
}

#[test]
fn test_display_list_serializes_tagged() {
    let list = paint("<p>Hi</p>", "");
    let json = serde_json::to_value(&list).expect("serialize");

    assert_eq!(json[0]["type"], "draw_text");
    assert_eq!(json[0]["text"], "Hi");
    assert_eq!(json[0]["font"]["size"], 12);

    let back: DisplayList = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, list);
}
