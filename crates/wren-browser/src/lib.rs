//! High-level document API for the Wren renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Rendering** - markup and rule lists in, display list out ([`render`])
//! - **Document Loading** - fetch a document and its linked stylesheets,
//!   then render it ([`load`])
//! - **Font Metrics** - fontdue-backed measurement of system fonts
//! - **Page** - scroll state and viewport culling over a display list
//! - **Software Rendering** - headless PNG output
//!
//! # Not Yet Implemented
//!
//! - Images, scripts and any resource other than stylesheets
//! - `@import` inside stylesheets

pub mod fetch;
pub mod font_metrics;
pub mod page;
pub mod renderer;

pub use wren_css as css;
pub use wren_dom as dom;
pub use wren_html as html;

pub use fetch::{Fetch, NetworkFetcher};
pub use font_metrics::{FontdueFontMetrics, SystemFonts};
pub use page::{Page, SCROLL_STEP};
pub use renderer::Renderer;

use thiserror::Error;
use wren_common::warning::clear_warnings;
use wren_common::{FetchError, Url, UrlError};
use wren_css::{
    DisplayList, DocumentBox, FontMetrics, LayoutOptions, Painter, StyleRule, Stylesheet,
    compute_styles, extract_style_content, ua_stylesheet,
};
use wren_dom::DomTree;
use wren_html::{HTMLParser, HTMLTokenizer, ParseIssue};

/// The output of one pass through the pipeline.
///
/// Everything here is rebuilt from scratch on every load.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// The markup tree, with resolved styles stored in each node.
    pub tree: DomTree,
    /// Structural repairs the tree builder made.
    pub issues: Vec<ParseIssue>,
    /// The laid-out box tree.
    pub layout: DocumentBox,
    /// Drawing commands in painting order.
    pub display_list: DisplayList,
}

impl RenderedDocument {
    /// A scrollable page over the display list, sized to the layout's
    /// viewport.
    #[must_use]
    pub fn page(&self) -> Page {
        Page::new(
            self.display_list.clone(),
            self.layout.height(),
            *self.layout.options(),
        )
    }
}

/// Error type for document loading.
///
/// Only the primary document can fail a load. Stylesheet problems are
/// logged and the stylesheet is left out.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The address could not be parsed.
    #[error("invalid address: {0}")]
    Url(#[from] UrlError),
    /// The document could not be fetched.
    #[error("failed to load {url}: {source}")]
    Fetch {
        /// The document URL.
        url: String,
        /// What went wrong.
        #[source]
        source: FetchError,
    },
}

/// Run the pipeline on markup that is already in hand.
///
/// `rule_lists` are concatenated in order; the cascade then applies rules by
/// priority, with ties going to the later rule. Never fails.
#[must_use]
pub fn render(
    markup: &str,
    rule_lists: &[Vec<StyleRule>],
    options: &LayoutOptions,
    fonts: &dyn FontMetrics,
) -> RenderedDocument {
    let (tree, issues) = parse_with_issues(markup);
    render_tree(tree, issues, rule_lists, options, fonts)
}

/// [`render`], keeping only the display list.
#[must_use]
pub fn render_display_list(
    markup: &str,
    rule_lists: &[Vec<StyleRule>],
    options: &LayoutOptions,
    fonts: &dyn FontMetrics,
) -> DisplayList {
    render(markup, rule_lists, options, fonts).display_list
}

/// Fetch and render the document at `address`.
///
/// The rules applied are, in order: the user-agent stylesheet, every
/// `<link rel="stylesheet">` in document order, then the contents of the
/// document's `<style>` elements.
///
/// # Errors
///
/// Returns a [`LoadError`] if `address` is not a valid URL or the document
/// itself cannot be fetched.
pub fn load(
    address: &str,
    fetcher: &dyn Fetch,
    fonts: &dyn FontMetrics,
    options: &LayoutOptions,
) -> Result<RenderedDocument, LoadError> {
    clear_warnings();

    let url = Url::parse(address)?;
    let markup = fetcher.fetch(&url).map_err(|source| LoadError::Fetch {
        url: url.to_string(),
        source,
    })?;
    log::info!(target: "wren::load", "loaded {url} ({} bytes)", markup.len());

    let (tree, issues) = parse_with_issues(&markup);

    let mut rule_lists = vec![ua_stylesheet().rules.clone()];
    for href in stylesheet_links(&tree) {
        if let Some(rules) = fetch_stylesheet(&url, &href, fetcher) {
            rule_lists.push(rules);
        }
    }
    let inline_css = extract_style_content(&tree);
    if !inline_css.trim().is_empty() {
        rule_lists.push(Stylesheet::parse(&inline_css).into_rules());
    }

    Ok(render_tree(tree, issues, &rule_lists, options, fonts))
}

/// [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
///
/// The `href` of every `<link rel="stylesheet">`, in document order.
#[must_use]
pub fn stylesheet_links(tree: &DomTree) -> Vec<String> {
    tree.tree_to_list(tree.root())
        .into_iter()
        .filter_map(|id| tree.as_element(id))
        .filter(|element| element.tag_name == "link")
        .filter(|element| {
            element
                .attr("rel")
                .is_some_and(|rel| rel.eq_ignore_ascii_case("stylesheet"))
        })
        .filter_map(|element| element.attr("href"))
        .map(str::to_string)
        .collect()
}

/// Resolve, fetch and parse one linked stylesheet. Failures are logged and
/// yield `None`.
fn fetch_stylesheet(base: &Url, href: &str, fetcher: &dyn Fetch) -> Option<Vec<StyleRule>> {
    let url = match base.resolve(href) {
        Ok(url) => url,
        Err(error) => {
            log::warn!(target: "wren::load", "skipping stylesheet '{href}': {error}");
            return None;
        }
    };
    match fetcher.fetch(&url) {
        Ok(text) => {
            let sheet = Stylesheet::parse(&text);
            log::debug!(target: "wren::load", "stylesheet {url}: {} rules", sheet.len());
            Some(sheet.into_rules())
        }
        Err(error) => {
            log::warn!(target: "wren::load", "skipping stylesheet {url}: {error}");
            None
        }
    }
}

fn parse_with_issues(markup: &str) -> (DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::new(markup.to_string());
    tokenizer.run();
    HTMLParser::new(tokenizer.into_tokens()).run_with_issues()
}

fn render_tree(
    mut tree: DomTree,
    issues: Vec<ParseIssue>,
    rule_lists: &[Vec<StyleRule>],
    options: &LayoutOptions,
    fonts: &dyn FontMetrics,
) -> RenderedDocument {
    let rules: Vec<StyleRule> = rule_lists.iter().flatten().cloned().collect();
    compute_styles(&mut tree, &rules);

    let mut layout = DocumentBox::new(&tree, options);
    layout.layout(&tree, fonts);

    let display_list = Painter::new(&tree).paint(&layout);

    RenderedDocument {
        tree,
        issues,
        layout,
        display_list,
    }
}
