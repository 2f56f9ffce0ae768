use strum_macros::Display;

use wren_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeKind};

use crate::tokenizer::{Attribute, Token};

/// Elements that never have content and are never pushed onto the stack of
/// open elements. The last four are legacy names.
const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr", "basefont", "bgsound", "frame", "keygen",
];

/// Elements that belong in `<head>`; seeing one directly under `<html>`
/// implies a `<head>` rather than a `<body>`.
const HEAD_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&tag)
}

fn is_head_tag(tag: &str) -> bool {
    HEAD_TAGS.contains(&tag)
}

/// Kinds of repair the tree builder performs.
///
/// None of these are fatal; they are recorded so callers can show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// A structural element (`html`, `head`, `body`) was opened or closed
    /// without a tag in the source.
    #[strum(serialize = "implied tag")]
    ImpliedTag,
    /// An end tag arrived when only the root was open and was ignored.
    #[strum(serialize = "stray end tag")]
    StrayEndTag,
    /// An end tag closed an element with a different name.
    #[strum(serialize = "mismatched end tag")]
    MismatchedEndTag,
    /// An element was still open at end of input.
    #[strum(serialize = "unclosed element")]
    UnclosedElement,
}

/// A non-fatal repair made while building the tree.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// What kind of repair this was.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where the repair happened.
    pub token_index: usize,
}

/// What the implicit-tag loop decided to do next.
enum Repair {
    Open(&'static str),
    CloseHead,
    Done,
}

/// Builds a markup tree from a stream of tokens.
///
/// Keeps a stack of unfinished elements. Text and void elements are attached
/// to the innermost open element immediately; other elements are attached to
/// their parent when they close (or when input ends).
pub struct HTMLParser {
    /// Input tokens.
    tokens: Vec<Token>,
    /// The tree under construction.
    tree: DomTree,
    /// Stack of open elements, innermost last.
    unfinished: Vec<NodeId>,
    /// Repairs recorded so far.
    issues: Vec<ParseIssue>,
    /// Index of the token being processed.
    token_index: usize,
    /// Whether `</html>` has been seen with only the root open.
    root_closed: bool,
}

impl HTMLParser {
    /// Create a parser over a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            tree: DomTree::new(),
            unfinished: Vec::new(),
            issues: Vec::new(),
            token_index: 0,
            root_closed: false,
        }
    }

    /// Build the tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Build the tree and return the repairs made along the way.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            match token {
                Token::Text { data } => self.add_text(data),
                Token::StartTag {
                    name,
                    self_closing,
                    attributes,
                } => self.add_start_tag(&name, self_closing, attributes),
                Token::EndTag { name } => self.add_end_tag(&name),
                // Markup declarations and comments are skipped, not validated.
                Token::Doctype { .. } | Token::Comment { .. } => {}
            }
        }
        self.finish();
        log::debug!(
            target: "wren::html",
            "built tree with {} nodes, {} repairs",
            self.tree.len(),
            self.issues.len()
        );
        (self.tree, self.issues)
    }

    fn add_text(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        self.implicit_tags(None);
        let parent = self.current();
        let node = self.tree.alloc(NodeKind::Text(text), parent);
        if let Some(parent) = parent {
            self.tree.append_child(parent, node);
        }
    }

    fn add_start_tag(&mut self, name: &str, self_closing: bool, attributes: Vec<Attribute>) {
        self.implicit_tags(Some(name));

        let attrs: AttributesMap = attributes
            .into_iter()
            .map(|attr| (attr.name, attr.value))
            .collect();

        if self_closing || is_self_closing(name) {
            let parent = self.current();
            let node = self
                .tree
                .alloc(NodeKind::Element(ElementData::with_attrs(name, attrs)), parent);
            if let Some(parent) = parent {
                self.tree.append_child(parent, node);
            }
        } else {
            self.open_element(name, attrs);
        }
    }

    fn add_end_tag(&mut self, name: &str) {
        self.implicit_tags(Some(&format!("/{name}")));

        if self.unfinished.len() <= 1 {
            // The first `</html>` is the expected close of the root.
            if name == "html" && !self.root_closed {
                self.root_closed = true;
            } else {
                self.issue(IssueKind::StrayEndTag, format!("ignored </{name}>"));
            }
            return;
        }

        if let Some(&innermost) = self.unfinished.last()
            && let Some(open) = self.tree.tag_name(innermost)
            && open != name
        {
            let message = format!("</{name}> closed <{open}>");
            self.issue(IssueKind::MismatchedEndTag, message);
        }
        self.close_element();
    }

    /// Synthesize missing `html`, `head` and `body` elements (and close
    /// `head`) until the incoming tag fits. `tag` is `None` for text and
    /// `/name` for end tags.
    fn implicit_tags(&mut self, tag: Option<&str>) {
        loop {
            let repair = {
                let open: Vec<&str> = self
                    .unfinished
                    .iter()
                    .filter_map(|&id| self.tree.tag_name(id))
                    .collect();

                match open.as_slice() {
                    [] if tag != Some("html") => Repair::Open("html"),
                    ["html"] if !matches!(tag, Some("head" | "body" | "/html")) => {
                        if tag.is_some_and(is_head_tag) {
                            Repair::Open("head")
                        } else {
                            Repair::Open("body")
                        }
                    }
                    ["html", "head"]
                        if !(tag == Some("/head") || tag.is_some_and(is_head_tag)) =>
                    {
                        Repair::CloseHead
                    }
                    _ => Repair::Done,
                }
            };

            match repair {
                Repair::Open(name) => {
                    self.issue(IssueKind::ImpliedTag, format!("implied <{name}>"));
                    self.open_element(name, AttributesMap::new());
                }
                Repair::CloseHead => {
                    self.issue(IssueKind::ImpliedTag, "implied </head>".to_string());
                    self.close_element();
                }
                Repair::Done => break,
            }
        }
    }

    /// The innermost open element.
    fn current(&self) -> Option<NodeId> {
        self.unfinished.last().copied()
    }

    fn open_element(&mut self, name: &str, attrs: AttributesMap) {
        let parent = self.current();
        let node = self
            .tree
            .alloc(NodeKind::Element(ElementData::with_attrs(name, attrs)), parent);
        self.unfinished.push(node);
    }

    /// Pop the innermost open element and attach it to its new parent.
    fn close_element(&mut self) {
        if self.unfinished.len() <= 1 {
            return;
        }
        if let Some(node) = self.unfinished.pop()
            && let Some(parent) = self.current()
        {
            self.tree.append_child(parent, node);
        }
    }

    fn finish(&mut self) {
        if self.unfinished.is_empty() {
            self.implicit_tags(None);
        }
        while self.unfinished.len() > 1 {
            if let Some(&innermost) = self.unfinished.last()
                && let Some(name) = self.tree.tag_name(innermost)
                && !matches!(name, "html" | "head" | "body")
            {
                let message = format!("<{name}> not closed before end of input");
                self.issue(IssueKind::UnclosedElement, message);
            }
            self.close_element();
        }
        if let Some(root) = self.unfinished.pop() {
            self.tree.set_root(root);
        }
    }

    fn issue(&mut self, kind: IssueKind, message: String) {
        log::trace!(target: "wren::html", "{kind}: {message}");
        self.issues.push(ParseIssue {
            kind,
            message,
            token_index: self.token_index,
        });
    }
}

/// Print a tree to stdout, one node per line, indented by depth.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else { return };
    match &node.kind {
        NodeKind::Element(data) => {
            if data.attrs.is_empty() {
                println!("{prefix}<{}>", data.tag_name);
            } else {
                let mut attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|(k, v)| {
                        if v.is_empty() {
                            k.clone()
                        } else {
                            format!("{k}=\"{v}\"")
                        }
                    })
                    .collect();
                attrs.sort();
                println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
            }
        }
        NodeKind::Text(data) => {
            let display = data.replace('\n', "\\n");
            println!("{prefix}\"{display}\"");
        }
    }
    for &child in tree.children(id) {
        print_tree(tree, child, indent + 1);
    }
}
