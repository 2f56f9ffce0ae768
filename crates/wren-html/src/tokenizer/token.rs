/// An attribute on a start tag token.
///
/// The name is case-folded; the value has surrounding quotes removed and
/// character references decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value, empty for bare attributes such as `disabled`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The tokenizer emits tokens of these types to the tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE ...>` or any other `<!...>` markup declaration.
    Doctype {
        /// Everything after the `!`.
        data: String,
    },

    /// `<!-- ... -->`.
    Comment {
        /// Comment body without the delimiters.
        data: String,
    },

    /// An opening tag.
    StartTag {
        /// Case-folded tag name.
        name: String,
        /// Set when the tag was written `<name ... />`.
        self_closing: bool,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
    },

    /// A closing tag.
    EndTag {
        /// Case-folded tag name.
        name: String,
    },

    /// A run of character data between tags.
    Text {
        /// The text with character references decoded.
        data: String,
    },
}

impl Token {
    /// Look up an attribute value on a start tag.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::StartTag { attributes, .. } => attributes
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.as_str()),
            _ => None,
        }
    }
}
