use super::token::{Attribute, Token};

/// Character references decoded in text and attribute values.
///
/// Decoding happens after the scan decides what is text and what is a tag,
/// so `&lt;` always yields a literal `<` in the text and never opens a tag.
const CHARACTER_REFERENCES: &[(&str, char)] = &[
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&amp;", '&'),
    ("&quot;", '"'),
];

/// Markup tokenizer.
///
/// Scans characters left to right, tracking whether the cursor is inside a
/// tag. Text outside tags is buffered and emitted as a [`Token::Text`]
/// whenever a tag begins or the input ends; the text between `<` and `>` is
/// turned into a tag token.
pub struct HTMLTokenizer {
    /// Input characters.
    input: Vec<char>,
    /// Index of the next character to consume.
    position: usize,
    /// Whether the cursor is between `<` and `>`.
    in_tag: bool,
    /// Characters accumulated since the last emitted token.
    buffer: String,
    /// Emitted tokens, in order.
    tokens: Vec<Token>,
}

impl HTMLTokenizer {
    /// Create a tokenizer over `input`.
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            in_tag: false,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Consume the tokenizer and return the emitted tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Tokenize the whole input.
    pub fn run(&mut self) {
        while self.position < self.input.len() {
            if !self.in_tag && self.lookahead_is("<!--") {
                self.consume_comment();
                continue;
            }

            let c = self.input[self.position];
            self.position += 1;

            match c {
                '<' => {
                    // A `<` inside an unterminated tag abandons that tag; its
                    // text is kept as character data.
                    if self.in_tag {
                        self.buffer.insert(0, '<');
                    }
                    self.in_tag = true;
                    self.emit_text();
                }
                '>' if self.in_tag => {
                    self.in_tag = false;
                    self.emit_tag();
                }
                _ => self.buffer.push(c),
            }
        }

        // An unterminated tag at end of input is dropped.
        if self.in_tag {
            self.buffer.clear();
        } else {
            self.emit_text();
        }
    }

    /// Check whether the unconsumed input starts with `pattern`.
    fn lookahead_is(&self, pattern: &str) -> bool {
        let mut index = self.position;
        for expected in pattern.chars() {
            if self.input.get(index) != Some(&expected) {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Consume `<!-- ... -->`, emitting a comment token.
    ///
    /// `<!-->` and `<!--->` are empty comments. An unterminated comment
    /// runs to the end of input.
    fn consume_comment(&mut self) {
        self.emit_text();
        self.position += "<!--".len();

        let mut data = String::new();
        for abrupt_end in [">", "->"] {
            if self.lookahead_is(abrupt_end) {
                self.position += abrupt_end.len();
                self.tokens.push(Token::Comment { data });
                return;
            }
        }
        while self.position < self.input.len() {
            if self.lookahead_is("-->") {
                self.position += "-->".len();
                break;
            }
            data.push(self.input[self.position]);
            self.position += 1;
        }
        self.tokens.push(Token::Comment { data });
    }

    /// Emit the buffer as a text token if it is non-empty.
    fn emit_text(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.buffer);
        self.tokens.push(Token::Text {
            data: decode_character_references(&raw),
        });
    }

    /// Emit the buffer as a tag token.
    fn emit_tag(&mut self) {
        let raw = std::mem::take(&mut self.buffer);
        if let Some(token) = tokenize_tag(&raw) {
            self.tokens.push(token);
        }
    }
}

/// Turn the text between `<` and `>` into a token.
///
/// Returns `None` for empty tags (`<>`, `</>`).
fn tokenize_tag(raw: &str) -> Option<Token> {
    let text = raw.trim();

    if let Some(declaration) = text.strip_prefix('!') {
        return Some(Token::Doctype {
            data: declaration.to_string(),
        });
    }

    if let Some(rest) = text.strip_prefix('/') {
        let name = rest.split_whitespace().next()?.to_ascii_lowercase();
        return Some(Token::EndTag { name });
    }

    let (text, self_closing) = match text.strip_suffix('/') {
        Some(rest) => (rest.trim_end(), true),
        None => (text, false),
    };

    let mut parts = split_tag_parts(text).into_iter();
    let name = parts.next()?.to_ascii_lowercase();

    let attributes = parts
        .map(|part| match part.split_once('=') {
            Some((key, value)) => Attribute::new(
                key.to_ascii_lowercase(),
                decode_character_references(strip_quotes(value)),
            ),
            None => Attribute::new(part.to_ascii_lowercase(), String::new()),
        })
        .collect();

    Some(Token::StartTag {
        name,
        self_closing,
        attributes,
    })
}

/// Split tag text on whitespace, keeping quoted attribute values intact.
fn split_tag_parts(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = None;
    let mut quote = None;

    for (index, c) in text.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                if start.is_none() {
                    start = Some(index);
                }
            }
            None if c.is_whitespace() => {
                if let Some(begin) = start.take() {
                    parts.push(&text[begin..index]);
                }
            }
            None => {
                if start.is_none() {
                    start = Some(index);
                }
            }
        }
    }
    if let Some(begin) = start {
        parts.push(&text[begin..]);
    }
    parts
}

/// Remove one pair of matching surrounding quotes.
///
/// The value must be long enough to hold both quote characters.
fn strip_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '"' || first == '\'') => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}

/// Replace the supported character references with their characters.
fn decode_character_references(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match CHARACTER_REFERENCES
            .iter()
            .find(|(reference, _)| rest.starts_with(reference))
        {
            Some((reference, c)) => {
                decoded.push(*c);
                rest = &rest[reference.len()..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}
