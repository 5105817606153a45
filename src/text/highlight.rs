use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::core::Rgba8;

/// Whitespace runs and single punctuation characters; both become their own fragments.
static SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+|[()\[\]{},.:=+\-*/<>]").expect("split regex is valid"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.?[0-9]*$").expect("number regex is valid"));

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^["'].*["']$"#).expect("string regex is valid"));

const KEYWORDS: &[&str] = &[
    "def", "class", "return", "import", "from", "if", "else", "elif", "for", "in", "while",
    "with", "as", "assert", "try", "except", "raise", "pass", "break", "continue", "and", "or",
    "not", "is", "lambda", "yield", "global", "nonlocal", "async", "await",
];

const CONSTANTS: &[&str] = &["None", "True", "False", "self"];

/// Colour class of one source fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    Constant,
    Number,
    String,
    Comment,
    Decorator,
    Plain,
}

impl TokenKind {
    /// Dark editor palette.
    pub fn color(self) -> Rgba8 {
        match self {
            Self::Keyword => Rgba8::rgb(0xc5, 0x86, 0xc0),
            Self::Constant => Rgba8::rgb(0x56, 0x9c, 0xd6),
            Self::Number => Rgba8::rgb(0xb5, 0xce, 0xa8),
            Self::String => Rgba8::rgb(0xce, 0x91, 0x78),
            Self::Comment => Rgba8::rgb(0x6a, 0x99, 0x55),
            Self::Decorator => Rgba8::rgb(0xdc, 0xdc, 0xaa),
            Self::Plain => Rgba8::rgb(0xd4, 0xd4, 0xd4),
        }
    }
}

type Rule = (fn(&str) -> bool, TokenKind);

/// Evaluated top to bottom; the first predicate that holds decides the kind.
const RULES: &[Rule] = &[
    (|w| KEYWORDS.contains(&w), TokenKind::Keyword),
    (|w| CONSTANTS.contains(&w), TokenKind::Constant),
    (|w| NUMBER.is_match(w), TokenKind::Number),
    (|w| QUOTED.is_match(w), TokenKind::String),
    (|w| w.starts_with('#'), TokenKind::Comment),
    (|w| w.starts_with('@'), TokenKind::Decorator),
];

/// One classified fragment of a source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

fn kind_of(fragment: &str) -> TokenKind {
    RULES
        .iter()
        .find(|(pred, _)| pred(fragment))
        .map_or(TokenKind::Plain, |(_, kind)| *kind)
}

/// Split `line` into fragments and colour each one.
///
/// Fragments keep whitespace and punctuation verbatim, so concatenating the token texts
/// gives back `line`. Classification looks at one fragment at a time: a quoted string
/// containing a space is split, and only fragments that are themselves quoted get
/// [`TokenKind::String`].
pub fn classify(line: &str) -> Vec<Token<'_>> {
    fn token(text: &str) -> Token<'_> {
        Token {
            text,
            kind: kind_of(text),
        }
    }

    let mut out = Vec::new();
    let mut last = 0;
    for m in SPLIT.find_iter(line) {
        if m.start() > last {
            out.push(token(&line[last..m.start()]));
        }
        out.push(token(m.as_str()));
        last = m.end();
    }
    if last < line.len() {
        out.push(token(&line[last..]));
    }
    out
}

/// Classify each line of `code`.
pub fn highlight_block(code: &str) -> Vec<Vec<Token<'_>>> {
    code.split('\n').map(classify).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/highlight.rs"]
mod tests;
