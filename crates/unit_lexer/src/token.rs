//! Token model.

use std::fmt;

use crate::{Location, Range};

/// Kind of a scanned token.
///
/// [`TokenKind::None`] never appears on an emitted token. It is the forecast
/// placeholder meaning "nothing has started yet", and the scanner's open kind
/// at the start of a fresh line.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TokenKind {
    #[default]
    None,
    /// `# ...` or `; ...` up to the end of the line.
    Comment,
    /// `[Name]`, or an unterminated `[Name`.
    Section,
    /// Everything before the first `=` on a directive line.
    DirectiveKey,
    /// The `=` separating a key from its value.
    Assignment,
    /// One physical line's worth of a directive value.
    DirectiveValue,
    /// Trailing text after a closed section header.
    Unknown,
}

impl TokenKind {
    /// Human-readable name used in debug dumps.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::None => "none",
            TokenKind::Comment => "comment",
            TokenKind::Section => "section",
            TokenKind::DirectiveKey => "directiveKey",
            TokenKind::Assignment => "assignment",
            TokenKind::DirectiveValue => "directiveValue",
            TokenKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A scanned token.
///
/// `text` is the raw source slice the scanner consumed. It is captured at
/// scan time so a token stays meaningful without its source.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range,
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, range: Range, text: impl Into<String>) -> Self {
        Token {
            kind,
            range,
            text: text.into(),
        }
    }

    /// Start of the token.
    #[inline]
    pub fn from(&self) -> Location {
        self.range.from
    }

    /// End of the token (exclusive).
    #[inline]
    pub fn to(&self) -> Location {
        self.range.to
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} {:?}", self.kind, self.range, self.text)
    }
}
