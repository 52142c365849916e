//! Directive extraction from a whole document's tokens.
//!
//! A single forward pass groups the token stream into `key[=value]`
//! records, each tagged with the section header it appears under.

use tracing::debug;
use unit_lexer::{Dialect, Range, Token, TokenKind};

use crate::value::reconstruct;

/// One `key[=value]` entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directive {
    /// Raw text of the enclosing section header, brackets included, even if
    /// the header is unterminated. `None` before the first header.
    pub section: Option<String>,
    /// Key with surrounding whitespace trimmed. Empty for a line that starts
    /// with `=`.
    pub key: String,
    /// Folded value. `None` if the key has no `=`, `Some("")` if nothing
    /// follows it.
    pub value: Option<String>,
    pub key_range: Option<Range>,
    pub value_ranges: Vec<Range>,
}

/// A directive whose value may still grow.
struct Open<'t> {
    directive: Directive,
    assigned: bool,
    values: Vec<&'t Token>,
}

impl<'t> Open<'t> {
    fn new(section: Option<&str>, key: Option<&Token>) -> Self {
        Open {
            directive: Directive {
                section: section.map(str::to_owned),
                key: key.map_or_else(String::new, |key| key.text.trim().to_owned()),
                key_range: key.map(|key| key.range),
                ..Directive::default()
            },
            assigned: false,
            values: Vec::new(),
        }
    }

    /// Whether `assignment` is the `=` right after this directive's key.
    fn takes(&self, assignment: &Token) -> bool {
        !self.assigned
            && self
                .directive
                .key_range
                .is_some_and(|key| key.to == assignment.from())
    }

    fn finish(self, dialect: Dialect) -> Directive {
        let mut directive = self.directive;
        if self.assigned {
            let folded = reconstruct(self.values, dialect);
            directive.value = Some(folded.value);
            directive.value_ranges = folded.ranges;
        }
        directive
    }
}

/// Extract every directive from the tokens of a complete document.
///
/// `tokens` should come from a full scan in `dialect`; a prefix scan yields
/// the directives of the prefix, with the last one possibly cut short.
pub fn extract_directives(tokens: &[Token], dialect: Dialect) -> Vec<Directive> {
    let mut directives = Vec::new();
    let mut section: Option<&str> = None;
    let mut open: Option<Open<'_>> = None;

    for token in tokens {
        match token.kind {
            TokenKind::Section => {
                directives.extend(open.take().map(|open| open.finish(dialect)));
                section = Some(token.text.as_str());
            }
            TokenKind::DirectiveKey => {
                directives.extend(open.take().map(|open| open.finish(dialect)));
                open = Some(Open::new(section, Some(token)));
            }
            TokenKind::Assignment => {
                if let Some(current) = open.as_mut().filter(|current| current.takes(token)) {
                    current.assigned = true;
                } else {
                    // `=` at the start of a line: a directive with no key.
                    directives.extend(open.take().map(|open| open.finish(dialect)));
                    let mut keyless = Open::new(section, None);
                    keyless.assigned = true;
                    open = Some(keyless);
                }
            }
            TokenKind::DirectiveValue => {
                if let Some(current) = open.as_mut().filter(|current| current.assigned) {
                    current.values.push(token);
                }
            }
            TokenKind::Comment | TokenKind::Unknown | TokenKind::None => {}
        }
    }
    directives.extend(open.map(|open| open.finish(dialect)));

    debug!(
        tokens = tokens.len(),
        directives = directives.len(),
        %dialect,
        "extracted directives"
    );
    directives
}
