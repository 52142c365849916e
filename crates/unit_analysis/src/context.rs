//! What the user is typing at a cursor position.
//!
//! [`CursorContext`] is bound to one document. Each query tokenizes the text
//! up to the cursor, reusing the tokens of the furthest query so far, and
//! classifies the position from the scan's forecast:
//!
//! | forecast                       | `complete`       | looked up          |
//! |--------------------------------|------------------|--------------------|
//! | `comment`, `unknown`           | same             | nothing            |
//! | `section`                      | `section`        | nothing            |
//! | `none`, `directiveKey`         | `directiveKey`   | section            |
//! | `assignment`, `directiveValue` | same             | section, key       |
//!
//! A value position also reports the whole logical value under the cursor,
//! including the part after it.

use tracing::debug;
use unit_lexer::{
    scan_value_tail, tokenize_prefix, Dialect, Location, Range, Token, TokenKind, Tokenized,
    TokenizeOptions,
};

use crate::error::ContextError;
use crate::value::{reconstruct, LogicalValue};

/// A section header or key enclosing the cursor.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enclosing {
    /// Raw token text: brackets included for sections, trailing blanks
    /// included for keys.
    pub name: String,
    pub range: Range,
}

impl Enclosing {
    fn of(token: &Token) -> Self {
        Enclosing {
            name: token.text.clone(),
            range: token.range,
        }
    }
}

/// Classification of a cursor position.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
    /// Kind of token the text at the cursor would complete.
    pub complete: TokenKind,
    /// Start of the token the cursor is inside, if one has started.
    pub from: Option<Location>,
    pub section: Option<Enclosing>,
    pub key: Option<Enclosing>,
    /// Only for `complete == DirectiveValue`.
    pub value: Option<LogicalValue>,
}

impl Context {
    fn only(complete: TokenKind) -> Self {
        Context {
            complete,
            ..Context::default()
        }
    }
}

/// Enclosing tokens a position needs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Lookup {
    Nothing,
    Section,
    SectionAndKey,
}

/// Tokens of the furthest query so far.
struct Cache {
    offset: usize,
    tokens: Vec<Token>,
}

/// Cursor-context resolver for one document.
///
/// Queries are cheapest when issued with non-decreasing offsets, as an
/// editor does while the user types. A query before the cached offset is
/// answered from a fresh scan and leaves the cache alone.
pub struct CursorContext {
    text: String,
    dialect: Dialect,
    cache: Option<Cache>,
}

impl CursorContext {
    /// Create a resolver for `text`.
    pub fn new(text: impl Into<String>, dialect: Dialect) -> Self {
        CursorContext {
            text: text.into(),
            dialect,
            cache: None,
        }
    }

    /// The document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Classify the position at byte `offset`.
    pub fn context_at(&mut self, offset: usize) -> Result<Context, ContextError> {
        if offset > self.text.len() {
            return Err(ContextError::OutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(ContextError::NotCharBoundary { offset });
        }

        let monotonic = !matches!(&self.cache, Some(cache) if offset < cache.offset);
        let previous = match &self.cache {
            Some(cache) if monotonic => {
                debug!(offset, cached = cache.offset, "reusing cached tokens");
                Some(cache.tokens.as_slice())
            }
            Some(cache) => {
                debug!(
                    offset,
                    cached = cache.offset,
                    "cursor moved back, scanning from start"
                );
                None
            }
            None => None,
        };

        let mut options = TokenizeOptions::new(self.dialect);
        options.previous = previous;
        let scanned = tokenize_prefix(&self.text, offset, &options);
        let context = self.resolve(&scanned);

        if monotonic {
            debug!(offset, tokens = scanned.tokens.len(), "advancing cache");
            self.cache = Some(Cache {
                offset,
                tokens: scanned.tokens,
            });
        }
        Ok(context)
    }

    fn resolve(&self, scanned: &Tokenized) -> Context {
        let (complete, lookup) = match scanned.forecast {
            TokenKind::Comment | TokenKind::Unknown => return Context::only(scanned.forecast),
            TokenKind::Section => (TokenKind::Section, Lookup::Nothing),
            TokenKind::None | TokenKind::DirectiveKey => (TokenKind::DirectiveKey, Lookup::Section),
            TokenKind::Assignment | TokenKind::DirectiveValue => {
                (scanned.forecast, Lookup::SectionAndKey)
            }
        };

        let tokens = &scanned.tokens;
        let mut context = Context {
            complete,
            from: tokens
                .last()
                .filter(|last| last.kind == scanned.forecast)
                .map(Token::from),
            ..Context::default()
        };
        if lookup == Lookup::Nothing {
            return context;
        }

        let walk = walk_back(tokens, lookup == Lookup::SectionAndKey);
        context.section = walk.section;
        context.key = walk.key;
        if complete == TokenKind::DirectiveValue {
            context.value = Some(self.finish_value(scanned, walk.values));
        }
        context
    }

    /// Complete the value tokens before the cursor with the rest of the
    /// value after it, then fold them.
    fn finish_value(&self, scanned: &Tokenized, mut values: Vec<&Token>) -> LogicalValue {
        let tail = scan_value_tail(&self.text, self.dialect, scanned);
        // The tail restarts the token cut off at the cursor.
        if let (Some(first), Some(last)) = (tail.first(), values.last()) {
            if first.from() == last.from() {
                values.pop();
            }
        }
        reconstruct(values.into_iter().chain(&tail), self.dialect)
    }
}

/// Result of walking from the cursor back toward the document start.
struct Walk<'t> {
    section: Option<Enclosing>,
    key: Option<Enclosing>,
    /// Value tokens between the key and the cursor, in source order.
    values: Vec<&'t Token>,
}

/// Find the enclosing section (and key, if `wants_key`) of the position after
/// the last of `tokens`.
///
/// The key search ends at the first `=` passed: the key is then the token
/// right before it, or there is none for a line that starts with `=`.
fn walk_back(tokens: &[Token], wants_key: bool) -> Walk<'_> {
    let mut walk = Walk {
        section: None,
        key: None,
        values: Vec::new(),
    };
    let mut need_section = true;
    let mut need_key = wants_key;

    for (index, token) in tokens.iter().enumerate().rev() {
        if !need_section && !need_key {
            break;
        }
        match token.kind {
            TokenKind::Section if need_section => {
                walk.section = Some(Enclosing::of(token));
                need_section = false;
            }
            TokenKind::DirectiveKey if need_key => {
                walk.key = Some(Enclosing::of(token));
                need_key = false;
            }
            TokenKind::DirectiveValue if need_key => walk.values.push(token),
            TokenKind::Assignment if need_key => {
                walk.key = index
                    .checked_sub(1)
                    .and_then(|before| tokens.get(before))
                    .filter(|key| key.kind == TokenKind::DirectiveKey && key.to() == token.from())
                    .map(Enclosing::of);
                need_key = false;
            }
            _ => {}
        }
    }
    walk.values.reverse();
    walk
}
