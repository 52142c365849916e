//! Incremental, dialect-aware tokenizer for systemd unit files and mkosi
//! configuration.
//!
//! The tokenizer works on whole documents and on document prefixes (the
//! text up to an editing cursor). Alongside the tokens it reports a
//! *forecast*: the kind of token being typed at the end of the scanned text.
//! Passing the tokens of an earlier scan back in lets it skip everything
//! before the last directive key it can still trust.
//!
//! # Design
//!
//! - **Flat output**: a document is an ordered list of [`Token`]s. A value
//!   spanning several physical lines yields one `DirectiveValue` token per
//!   line; folding them is left to the caller.
//! - **Errors as data**: unterminated sections, keys without `=`, and stray
//!   text are all tokens. Nothing in this crate fails.
//! - **Explicit state**: resume information travels in [`ScanState`] and
//!   [`Tokenized`] values owned by the caller, never in globals.

mod cursor;
mod dialect;
mod forecast;
mod location;
mod resume;
mod scanner;
mod state;
mod token;

use tracing::trace;

pub use dialect::{Dialect, DialectError};
pub use forecast::forecast;
pub use location::{Location, Range};
pub use resume::{resume_point, ResumePoint};
pub use scanner::ends_with_escape;
pub use state::ScanState;
pub use token::{Token, TokenKind};

use scanner::Scanner;

/// Options for a tokenizer call.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenizeOptions<'a> {
    /// Continuation rules to apply.
    pub dialect: Dialect,
    /// Tokens from an earlier scan of the same document, used to skip
    /// re-scanning everything before the last trustworthy directive key.
    pub previous: Option<&'a [Token]>,
    /// Keep only the single token before the resume point instead of the
    /// whole prefix. Callers that only look at the last token before the
    /// cursor use this to avoid copying the document's tokens.
    pub only_last_token: bool,
}

impl<'a> TokenizeOptions<'a> {
    /// Options for a full scan in `dialect`.
    pub const fn new(dialect: Dialect) -> Self {
        TokenizeOptions {
            dialect,
            previous: None,
            only_last_token: false,
        }
    }

    /// Resume from the tokens of an earlier scan.
    #[must_use]
    pub fn with_previous(mut self, previous: &'a [Token]) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Keep only the last token before the resume point.
    #[must_use]
    pub fn only_last_token(mut self) -> Self {
        self.only_last_token = true;
        self
    }
}

/// Result of a tokenizer call.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tokenized {
    /// Tokens in strictly increasing, non-overlapping order. The last one may
    /// still be open (see `state`).
    pub tokens: Vec<Token>,
    /// Kind of the token being typed at `end`.
    pub forecast: TokenKind,
    /// Scanner state at `end`.
    pub state: ScanState,
    /// Where scanning stopped.
    pub end: Location,
}

/// Tokenize all of `text`.
pub fn tokenize(text: &str, options: &TokenizeOptions<'_>) -> Tokenized {
    tokenize_prefix(text, text.len(), options)
}

/// Tokenize `text[..end]`.
///
/// The first character of `text[end..]`, if any, is the forecast's
/// lookahead; nothing else past `end` is read.
///
/// # Panics
///
/// Panics if `end` is past the end of `text` or not on a character boundary.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets are u32; documents past 4 GiB are unsupported"
)]
pub fn tokenize_prefix(text: &str, end: usize, options: &TokenizeOptions<'_>) -> Tokenized {
    assert!(
        text.is_char_boundary(end),
        "tokenize end {end} is not a character boundary of a {}-byte text",
        text.len()
    );

    let resumed = options
        .previous
        .and_then(|previous| resume_point(previous, end as u32, options.only_last_token));
    let (tokens, state) = match resumed {
        Some(point) => {
            trace!(offset = point.state.from.offset, "resuming scan at directive key");
            (point.tokens, point.state)
        }
        None => (Vec::new(), ScanState::default()),
    };

    let mut scanner = Scanner::new(text, end, options.dialect, state, state.from, tokens);
    scanner.run();
    scanner.finish()
}

/// Continue a prefix scan over the rest of `text` until the directive value
/// open at the prefix end is finished.
///
/// `scanned` must come from [`tokenize_prefix`] on the same `text`. Returns
/// the value and comment tokens that follow, starting with the completed
/// form of the value token cut off at the prefix end, if there was one.
/// Scanning stops at the first token that is neither a value nor a comment.
pub fn scan_value_tail(text: &str, dialect: Dialect, scanned: &Tokenized) -> Vec<Token> {
    let in_value =
        |token: &Token| matches!(token.kind, TokenKind::DirectiveValue | TokenKind::Comment);

    let mut scanner = Scanner::new(
        text,
        text.len(),
        dialect,
        scanned.state,
        scanned.end,
        Vec::new(),
    );
    scanner.run_until(|token| !in_value(token));
    let mut tokens = scanner.finish().tokens;
    if let Some(stop) = tokens.iter().position(|token| !in_value(token)) {
        tokens.truncate(stop);
    }
    tokens
}
