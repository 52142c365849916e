//! Line-oriented scanning state machine.
//!
//! The scanner turns source text into [`Token`]s, one step at a time. Each
//! step looks at the open token kind in [`ScanState`] and jumps straight to
//! the next byte that matters for that kind (`]` inside a section, `=` inside
//! a key, the newline everywhere else). Decisions that depend on where a line
//! starts (sections, comments, keys, and both continuation rules) are taken
//! once, on the first byte after a line's leading blanks.
//!
//! # Continuations
//!
//! - A value line ending in an odd run of backslashes sets
//!   `escaped_for`; the next non-comment line continues the value no matter
//!   how it starts.
//! - In the mkosi dialect, every value line sets `value_may_not_end` to 1.
//!   Blank and comment lines after it keep the decision open. The first
//!   content line continues the value if it is indented and starts a new
//!   entry otherwise.
//!
//! Continuation tokens start at column 0 so they carry their indentation.

use tracing::trace;

use crate::cursor::{is_blank, Cursor};
use crate::forecast::forecast;
use crate::{Dialect, Location, Range, ScanState, Token, TokenKind, Tokenized};

/// Scanner over `src[..limit]`.
pub(crate) struct Scanner<'a> {
    cursor: Cursor<'a>,
    dialect: Dialect,
    state: ScanState,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner that continues from `state` at `at`, appending to
    /// `tokens`.
    pub(crate) fn new(
        src: &'a str,
        limit: usize,
        dialect: Dialect,
        state: ScanState,
        at: Location,
        tokens: Vec<Token>,
    ) -> Self {
        Scanner {
            cursor: Cursor::new(src, limit, at),
            dialect,
            state,
            tokens,
        }
    }

    /// Scan up to the limit.
    pub(crate) fn run(&mut self) {
        while self.step() {}
    }

    /// Scan until a step emits a token matching `stop`, or the limit.
    pub(crate) fn run_until(&mut self, stop: impl Fn(&Token) -> bool) {
        loop {
            let emitted = self.tokens.len();
            if !self.step() || self.tokens[emitted..].iter().any(&stop) {
                return;
            }
        }
    }

    /// Flush the token still open at the limit and compute the forecast.
    ///
    /// The state keeps the open token, so a later scan can pick it up again.
    pub(crate) fn finish(mut self) -> Tokenized {
        let end = self.cursor.loc();
        if self.state.kind != TokenKind::None {
            self.emit(self.state.kind, self.state.from, end);
        }
        let forecast = forecast(&self.state, self.cursor.previous(), self.cursor.lookahead());
        trace!(
            tokens = self.tokens.len(),
            %forecast,
            offset = end.offset,
            "scan finished"
        );
        Tokenized {
            tokens: self.tokens,
            forecast,
            state: self.state,
            end,
        }
    }

    /// Advance past the next interesting point. Returns `false` at the limit.
    fn step(&mut self) -> bool {
        let Some(byte) = self.cursor.current() else {
            return false;
        };
        if byte == b'\n' {
            self.end_line();
            return true;
        }
        match self.state.kind {
            TokenKind::None => self.line_start(byte),
            TokenKind::Section => self.section(),
            TokenKind::DirectiveKey => self.directive_key(),
            TokenKind::DirectiveValue | TokenKind::Unknown => self.line_tail(),
            // An assignment is emitted whole and never left open.
            TokenKind::Comment | TokenKind::Assignment => self.cursor.eat_until_newline_or_eof(),
        }
        true
    }

    // ─── Line starts ────────────────────────────────────────────────────

    fn line_start(&mut self, byte: u8) {
        if is_blank(byte) {
            if !self.state.passed_leading_blank {
                self.state.passed_leading_blank = true;
                self.bump_pending_value();
            }
            self.cursor.eat_blanks();
            return;
        }

        let at = self.cursor.loc();
        let is_comment = matches!(byte, b'#' | b';');

        if self.state.escaped_for != TokenKind::None {
            if is_comment {
                self.interlude_line();
                self.open(TokenKind::Comment, at);
            } else {
                let kind = std::mem::take(&mut self.state.escaped_for);
                self.state.value_may_not_end = 0;
                self.open(kind, at.line_start());
            }
            return;
        }

        if self.dialect.continues_on_indent() && self.state.value_may_not_end > 0 {
            if is_comment {
                self.interlude_line();
                self.open(TokenKind::Comment, at);
                return;
            }
            self.state.value_may_not_end = 0;
            if self.state.passed_leading_blank {
                self.open(TokenKind::DirectiveValue, at.line_start());
                return;
            }
        }

        match byte {
            b'[' => self.open(TokenKind::Section, at),
            b'#' | b';' => self.open(TokenKind::Comment, at),
            b'=' => self.assignment(),
            _ => self.open(TokenKind::DirectiveKey, at),
        }
    }

    /// A comment line in the middle of a continuation.
    fn interlude_line(&mut self) {
        if !self.state.passed_leading_blank {
            self.bump_pending_value();
        }
    }

    /// Count one more line that leaves an mkosi value undecided.
    fn bump_pending_value(&mut self) {
        if self.dialect.continues_on_indent() && self.state.value_may_not_end > 0 {
            self.state.value_may_not_end = self.state.value_may_not_end.saturating_add(1);
        }
    }

    // ─── Open tokens ────────────────────────────────────────────────────

    fn section(&mut self) {
        if self.cursor.eat_until_or_newline(b']') == Some(b']') {
            self.cursor.advance(1);
            let end = self.cursor.loc();
            self.emit(TokenKind::Section, self.state.from, end);
            // Whatever else is on the line is free text.
            self.open(TokenKind::Unknown, end);
        }
    }

    fn directive_key(&mut self) {
        if self.cursor.eat_until_or_newline(b'=') == Some(b'=') {
            let at = self.cursor.loc();
            self.emit(TokenKind::DirectiveKey, self.state.from, at);
            self.assignment();
        }
    }

    /// Emit the `=` at the cursor and open the value after it.
    fn assignment(&mut self) {
        let at = self.cursor.loc();
        self.cursor.advance(1);
        let after = self.cursor.loc();
        self.emit(TokenKind::Assignment, at, after);
        self.open(TokenKind::DirectiveValue, after);
    }

    /// Rest of a value or unknown run. Blanks before its first byte belong
    /// to no token.
    fn line_tail(&mut self) {
        if self.state.from == self.cursor.loc() {
            self.cursor.eat_blanks();
            self.state.from = self.cursor.loc();
        }
        self.cursor.eat_until_newline_or_eof();
    }

    // ─── Line ends ──────────────────────────────────────────────────────

    fn end_line(&mut self) {
        let from = self.state.from;
        let mut end = self.cursor.loc();
        if self.cursor.previous() == Some(b'\r') && end.offset > from.offset {
            end = end.retreat(1);
        }

        match self.state.kind {
            TokenKind::None => {
                // Blank line: ends a backslash continuation.
                self.state.escaped_for = TokenKind::None;
                if !self.state.passed_leading_blank {
                    self.bump_pending_value();
                }
            }
            TokenKind::DirectiveValue => {
                let escaped = self
                    .emit(TokenKind::DirectiveValue, from, end)
                    .is_some_and(|token| ends_with_escape(&token.text));
                self.state.escaped_for = if escaped {
                    TokenKind::DirectiveValue
                } else {
                    TokenKind::None
                };
                if self.dialect.continues_on_indent() {
                    self.state.value_may_not_end = 1;
                }
            }
            kind => {
                self.emit(kind, from, end);
            }
        }

        self.cursor.newline();
        self.state.passed_leading_blank = false;
        self.open(TokenKind::None, self.cursor.loc());
    }

    // ─── Emission ───────────────────────────────────────────────────────

    fn open(&mut self, kind: TokenKind, from: Location) {
        self.state.kind = kind;
        self.state.from = from;
    }

    /// Push a token for `[from, to)`. Empty ranges produce nothing.
    fn emit(&mut self, kind: TokenKind, from: Location, to: Location) -> Option<&Token> {
        if to.offset <= from.offset {
            return None;
        }
        let text = self.cursor.slice(from, to);
        self.tokens.push(Token::new(kind, Range::new(from, to), text));
        self.tokens.last()
    }
}

/// Whether `text` ends in an odd number of backslashes, i.e. its last
/// backslash escapes the line break that follows.
pub fn ends_with_escape(text: &str) -> bool {
    let trailing = text.bytes().rev().take_while(|&b| b == b'\\').count();
    trailing % 2 == 1
}
