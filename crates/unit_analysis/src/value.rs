//! Joining the physical lines of a directive value.
//!
//! The scanner emits one `DirectiveValue` token per physical line. Folding
//! them into the value a consumer actually sees depends on the dialect:
//!
//! - systemd concatenates the lines, consuming each backslash that escaped a
//!   line break.
//! - mkosi keeps backslashes, strips the indentation that marked a line as a
//!   continuation, and joins the lines with `\n`.
//!
//! Comment lines inside a value never contribute to it.

use unit_lexer::{ends_with_escape, Dialect, Range, Token, TokenKind};

/// A directive value with its continuation lines folded together.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogicalValue {
    pub value: String,
    /// Ranges of the value tokens that contributed, in source order.
    pub ranges: Vec<Range>,
}

/// Fold the `DirectiveValue` tokens among `tokens` into one logical value.
///
/// Tokens of any other kind are skipped.
pub fn reconstruct<'t>(
    tokens: impl IntoIterator<Item = &'t Token>,
    dialect: Dialect,
) -> LogicalValue {
    let mut folded = LogicalValue::default();
    let values = tokens
        .into_iter()
        .filter(|token| token.kind == TokenKind::DirectiveValue);

    for token in values {
        match dialect {
            Dialect::Systemd => {
                // Another line follows, so a trailing escape was a join point.
                if ends_with_escape(&folded.value) {
                    folded.value.pop();
                }
                folded.value.push_str(&token.text);
            }
            Dialect::Mkosi => {
                if !folded.ranges.is_empty() {
                    folded.value.push('\n');
                }
                folded.value.push_str(strip_indent(token));
            }
        }
        folded.ranges.push(token.range);
    }
    folded
}

/// Text of `token` without the indentation of a continuation line. A token
/// that does not start its line is the first line of the value and is kept
/// as is.
fn strip_indent(token: &Token) -> &str {
    if token.from().column == 0 {
        token.text.trim_start_matches([' ', '\t'])
    } else {
        &token.text
    }
}
