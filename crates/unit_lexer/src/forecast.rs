//! Classification of the token being typed at the end of a scanned prefix.
//!
//! The forecast is computed from the final [`ScanState`] alone, plus the byte
//! just before the end of the scan and the character just after it. It never
//! re-scans text.

use crate::cursor::is_blank;
use crate::{ScanState, TokenKind};

/// Predict the kind of token under construction at the end of a scan.
///
/// - A pending backslash continuation forecasts the escaped kind.
/// - An undecided mkosi continuation forecasts a value.
/// - Otherwise the open kind is reported, except that a section whose last
///   byte is `]` forecasts trailing `unknown` text and a key ending in a
///   blank forecasts the `=` that probably follows.
/// - At a fresh line, `none`, unless the next character is `[`: a section is
///   about to start but is not confirmed yet, so `unknown`.
pub fn forecast(state: &ScanState, last: Option<u8>, next: Option<char>) -> TokenKind {
    if state.escaped_for != TokenKind::None {
        return state.escaped_for;
    }
    if state.value_pending() {
        return TokenKind::DirectiveValue;
    }
    match state.kind {
        TokenKind::None if next == Some('[') => TokenKind::Unknown,
        TokenKind::Section if last == Some(b']') => TokenKind::Unknown,
        TokenKind::DirectiveKey if last.is_some_and(is_blank) => TokenKind::Assignment,
        kind => kind,
    }
}

#[cfg(test)]
mod tests;
