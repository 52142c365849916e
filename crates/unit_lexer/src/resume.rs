//! Restart points for incremental re-scans.
//!
//! The start of a directive key is the one position whose scanner state does
//! not depend on anything before it: no backslash continuation can be
//! pending there, and in the mkosi dialect the line it starts on has already
//! decided that the previous value ended. Re-scanning from the last such
//! position reproduces a full scan, so the work of a re-scan is bounded by
//! the distance from the nearest preceding key to the end of the text.

use tracing::trace;

use crate::{ScanState, Token, TokenKind};

/// Where a re-scan can start, and the tokens that precede it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResumePoint {
    /// Tokens before the restart key (or only the last of them).
    pub tokens: Vec<Token>,
    /// State with the restart key open at its start.
    pub state: ScanState,
}

/// Find the last directive key in `previous` that ends within
/// `source_len` bytes.
///
/// `previous` must come from a scan of text that agrees with the text about
/// to be scanned up to that key. Returns `None` if there is no such key, in
/// which case the caller scans from scratch.
pub fn resume_point(
    previous: &[Token],
    source_len: u32,
    only_last_token: bool,
) -> Option<ResumePoint> {
    let index = previous.iter().rposition(|token| {
        token.kind == TokenKind::DirectiveKey && token.to().offset <= source_len
    })?;
    let key = &previous[index];

    let kept = if only_last_token {
        &previous[index.saturating_sub(1)..index]
    } else {
        &previous[..index]
    };
    trace!(
        index,
        kept = kept.len(),
        offset = key.from().offset,
        "found resume point"
    );

    let mut state = ScanState::open_at(TokenKind::DirectiveKey, key.from());
    // Keys open on the first non-blank byte of their line.
    state.passed_leading_blank = key.from().column > 0;

    Some(ResumePoint {
        tokens: kept.to_vec(),
        state,
    })
}
