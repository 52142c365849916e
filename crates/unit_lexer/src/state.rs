//! Scanner state carried between scan steps and across tokenizer calls.

use crate::{Location, TokenKind};

/// Everything the scanner needs to continue from a given point.
///
/// Together with the location scanning stopped at, this is enough to resume
/// a scan without looking at any earlier text.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanState {
    /// Leading horizontal whitespace on the current line has been consumed.
    pub passed_leading_blank: bool,
    /// Kind continued onto the next line by a trailing odd run of
    /// backslashes, or [`TokenKind::None`].
    pub escaped_for: TokenKind,
    /// mkosi only: `1` right after a value line, incremented once for every
    /// blank, indented-but-empty, or comment line that follows it. From `2`
    /// on, the next content line decides whether the value continues.
    pub value_may_not_end: u8,
    /// Start of the token being accumulated.
    pub from: Location,
    /// Kind of the token being accumulated, [`TokenKind::None`] between
    /// tokens at the start of a line.
    pub kind: TokenKind,
}

impl ScanState {
    /// A fresh state with a token of `kind` open at `from`.
    pub const fn open_at(kind: TokenKind, from: Location) -> Self {
        ScanState {
            passed_leading_blank: false,
            escaped_for: TokenKind::None,
            value_may_not_end: 0,
            from,
            kind,
        }
    }

    /// Whether the next content line may still continue the last value.
    #[inline]
    pub const fn value_pending(&self) -> bool {
        self.value_may_not_end >= 2
    }
}
