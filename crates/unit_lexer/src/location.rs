//! Source positions and ranges.
//!
//! A [`Location`] carries three coordinates at once: the absolute byte
//! offset, the zero-based line, and the zero-based byte column within that
//! line. The scanner only ever moves all three together, which is what makes
//! it possible to resume a scan from a location recorded in an earlier token.

use std::fmt;

/// A position in the source text.
///
/// Offsets and columns are UTF-8 byte counts.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Byte offset from the start of the text.
    pub offset: u32,
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based byte column within `line`.
    pub column: u32,
}

impl Location {
    /// The start of any document.
    pub const START: Location = Location {
        offset: 0,
        line: 0,
        column: 0,
    };

    /// Create a location from its three coordinates.
    #[inline]
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Location {
            offset,
            line,
            column,
        }
    }

    /// Move forward `n` bytes on the same line.
    #[inline]
    #[must_use]
    pub const fn advance(self, n: u32) -> Location {
        Location {
            offset: self.offset + n,
            line: self.line,
            column: self.column + n,
        }
    }

    /// Move back `n` bytes on the same line.
    ///
    /// `n` must not exceed `column`.
    #[inline]
    #[must_use]
    pub const fn retreat(self, n: u32) -> Location {
        Location {
            offset: self.offset - n,
            line: self.line,
            column: self.column - n,
        }
    }

    /// Step over a `\n` at this location.
    #[inline]
    #[must_use]
    pub const fn next_line(self) -> Location {
        Location {
            offset: self.offset + 1,
            line: self.line + 1,
            column: 0,
        }
    }

    /// The first column of this location's line.
    #[inline]
    #[must_use]
    pub const fn line_start(self) -> Location {
        self.retreat(self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Half-open range `[from, to)` between two locations.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub from: Location,
    pub to: Location,
}

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(from: Location, to: Location) -> Self {
        Range { from, to }
    }

    /// Length of the range in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.to.offset - self.from.offset
    }

    /// Check if the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.from.offset == self.to.offset
    }

    /// Check if an offset is within this range.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.from.offset && offset < self.to.offset
    }

    /// Convert to a `std::ops::Range` of byte offsets.
    #[inline]
    pub fn to_offsets(&self) -> std::ops::Range<usize> {
        self.from.offset as usize..self.to.offset as usize
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}
