//! Location-tracking cursor over a bounded byte slice.
//!
//! The cursor walks the source a byte at a time or jumps ahead with
//! memchr-accelerated searches. Every movement updates the full
//! [`Location`] triple, so the position can be handed back to the caller and
//! used to resume scanning later.
//!
//! All structural bytes of the grammar (`[`, `]`, `=`, `#`, `;`, `\`, `\n`,
//! blanks) are ASCII, so any position the cursor stops on that was reached by
//! searching for one of them is also a UTF-8 character boundary.

use crate::Location;

/// Horizontal whitespace: space, tab, and a carriage return not followed by
/// a newline.
#[inline]
pub(crate) fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}

/// Cursor over `src[..limit]`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    /// Scanning never reads at or past this offset.
    limit: usize,
    loc: Location,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at `loc`, bounded by `limit`.
    ///
    /// `limit` must not exceed `src.len()` and must be a character boundary.
    pub(crate) fn new(src: &'a str, limit: usize, loc: Location) -> Self {
        debug_assert!(limit <= src.len(), "limit {limit} exceeds source length");
        debug_assert!(
            loc.offset as usize <= limit,
            "start {} lies past limit {limit}",
            loc.offset
        );
        Cursor { src, limit, loc }
    }

    /// Current location.
    #[inline]
    pub(crate) fn loc(&self) -> Location {
        self.loc
    }

    #[inline]
    fn pos(&self) -> usize {
        self.loc.offset as usize
    }

    /// Returns `true` once the cursor has reached the limit.
    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos() >= self.limit
    }

    /// The byte at the cursor, or `None` at the limit.
    #[inline]
    pub(crate) fn current(&self) -> Option<u8> {
        if self.is_eof() {
            None
        } else {
            Some(self.src.as_bytes()[self.pos()])
        }
    }

    /// The byte just before the cursor, if any.
    #[inline]
    pub(crate) fn previous(&self) -> Option<u8> {
        self.pos()
            .checked_sub(1)
            .map(|prev| self.src.as_bytes()[prev])
    }

    /// The first character at or after the limit.
    ///
    /// This is the lookahead the forecast consults; it lies outside the
    /// scanned region.
    pub(crate) fn lookahead(&self) -> Option<char> {
        self.src[self.limit..].chars().next()
    }

    /// Advance `n` bytes on the current line.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source offsets are u32; documents past 4 GiB are unsupported"
    )]
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.pos() + n <= self.limit, "advance past limit");
        self.loc = self.loc.advance(n as u32);
    }

    /// Step over the `\n` at the cursor.
    #[inline]
    pub(crate) fn newline(&mut self) {
        debug_assert_eq!(self.current(), Some(b'\n'));
        self.loc = self.loc.next_line();
    }

    /// Advance past horizontal whitespace. Returns the number of bytes eaten.
    pub(crate) fn eat_blanks(&mut self) -> usize {
        let rest = &self.src.as_bytes()[self.pos()..self.limit];
        let n = rest.iter().take_while(|&&b| is_blank(b)).count();
        self.advance(n);
        n
    }

    /// Advance to the next `\n` or to the limit.
    pub(crate) fn eat_until_newline_or_eof(&mut self) {
        let rest = &self.src.as_bytes()[self.pos()..self.limit];
        let n = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
        self.advance(n);
    }

    /// Advance to the next `delim` or `\n`, or to the limit.
    ///
    /// Returns the byte found, or `None` at the limit.
    pub(crate) fn eat_until_or_newline(&mut self, delim: u8) -> Option<u8> {
        let rest = &self.src.as_bytes()[self.pos()..self.limit];
        match memchr::memchr2(delim, b'\n', rest) {
            Some(n) => {
                self.advance(n);
                Some(rest[n])
            }
            None => {
                self.advance(rest.len());
                None
            }
        }
    }

    /// Source text between two offsets.
    #[inline]
    pub(crate) fn slice(&self, from: Location, to: Location) -> &'a str {
        &self.src[from.offset as usize..to.offset as usize]
    }
}

#[cfg(test)]
mod tests;
