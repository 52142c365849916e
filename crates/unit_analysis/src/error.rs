//! Errors reported by the cursor-context resolver.

/// A cursor offset the resolver cannot place in its document.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ContextError {
    #[error("offset {offset} is past the end of the document ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },

    #[error("offset {offset} falls inside a multi-byte character")]
    NotCharBoundary { offset: usize },
}
