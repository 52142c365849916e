//! Consumers of the unit-file token stream.
//!
//! - [`extract_directives`] turns a whole document's tokens into
//!   `section / key / value` records, for linters and dump tools.
//! - [`CursorContext`] answers "what is being typed here, and under which
//!   section and key" for one open document, for completion and hover.
//! - [`reconstruct`] folds the per-line tokens of a continued value into
//!   the value systemd or mkosi would see. Both of the above use it.
//!
//! Everything here works on tokens produced by [`unit_lexer`] and shares
//! its [`Dialect`] switch.

mod context;
mod directives;
mod error;
mod value;

pub use context::{Context, CursorContext, Enclosing};
pub use directives::{extract_directives, Directive};
pub use error::ContextError;
pub use unit_lexer::Dialect;
pub use value::{reconstruct, LogicalValue};
