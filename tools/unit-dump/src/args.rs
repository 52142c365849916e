//! Command-line parsing.
//!
//! ```text
//! unit-dump <tokens|directives|context> <file> [offset] [--dialect=NAME] [--json]
//! ```

use std::path::PathBuf;

use unit_lexer::Dialect;

use crate::error::DumpError;

/// What to print.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Tokens,
    Directives,
    /// Cursor context at a byte offset.
    Context { offset: usize },
}

/// A parsed command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub path: PathBuf,
    /// Explicit `--dialect`; otherwise picked from the path.
    pub dialect: Option<Dialect>,
    pub json: bool,
}

impl Invocation {
    pub fn dialect(&self) -> Dialect {
        self.dialect.unwrap_or_else(|| Dialect::for_path(&self.path))
    }
}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Invocation, DumpError> {
    let mut dialect = None;
    let mut json = false;
    let mut positional = Vec::new();

    for arg in args {
        if let Some(name) = arg.strip_prefix("--dialect=") {
            dialect = Some(name.parse::<Dialect>()?);
        } else if arg == "--json" {
            json = true;
        } else if arg.starts_with("--") {
            return Err(DumpError::usage(format!("unknown option `{arg}`")));
        } else {
            positional.push(arg.as_str());
        }
    }

    let (command, path, offset) = match positional.as_slice() {
        [command, path] => (*command, *path, None),
        [command, path, offset] => (*command, *path, Some(*offset)),
        [] => return Err(DumpError::usage("missing command")),
        [_] => return Err(DumpError::usage("missing file path")),
        _ => return Err(DumpError::usage("too many arguments")),
    };

    let command = match (command, offset) {
        ("tokens", None) => Command::Tokens,
        ("directives", None) => Command::Directives,
        ("context", Some(offset)) => Command::Context {
            offset: offset
                .parse()
                .map_err(|_| DumpError::usage(format!("invalid offset `{offset}`")))?,
        },
        ("context", None) => return Err(DumpError::usage("missing offset for `context`")),
        ("tokens" | "directives", Some(_)) => {
            return Err(DumpError::usage(format!("`{command}` takes no offset")))
        }
        _ => return Err(DumpError::usage(format!("unknown command `{command}`"))),
    };

    Ok(Invocation {
        command,
        path: PathBuf::from(path),
        dialect,
        json,
    })
}
