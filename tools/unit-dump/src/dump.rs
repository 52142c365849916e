//! The three dump commands.

use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;
use unit_analysis::{extract_directives, Context, CursorContext, Directive};
use unit_lexer::{tokenize, Dialect, Tokenized, TokenizeOptions};

use crate::args::{Command, Invocation};
use crate::error::DumpError;

/// Run `invocation` and return what to print.
pub fn run(invocation: &Invocation) -> Result<String, DumpError> {
    let text = read_file(&invocation.path)?;
    let dialect = invocation.dialect();
    debug!(path = %invocation.path.display(), %dialect, bytes = text.len(), "dumping");
    render(invocation.command, &text, dialect, invocation.json)
}

fn read_file(path: &Path) -> Result<String, DumpError> {
    std::fs::read_to_string(path).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Run `command` over `text`.
pub fn render(
    command: Command,
    text: &str,
    dialect: Dialect,
    json: bool,
) -> Result<String, DumpError> {
    match command {
        Command::Tokens => {
            let scanned = tokenize(text, &TokenizeOptions::new(dialect));
            if json {
                return Ok(serde_json::to_string_pretty(&scanned)?);
            }
            Ok(format_tokens(&scanned, dialect))
        }
        Command::Directives => {
            let scanned = tokenize(text, &TokenizeOptions::new(dialect));
            let directives = extract_directives(&scanned.tokens, dialect);
            if json {
                return Ok(serde_json::to_string_pretty(&directives)?);
            }
            Ok(format_directives(&directives))
        }
        Command::Context { offset } => {
            let context = CursorContext::new(text, dialect).context_at(offset)?;
            if json {
                return Ok(serde_json::to_string_pretty(&context)?);
            }
            Ok(format_context(&context, offset))
        }
    }
}

fn format_tokens(scanned: &Tokenized, dialect: Dialect) -> String {
    let mut out = format!("Tokens ({}, {dialect}):\n", scanned.tokens.len());
    for token in &scanned.tokens {
        let _ = writeln!(out, "  {token}");
    }
    let _ = writeln!(out, "Forecast at {}: {}", scanned.end, scanned.forecast);
    out
}

fn format_directives(directives: &[Directive]) -> String {
    let mut out = format!("Directives ({}):\n", directives.len());
    for directive in directives {
        let section = directive.section.as_deref().unwrap_or("-");
        match &directive.value {
            Some(value) => {
                let _ = writeln!(out, "  {section} {} = {value:?}", directive.key);
            }
            None => {
                let _ = writeln!(out, "  {section} {} (no value)", directive.key);
            }
        }
    }
    out
}

fn format_context(context: &Context, offset: usize) -> String {
    let mut out = format!("Context at offset {offset}:\n");
    let _ = writeln!(out, "  complete: {}", context.complete);
    if let Some(from) = context.from {
        let _ = writeln!(out, "  from:     {from}");
    }
    if let Some(section) = &context.section {
        let _ = writeln!(out, "  section:  {} @ {}", section.name, section.range);
    }
    if let Some(key) = &context.key {
        let _ = writeln!(out, "  key:      {:?} @ {}", key.name, key.range);
    }
    if let Some(value) = &context.value {
        let _ = writeln!(out, "  value:    {:?}", value.value);
        for range in &value.ranges {
            let _ = writeln!(out, "            {range}");
        }
    }
    out
}
