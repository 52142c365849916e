//! `unit-dump`: inspect how unit files and mkosi configuration tokenize.
//!
//! ```text
//! unit-dump tokens <file> [--dialect=systemd|mkosi] [--json]
//! unit-dump directives <file> [--dialect=systemd|mkosi] [--json]
//! unit-dump context <file> <offset> [--dialect=systemd|mkosi] [--json]
//! ```
//!
//! Without `--dialect` the dialect is picked from the file path. Set
//! `RUST_LOG` (for example `RUST_LOG=unit_analysis=debug`) to trace the
//! scanner and the cursor-context cache.

mod args;
mod dump;
mod error;

use std::process::ExitCode;
use std::sync::Once;

use error::DumpError;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber, only if `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

fn print_usage() {
    eprintln!("Usage: unit-dump <command> <file> [offset] [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  tokens               Print the token stream and the final forecast");
    eprintln!("  directives           Print section / key / value records");
    eprintln!("  context <offset>     Print the cursor context at a byte offset");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dialect=<name>     systemd or mkosi (default: from the file path)");
    eprintln!("  --json               Print JSON instead of text");
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = args::parse_args(&args).and_then(|invocation| dump::run(&invocation));
    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err @ DumpError::Usage(_)) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
