//! Property-based tests for the tokenizer.
//!
//! Documents are assembled from typical unit-file lines (sections, keys with
//! and without values, comments, blank lines, indented and backslash
//! continuations, CRLF endings, non-ASCII text). For each one we check:
//! 1. Token texts are exact slices of the source and tokens are ordered.
//! 2. Everything between tokens is whitespace.
//! 3. Prefix scans agree with scans of the truncated text.
//! 4. Resuming from an earlier scan gives the same result as a full scan.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use unit_lexer::{tokenize, tokenize_prefix, Dialect, Location, Token, TokenizeOptions};

// -- Document Generation Strategies --

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_.-]{0,8}").expect("valid regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z0-9 ./#;=-]{0,12}").expect("valid regex"),
        Just("ㄅㄆ # メモ".to_string()),
        Just("懒狗".to_string()),
        Just(String::new()),
    ]
}

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        word_strategy().prop_map(|name| format!("[{name}]")),
        word_strategy().prop_map(|name| format!("[{name}")),
        word_strategy().prop_map(|name| format!("[{name}] trailing")),
        (word_strategy(), value_strategy()).prop_map(|(key, value)| format!("{key}={value}")),
        (word_strategy(), value_strategy()).prop_map(|(key, value)| format!("{key} = {value}")),
        (word_strategy(), value_strategy()).prop_map(|(key, value)| format!("{key}={value}\\")),
        (word_strategy(), value_strategy()).prop_map(|(key, value)| format!("{key}={value}\\\\")),
        word_strategy(),
        value_strategy().prop_map(|text| format!("# {text}")),
        value_strategy().prop_map(|text| format!("; {text}")),
        value_strategy().prop_map(|text| format!("  {text}")),
        value_strategy().prop_map(|text| format!("\t{text}\\")),
        Just(String::new()),
        Just("  ".to_string()),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(line_strategy(), 0..12),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(lines, crlf, trailing_newline)| {
            let mut text = lines.join(if crlf { "\r\n" } else { "\n" });
            if trailing_newline {
                text.push('\n');
            }
            text
        })
}

fn dialect_strategy() -> impl Strategy<Value = Dialect> {
    prop_oneof![Just(Dialect::Systemd), Just(Dialect::Mkosi)]
}

// -- Helpers --

/// Location of byte `offset` computed from scratch.
fn location_of(text: &str, offset: usize) -> Location {
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let column = before.rfind('\n').map_or(offset, |newline| offset - newline - 1);
    Location::new(
        u32::try_from(offset).unwrap(),
        u32::try_from(line).unwrap(),
        u32::try_from(column).unwrap(),
    )
}

fn char_boundaries(text: &str) -> impl Iterator<Item = usize> + '_ {
    (0..=text.len()).filter(|&cut| text.is_char_boundary(cut))
}

fn check_tokens(text: &str, tokens: &[Token]) -> Result<(), TestCaseError> {
    let mut covered_to = 0usize;
    for token in tokens {
        let from = token.from().offset as usize;
        let to = token.to().offset as usize;
        prop_assert!(from < to, "empty token {token:?}");
        prop_assert!(from >= covered_to, "token {token:?} overlaps its predecessor");
        prop_assert_eq!(&token.text, &text[from..to]);
        prop_assert_eq!(token.from(), location_of(text, from));
        prop_assert_eq!(token.to(), location_of(text, to));

        let gap = &text[covered_to..from];
        prop_assert!(
            gap.bytes().all(|b| b.is_ascii_whitespace()),
            "non-blank text {gap:?} before {token:?}"
        );
        covered_to = to;
    }
    let rest = &text[covered_to..];
    prop_assert!(
        rest.bytes().all(|b| b.is_ascii_whitespace()),
        "non-blank text {rest:?} after the last token"
    );
    Ok(())
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Token texts are source slices and tokens only skip whitespace.
    #[test]
    fn prop_tokens_cover_source(text in document_strategy(), dialect in dialect_strategy()) {
        let result = tokenize(&text, &TokenizeOptions::new(dialect));
        check_tokens(&text, &result.tokens)?;
        prop_assert_eq!(result.end, location_of(&text, text.len()));
    }

    /// A prefix scan sees exactly what a scan of the truncated text sees.
    #[test]
    fn prop_prefix_matches_truncated_text(text in document_strategy(), dialect in dialect_strategy()) {
        let options = TokenizeOptions::new(dialect);
        for cut in char_boundaries(&text) {
            let prefix = tokenize_prefix(&text, cut, &options);
            let truncated = tokenize(&text[..cut], &options);
            prop_assert_eq!(&prefix.tokens, &truncated.tokens, "cut at {}", cut);
            prop_assert_eq!(prefix.state, truncated.state, "cut at {}", cut);
            prop_assert_eq!(prefix.end, truncated.end, "cut at {}", cut);
        }
    }

    /// Resuming from the tokens of an earlier prefix scan changes nothing.
    #[test]
    fn prop_resume_matches_full_scan(text in document_strategy(), dialect in dialect_strategy()) {
        let options = TokenizeOptions::new(dialect);
        let full = tokenize(&text, &options);
        for cut in char_boundaries(&text) {
            let previous = tokenize(&text[..cut], &options).tokens;
            let resumed = tokenize(&text, &options.with_previous(&previous));
            prop_assert_eq!(&resumed, &full, "resumed from a scan cut at {}", cut);
        }
    }

    /// Re-scanning a prefix with the tokens of the whole document changes
    /// nothing either.
    #[test]
    fn prop_prefix_resume_from_full_tokens(text in document_strategy(), dialect in dialect_strategy()) {
        let options = TokenizeOptions::new(dialect);
        let full = tokenize(&text, &options).tokens;
        for cut in char_boundaries(&text) {
            let fresh = tokenize_prefix(&text, cut, &options);
            let resumed = tokenize_prefix(&text, cut, &options.with_previous(&full));
            prop_assert_eq!(&resumed, &fresh, "cut at {}", cut);
        }
    }

    /// Keeping only the last token before the restart leaves the tail of
    /// the token list and the forecast unchanged.
    #[test]
    fn prop_only_last_token_keeps_tail(text in document_strategy(), dialect in dialect_strategy()) {
        let options = TokenizeOptions::new(dialect);
        let full = tokenize(&text, &options);
        let trimmed = tokenize(&text, &options.with_previous(&full.tokens).only_last_token());
        prop_assert!(full.tokens.ends_with(&trimmed.tokens));
        prop_assert_eq!(trimmed.forecast, full.forecast);
        prop_assert_eq!(trimmed.state, full.state);
    }
}
