use super::*;
use crate::Location;
use pretty_assertions::assert_eq;

fn open(kind: TokenKind) -> ScanState {
    ScanState::open_at(kind, Location::START)
}

#[test]
fn fresh_line_forecasts_none() {
    assert_eq!(forecast(&open(TokenKind::None), None, None), TokenKind::None);
    assert_eq!(
        forecast(&open(TokenKind::None), Some(b'\n'), Some('K')),
        TokenKind::None
    );
}

#[test]
fn bracket_ahead_forecasts_unknown() {
    assert_eq!(
        forecast(&open(TokenKind::None), Some(b'\n'), Some('[')),
        TokenKind::Unknown
    );
}

#[test]
fn open_kinds_forecast_themselves() {
    for kind in [
        TokenKind::Comment,
        TokenKind::Section,
        TokenKind::DirectiveKey,
        TokenKind::DirectiveValue,
        TokenKind::Unknown,
    ] {
        assert_eq!(forecast(&open(kind), Some(b'x'), None), kind);
    }
}

#[test]
fn closed_section_forecasts_unknown() {
    assert_eq!(
        forecast(&open(TokenKind::Section), Some(b']'), None),
        TokenKind::Unknown
    );
}

#[test]
fn key_with_trailing_blank_forecasts_assignment() {
    assert_eq!(
        forecast(&open(TokenKind::DirectiveKey), Some(b' '), None),
        TokenKind::Assignment
    );
    assert_eq!(
        forecast(&open(TokenKind::DirectiveKey), Some(b'\t'), None),
        TokenKind::Assignment
    );
}

#[test]
fn pending_escape_wins_over_open_kind() {
    let mut state = open(TokenKind::Comment);
    state.escaped_for = TokenKind::DirectiveValue;
    assert_eq!(forecast(&state, Some(b'x'), None), TokenKind::DirectiveValue);
}

#[test]
fn undecided_mkosi_value_forecasts_value() {
    let mut state = open(TokenKind::None);
    state.value_may_not_end = 1;
    assert_eq!(forecast(&state, Some(b'\n'), None), TokenKind::None);

    state.value_may_not_end = 2;
    assert_eq!(forecast(&state, Some(b'\n'), None), TokenKind::DirectiveValue);
    assert_eq!(
        forecast(&state, Some(b'\n'), Some('[')),
        TokenKind::DirectiveValue
    );
}
