use super::*;
use pretty_assertions::assert_eq;

// === Basic Navigation ===

#[test]
fn current_returns_first_byte() {
    let cursor = Cursor::new("abc", 3, Location::START);
    assert_eq!(cursor.current(), Some(b'a'));
    assert_eq!(cursor.previous(), None);
}

#[test]
fn advance_tracks_column() {
    let mut cursor = Cursor::new("abc", 3, Location::START);
    cursor.advance(2);
    assert_eq!(cursor.current(), Some(b'c'));
    assert_eq!(cursor.previous(), Some(b'b'));
    assert_eq!(cursor.loc(), Location::new(2, 0, 2));
}

#[test]
fn newline_moves_to_next_line() {
    let mut cursor = Cursor::new("a\nb", 3, Location::START);
    cursor.advance(1);
    cursor.newline();
    assert_eq!(cursor.loc(), Location::new(2, 1, 0));
    assert_eq!(cursor.current(), Some(b'b'));
}

// === Limit ===

#[test]
fn limit_hides_the_rest_of_the_source() {
    let mut cursor = Cursor::new("ab[c", 2, Location::START);
    cursor.advance(2);
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), None);
    assert_eq!(cursor.lookahead(), Some('['));
}

#[test]
fn lookahead_decodes_multibyte_characters() {
    let src = "x懒狗";
    let cursor = Cursor::new(src, 1, Location::START);
    assert_eq!(cursor.lookahead(), Some('懒'));
}

#[test]
fn lookahead_at_end_of_source_is_none() {
    let cursor = Cursor::new("ab", 2, Location::START);
    assert_eq!(cursor.lookahead(), None);
}

// === Searches ===

#[test]
fn eat_blanks_stops_at_content() {
    let mut cursor = Cursor::new(" \t\rx", 4, Location::START);
    assert_eq!(cursor.eat_blanks(), 3);
    assert_eq!(cursor.current(), Some(b'x'));
}

#[test]
fn eat_until_newline_stops_before_newline() {
    let mut cursor = Cursor::new("abc\ndef", 7, Location::START);
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.current(), Some(b'\n'));
    assert_eq!(cursor.loc(), Location::new(3, 0, 3));
}

#[test]
fn eat_until_newline_stops_at_limit() {
    let mut cursor = Cursor::new("abcdef", 4, Location::START);
    cursor.eat_until_newline_or_eof();
    assert!(cursor.is_eof());
    assert_eq!(cursor.loc(), Location::new(4, 0, 4));
}

#[test]
fn eat_until_or_newline_reports_the_byte_found() {
    let mut cursor = Cursor::new("key=value", 9, Location::START);
    assert_eq!(cursor.eat_until_or_newline(b'='), Some(b'='));
    assert_eq!(cursor.loc().offset, 3);

    let mut cursor = Cursor::new("key\n=", 5, Location::START);
    assert_eq!(cursor.eat_until_or_newline(b'='), Some(b'\n'));

    let mut cursor = Cursor::new("key", 3, Location::START);
    assert_eq!(cursor.eat_until_or_newline(b'='), None);
    assert!(cursor.is_eof());
}

#[test]
fn slice_spans_multibyte_text() {
    let src = "K=懒狗";
    let cursor = Cursor::new(src, src.len(), Location::START);
    let from = Location::new(2, 0, 2);
    let to = Location::new(8, 0, 8);
    assert_eq!(cursor.slice(from, to), "懒狗");
}
