//! # Text fields: behaviour of null-terminated text
//!
//! A text field scans forward from the cursor for at most `max_len` bytes (terminator
//! included) looking for a `0` byte.
//!
//! | Situation | Result |
//! |-----------|--------|
//! | terminator at distance `d > 1` | delivers the `d - 1` bytes before it, cursor advances by `d` |
//! | terminator at distance 1, empty allowed | delivers an empty slice, cursor advances by 1 |
//! | terminator at distance 1, empty not allowed | `EmptyTextNotAllowed`, nothing delivered |
//! | no terminator within `max_len` bytes | `MissingNullTerminator` |
//! | declared length reached before terminator or window end | `ExceededDataRange` (wins over missing terminator) |
//!
//! The scan never looks at the byte at index `length`, even if the physical buffer has one.

use packetgrammar::{DecodeError, Field, Grammar};

#[derive(Debug, Default)]
struct Out {
    texts: Vec<Vec<u8>>,
    after: Option<u8>,
}

fn text_grammar(max_len: usize, allow_empty: bool) -> Grammar<Out> {
    let deliver = |o: &mut Out, b: &[u8]| o.texts.push(b.to_vec());
    let text = if allow_empty {
        Field::text_allow_empty(max_len, deliver)
    } else {
        Field::text(max_len, deliver)
    };
    Grammar::new(vec![
        text.expect("text"),
        Field::native(|o: &mut Out, v: u8| o.after = Some(v)),
    ])
}

#[test]
fn text_delivers_bytes_before_terminator() {
    let data = b"hello\0\x2a";
    let mut out = Out::default();
    let (consumed, result) = text_grammar(16, false).decode_with_extent(data, data.len(), &mut out);
    result.expect("decode");
    assert_eq!(consumed, 7);
    assert_eq!(out.texts, vec![b"hello".to_vec()]);
    assert_eq!(out.after, Some(0x2a));
}

#[test]
fn text_terminator_at_window_end() {
    // Window of 6 holds "hello" plus the terminator exactly.
    let data = b"hello\0\x01";
    let mut out = Out::default();
    text_grammar(6, false).decode_all(data, &mut out).expect("decode");
    assert_eq!(out.texts, vec![b"hello".to_vec()]);
}

#[test]
fn text_missing_terminator_within_window() {
    let data = b"hello\0\x01";
    let mut out = Out::default();
    let err = text_grammar(5, false).decode_all(data, &mut out).unwrap_err();
    assert_eq!(err, DecodeError::MissingNullTerminator { offset: 0, max_len: 5 });
    assert!(out.texts.is_empty());
    assert_eq!(out.after, None);
}

#[test]
fn text_missing_terminator_regardless_of_following_bytes() {
    let tails: [&[u8]; 3] = [b"\0\0\0", b"abc", b"\xff"];
    for tail in tails {
        let mut data = b"abcd".to_vec();
        data.extend_from_slice(tail);
        let err = text_grammar(4, true).decode_all(&data, &mut Out::default()).unwrap_err();
        assert_eq!(err, DecodeError::MissingNullTerminator { offset: 0, max_len: 4 });
    }
}

#[test]
fn text_empty_not_allowed() {
    let data = [0u8, 7];
    let mut out = Out::default();
    let err = text_grammar(16, false).decode_all(&data, &mut out).unwrap_err();
    assert_eq!(err, DecodeError::EmptyTextNotAllowed { offset: 0 });
    assert!(out.texts.is_empty());
    assert_eq!(out.after, None);
}

#[test]
fn text_empty_allowed() {
    let data = [0u8, 7];
    let mut out = Out::default();
    let (consumed, result) = text_grammar(16, true).decode_with_extent(&data, data.len(), &mut out);
    result.expect("decode");
    assert_eq!(consumed, 2);
    assert_eq!(out.texts, vec![Vec::<u8>::new()]);
    assert_eq!(out.after, Some(7));
}

#[test]
fn text_window_of_one_only_fits_empty_text() {
    let mut out = Out::default();
    text_grammar(1, true).decode_all(&[0, 1], &mut out).expect("decode");
    assert_eq!(out.texts, vec![Vec::<u8>::new()]);

    let err = text_grammar(1, true).decode_all(b"a\0\x01", &mut Out::default()).unwrap_err();
    assert_eq!(err, DecodeError::MissingNullTerminator { offset: 0, max_len: 1 });
}

#[test]
fn text_exceeded_range_wins_over_missing_terminator() {
    let data = b"abc";
    let err = text_grammar(16, false).decode_all(data, &mut Out::default()).unwrap_err();
    assert_eq!(err, DecodeError::ExceededDataRange { offset: 0, needed: 4, length: 3 });
}

#[test]
fn text_never_reads_past_declared_length() {
    // The terminator is physically present at index 3 but outside the declared length.
    let data = b"abc\0\x01";
    let err = text_grammar(16, false).decode(data, 3, &mut Out::default()).unwrap_err();
    assert_eq!(err, DecodeError::ExceededDataRange { offset: 0, needed: 4, length: 3 });

    // Declared length includes the terminator: decodes, then the scalar runs out.
    let err = text_grammar(16, false).decode(data, 4, &mut Out::default()).unwrap_err();
    assert_eq!(err, DecodeError::ExceededDataRange { offset: 4, needed: 1, length: 4 });
}

#[test]
fn text_window_exactly_at_declared_end_is_missing_terminator() {
    // 4 bytes left, window of 4, none is zero: the window was fully scanned in range.
    let data = b"abcd";
    let err = text_grammar(4, false).decode_all(data, &mut Out::default()).unwrap_err();
    assert_eq!(err, DecodeError::MissingNullTerminator { offset: 0, max_len: 4 });
}

#[test]
fn text_is_raw_bytes() {
    let data = [0xffu8, 0xfe, b'x', 0, 9];
    let mut out = Out::default();
    text_grammar(8, false).decode_all(&data, &mut out).expect("decode");
    assert_eq!(out.texts, vec![vec![0xff, 0xfe, b'x']]);
}

#[test]
fn consecutive_texts_share_the_cursor() {
    let grammar: Grammar<Out> = Grammar::new(vec![
        Field::text(8, |o: &mut Out, b: &[u8]| o.texts.push(b.to_vec())).expect("text"),
        Field::text_allow_empty(8, |o: &mut Out, b: &[u8]| o.texts.push(b.to_vec())).expect("text"),
        Field::text(8, |o: &mut Out, b: &[u8]| o.texts.push(b.to_vec())).expect("text"),
    ]);
    let data = b"ab\0\0cd\0";
    let mut out = Out::default();
    grammar.decode_all(data, &mut out).expect("decode");
    assert_eq!(out.texts, vec![b"ab".to_vec(), Vec::new(), b"cd".to_vec()]);

    // Empty third text is rejected with its own offset.
    let err = grammar.decode_all(b"ab\0\0\0", &mut Out::default()).unwrap_err();
    assert_eq!(err, DecodeError::EmptyTextNotAllowed { offset: 4 });
}
