//! Decode fuzz target: feed arbitrary bytes to the sample grammar.
//! Decode must not panic; it returns Ok or one of the decode errors, and never reports
//! more consumed bytes than the input holds.
//! Build with: cargo fuzz run decode_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let grammar = match packetgrammar::sample::sample_grammar() {
        Ok(g) => g,
        Err(_) => return,
    };
    let mut out = packetgrammar::sample::Packet::default();
    let (consumed, _) = grammar.decode_with_extent(data, data.len(), &mut out);
    assert!(consumed <= data.len());
    let _ = packetgrammar::decode_frame(&grammar, data);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run decode_fuzz");
}
