//! Sample packet layout used by the demo binary, the benchmark and the fuzz target.
//!
//! Layout:
//!
//! ```text
//! name:   text, window 16, non-empty
//! value:  u32, native order
//! items:  u8 count, then per item:
//!           name:  text, window 16, may be empty
//!           value: u32, byte-swapped
//! ```

use crate::codec::Grammar;
use crate::error::GrammarError;
use crate::field::{Field, PrefixWidth};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubPacket {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packet {
    pub name: String,
    pub value: u32,
    pub items: Vec<SubPacket>,
}

pub const NAME_WINDOW: usize = 16;

/// A packet with four items, the first of which has an empty name.
pub const SAMPLE_PACKET: [u8; 59] = [
    b'A', b'l', b'e', b'x', b'a', b'n', b'd', b'r', b'e', b' ', b'D', b'u', b'm', b'a', b's', 0,
    0x01, 0x01, 0x00, 0x00,
    0x04,
    0,
    0x00, 0x00, 0x00, 0x01,
    b'A', b'r', b'a', b'm', b'i', b's', 0,
    0x00, 0x00, 0x00, 0x02,
    b'A', b't', b'h', b'o', b's', 0,
    0x00, 0x00, 0x00, 0x03,
    b'P', b'o', b'r', b't', b'h', b'o', b's', 0,
    0x00, 0x00, 0x00, 0x04,
];

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub fn sample_grammar() -> Result<Grammar<Packet>, GrammarError> {
    let item = Field::group_default(
        vec![
            Field::text_allow_empty(NAME_WINDOW, |s: &mut SubPacket, b: &[u8]| s.name = text(b))?,
            Field::swapped(|s: &mut SubPacket, v: u32| s.value = v)?,
        ],
        |p: &mut Packet, s: SubPacket| p.items.push(s),
    );
    Ok(Grammar::builder()
        .field(Field::text(NAME_WINDOW, |p: &mut Packet, b: &[u8]| p.name = text(b))?)
        .field(Field::native(|p: &mut Packet, v: u32| p.value = v))
        .field(Field::repeated(PrefixWidth::U8, item)?)
        .build())
}
