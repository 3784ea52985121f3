//! Frame handling: decode a buffer holding several back-to-back packets of one grammar.
//!
//! The buffer is fully materialised up front. Decoding is all-or-nothing: the first packet
//! that fails aborts the frame, there is no resynchronisation.

use crate::codec::Grammar;
use crate::error::DecodeError;

/// One packet of a frame and the bytes it occupied.
#[derive(Debug)]
pub struct DecodedPacket<O> {
    pub output: O,
    pub byte_range: (usize, usize),
}

#[derive(Debug, thiserror::Error)]
#[error("packet {index} at offset {offset}: {source}")]
pub struct FrameError {
    pub index: usize,
    pub offset: usize,
    #[source]
    pub source: DecodeError,
}

/// Decode packets from `bytes` until it is exhausted.
///
/// Stops early (without error) if a packet consumes no bytes, which only happens for a
/// grammar that reads nothing.
pub fn decode_frame<O: Default>(grammar: &Grammar<O>, bytes: &[u8]) -> Result<Vec<DecodedPacket<O>>, FrameError> {
    let mut packets = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let body = &bytes[offset..];
        let mut output = O::default();
        let (consumed, result) = grammar.decode_with_extent(body, body.len(), &mut output);
        if let Err(source) = result {
            return Err(FrameError {
                index: packets.len(),
                offset: offset + consumed,
                source,
            });
        }
        if consumed == 0 {
            log::debug!("packet {} consumed no bytes, stopping at offset {}", packets.len(), offset);
            break;
        }
        packets.push(DecodedPacket {
            output,
            byte_range: (offset, offset + consumed),
        });
        offset += consumed;
    }

    Ok(packets)
}
