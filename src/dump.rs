//! Hex formatting of raw packet bytes for diagnostics, and parsing of hex input.

/// Format `bytes` as lines of 16 hex bytes, each prefixed with its offset, with a `>>`
/// marker before the byte at `mark` (e.g. the offset where decoding failed).
pub fn hex_dump(bytes: &[u8], mark: Option<usize>) -> String {
    let mut out = String::new();
    for (line, chunk) in bytes.chunks(16).enumerate() {
        let start = line * 16;
        out.push_str(&format!("  offset {:4}:", start));
        for (i, b) in chunk.iter().enumerate() {
            if mark == Some(start + i) {
                out.push_str(&format!(" >>{:02x}", b));
            } else {
                out.push_str(&format!(" {:02x}", b));
            }
        }
        out.push('\n');
    }
    if mark == Some(bytes.len()) {
        out.push_str(&format!("  offset {:4}: >> (end)\n", bytes.len()));
    }
    out
}

/// Parse hex digits into bytes. Whitespace, `,` and an optional `0x` prefix per byte
/// group are ignored.
pub fn parse_hex(src: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = src
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|tok| tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")).unwrap_or(tok))
        .collect();
    hex::decode(digits)
}
