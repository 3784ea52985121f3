//! Decode packets of the sample layout (see `packetgrammar::sample`) and print them.
//!
//! Usage:
//!   decode_packet [OPTIONS] [FILE]
//!
//! Input is FILE (raw bytes), or `--hex=<digits>`, or the built-in sample packet.
//!
//! Options:
//!   --length=N     Declared length (default: input size)
//!   --frames       Input holds several back-to-back packets
//!   --verbose, -v  Debug logging (otherwise RUST_LOG applies)

use anyhow::Context;
use packetgrammar::dump::{hex_dump, parse_hex};
use packetgrammar::sample::{sample_grammar, Packet, SAMPLE_PACKET};
use packetgrammar::{decode_frame, Grammar};
use std::io::Write;
use std::path::PathBuf;

fn print_packet(w: &mut impl Write, packet: &Packet) -> std::io::Result<()> {
    writeln!(w, "Name: {}", packet.name)?;
    writeln!(w, "Value: {}", packet.value)?;
    writeln!(w, "Items: {}", packet.items.len())?;
    for (i, item) in packet.items.iter().enumerate() {
        writeln!(w, "  {}:", i)?;
        writeln!(w, "    Name: {}", item.name)?;
        writeln!(w, "    Value: {}", item.value)?;
    }
    Ok(())
}

fn decode_single(grammar: &Grammar<Packet>, data: &[u8], length: usize) -> anyhow::Result<()> {
    let mut packet = Packet::default();
    let (consumed, result) = grammar.decode_with_extent(data, length, &mut packet);
    match result {
        Ok(()) => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "Result: ok ({} of {} bytes)", consumed, length.min(data.len()))?;
            print_packet(&mut out, &packet)?;
            Ok(())
        }
        Err(e) => {
            eprintln!("Result: {}", e.code());
            eprint!("{}", hex_dump(&data[..length.min(data.len())], Some(consumed)));
            Err(e).context("decode failed")
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut raw_args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = if let Some(pos) = raw_args.iter().position(|a| a == "--verbose" || a == "-v") {
        raw_args.remove(pos);
        true
    } else {
        false
    };
    let frames = if let Some(pos) = raw_args.iter().position(|a| a == "--frames") {
        raw_args.remove(pos);
        true
    } else {
        false
    };
    let hex: Option<String> = raw_args
        .iter()
        .position(|a| a.starts_with("--hex="))
        .and_then(|pos| raw_args.remove(pos).strip_prefix("--hex=").map(str::to_string));
    let length: Option<usize> = match raw_args.iter().position(|a| a.starts_with("--length=")) {
        Some(pos) => {
            let arg = raw_args.remove(pos);
            let n = arg.trim_start_matches("--length=");
            Some(n.parse().with_context(|| format!("invalid --length value {:?}", n))?)
        }
        None => None,
    };
    let file: Option<PathBuf> = raw_args.into_iter().next().map(PathBuf::from);

    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let data: Vec<u8> = match (file, hex) {
        (Some(path), _) => std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?,
        (None, Some(digits)) => parse_hex(&digits).context("parsing --hex input")?,
        (None, None) => SAMPLE_PACKET.to_vec(),
    };
    log::debug!("input: {} byte(s)", data.len());

    let grammar = sample_grammar()?;

    if frames {
        let data = &data[..length.unwrap_or(data.len()).min(data.len())];
        let packets = decode_frame(&grammar, data)?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "Packets: {}", packets.len())?;
        for (i, p) in packets.iter().enumerate() {
            writeln!(out, "Packet {} (bytes {}..{}):", i, p.byte_range.0, p.byte_range.1)?;
            print_packet(&mut out, &p.output)?;
        }
        return Ok(());
    }

    decode_single(&grammar, &data, length.unwrap_or(data.len()))
}
