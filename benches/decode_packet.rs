//! Benchmark: decode the sample packet (one grammar, many calls), a frame of back-to-back
//! packets, and a large repeated group.
//!
//! Run with `--features decode_profile` to print a per-field-kind timing summary after the run.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use packetgrammar::sample::{sample_grammar, Packet, SubPacket, SAMPLE_PACKET};
use packetgrammar::{decode_frame, get_decode_profile, reset_decode_profile, Field, Grammar, PrefixWidth};

fn wide_grammar() -> Grammar<Packet> {
    Grammar::new(vec![Field::repeated(
        PrefixWidth::U16,
        Field::group_default(
            vec![
                Field::native(|s: &mut SubPacket, v: u32| s.value = v),
                Field::text_allow_empty(8, |s: &mut SubPacket, b: &[u8]| s.name = String::from_utf8_lossy(b).into_owned())
                    .expect("text"),
            ],
            |p: &mut Packet, s: SubPacket| p.items.push(s),
        ),
    )
    .expect("repeated")])
}

fn wide_payload(n: u16) -> Vec<u8> {
    let mut data = n.to_ne_bytes().to_vec();
    for i in 0..n {
        data.extend_from_slice(&(i as u32).to_ne_bytes());
        data.extend_from_slice(b"item\0");
    }
    data
}

fn bench_decode(c: &mut Criterion) {
    let grammar = sample_grammar().expect("grammar");
    reset_decode_profile();

    c.bench_function("decode_sample_packet", |b| {
        b.iter(|| {
            let mut out = Packet::default();
            grammar.decode_all(black_box(&SAMPLE_PACKET), &mut out).expect("decode");
            black_box(out)
        })
    });

    let frame: Vec<u8> = SAMPLE_PACKET.iter().copied().cycle().take(SAMPLE_PACKET.len() * 64).collect();
    c.bench_function("decode_frame_64_packets", |b| {
        b.iter(|| black_box(decode_frame(&grammar, black_box(&frame)).expect("frame")))
    });

    let wide = wide_grammar();
    let payload = wide_payload(1000);
    c.bench_function("decode_repeated_1000_groups", |b| {
        b.iter(|| {
            let mut out = Packet::default();
            wide.decode_all(black_box(&payload), &mut out).expect("decode");
            black_box(out)
        })
    });

    let profile = get_decode_profile();
    if !profile.is_empty() {
        let mut rows: Vec<_> = profile.into_iter().collect();
        rows.sort_by(|a, b| b.1.nanos.cmp(&a.1.nanos));
        eprintln!("decode profile per field kind (inclusive):");
        eprintln!("  {:12} {:>12} {:>14} {:>8}", "kind", "calls", "total ns", "ns/call");
        for (kind, entry) in rows {
            eprintln!("  {:12} {:>12} {:>14} {:>8}", kind.as_str(), entry.calls, entry.nanos, entry.mean_nanos());
        }
    }
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
