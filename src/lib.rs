//! # packetgrammar: declarative decoding of fixed-layout binary packets
//!
//! A packet layout is described once as a tree of field descriptors ([`Field`]) and
//! decoded many times by the engine in [`codec`]. Each descriptor knows its decoding rule
//! and the closure that delivers the decoded value into the caller's output object.
//!
//! ## Field kinds
//!
//! - **Scalar**: `u8`..`u64`, `i8`..`i64`, `f32`, `f64`, native or byte-swapped order
//! - **Text**: null-terminated bytes within a fixed scan window, optionally non-empty
//! - **Group**: nested record decoded into an intermediate value, delivered as one unit
//! - **Repeated**: unsigned count prefix (1, 2, 4 or 8 bytes), then the child `count` times
//! - **Binary**, **StaticArray**: reserved; decode reports `UnhandledFieldType`
//!
//! ## Decoding
//!
//! [`Grammar::decode`] walks the tree depth-first with a per-call cursor. Every read is
//! bounds-checked against the declared length before it happens; the first error wins and
//! aborts the call ([`DecodeError`]). Grammars are immutable and `Send + Sync`, so one
//! grammar can serve concurrent decode calls.
//!
//! ## Usage
//!
//! See [`sample`] for a complete layout and `tests/integration.rs` for more examples.

pub mod codec;
pub mod cursor;
pub mod dump;
pub mod error;
pub mod field;
pub mod frame;
pub mod primitive;
pub mod profile;
pub mod sample;

pub use codec::{Grammar, GrammarBuilder};
pub use cursor::DecodeCursor;
pub use error::{DecodeError, ErrorCode, GrammarError};
pub use field::{Field, FieldKind, GroupRule, PrefixWidth};
pub use frame::{decode_frame, DecodedPacket, FrameError};
pub use primitive::{invert_u16, invert_u32, invert_u64, ByteOrderMode, Primitive, ScalarType};
pub use profile::{get_decode_profile, reset_decode_profile, KindProfile};
