//! Fixed-width primitives and byte-order inversion.
//!
//! Scalars are extracted from an explicitly length-checked slice in the host's native
//! order ([`NativeEndian`]); a field declared with [`ByteOrderMode::Swapped`] passes the
//! raw value through the inverters below before delivery.

use byteorder::{ByteOrder, NativeEndian};

/// Byte order of a scalar field relative to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrderMode {
    #[default]
    Native,
    Swapped,
}

/// Type tag of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ScalarType {
    pub fn width(self) -> usize {
        match self {
            ScalarType::U8 | ScalarType::I8 => 1,
            ScalarType::U16 | ScalarType::I16 => 2,
            ScalarType::U32 | ScalarType::I32 | ScalarType::F32 => 4,
            ScalarType::U64 | ScalarType::I64 | ScalarType::F64 => 8,
        }
    }
}

pub fn invert_u16(value: u16) -> u16 {
    ((value << 8) & 0xff00) | ((value >> 8) & 0x00ff)
}

pub fn invert_u32(value: u32) -> u32 {
    ((value << 24) & 0xff00_0000)
        | ((value << 8) & 0x00ff_0000)
        | ((value >> 8) & 0x0000_ff00)
        | ((value >> 24) & 0x0000_00ff)
}

pub fn invert_u64(value: u64) -> u64 {
    let hi = invert_u32(value as u32) as u64;
    let lo = invert_u32((value >> 32) as u32) as u64;
    (hi << 32) | lo
}

/// A value a scalar field can decode into.
///
/// `read_native` is only called with a slice of exactly [`Primitive::WIDTH`] bytes.
pub trait Primitive: Copy + Send + Sync + 'static {
    const WIDTH: usize;
    const SCALAR_TYPE: ScalarType;

    fn read_native(bytes: &[u8]) -> Self;

    /// Reverses the byte order. Identity for 1-byte types.
    fn invert(self) -> Self;
}

impl Primitive for u8 {
    const WIDTH: usize = 1;
    const SCALAR_TYPE: ScalarType = ScalarType::U8;
    fn read_native(bytes: &[u8]) -> Self {
        bytes[0]
    }
    fn invert(self) -> Self {
        self
    }
}

impl Primitive for i8 {
    const WIDTH: usize = 1;
    const SCALAR_TYPE: ScalarType = ScalarType::I8;
    fn read_native(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
    fn invert(self) -> Self {
        self
    }
}

impl Primitive for u16 {
    const WIDTH: usize = 2;
    const SCALAR_TYPE: ScalarType = ScalarType::U16;
    fn read_native(bytes: &[u8]) -> Self {
        NativeEndian::read_u16(bytes)
    }
    fn invert(self) -> Self {
        invert_u16(self)
    }
}

impl Primitive for i16 {
    const WIDTH: usize = 2;
    const SCALAR_TYPE: ScalarType = ScalarType::I16;
    fn read_native(bytes: &[u8]) -> Self {
        NativeEndian::read_i16(bytes)
    }
    fn invert(self) -> Self {
        invert_u16(self as u16) as i16
    }
}

impl Primitive for u32 {
    const WIDTH: usize = 4;
    const SCALAR_TYPE: ScalarType = ScalarType::U32;
    fn read_native(bytes: &[u8]) -> Self {
        NativeEndian::read_u32(bytes)
    }
    fn invert(self) -> Self {
        invert_u32(self)
    }
}

impl Primitive for i32 {
    const WIDTH: usize = 4;
    const SCALAR_TYPE: ScalarType = ScalarType::I32;
    fn read_native(bytes: &[u8]) -> Self {
        NativeEndian::read_i32(bytes)
    }
    fn invert(self) -> Self {
        invert_u32(self as u32) as i32
    }
}

impl Primitive for u64 {
    const WIDTH: usize = 8;
    const SCALAR_TYPE: ScalarType = ScalarType::U64;
    fn read_native(bytes: &[u8]) -> Self {
        NativeEndian::read_u64(bytes)
    }
    fn invert(self) -> Self {
        invert_u64(self)
    }
}

impl Primitive for i64 {
    const WIDTH: usize = 8;
    const SCALAR_TYPE: ScalarType = ScalarType::I64;
    fn read_native(bytes: &[u8]) -> Self {
        NativeEndian::read_i64(bytes)
    }
    fn invert(self) -> Self {
        invert_u64(self as u64) as i64
    }
}

// Floats invert their bit pattern, not their value.
impl Primitive for f32 {
    const WIDTH: usize = 4;
    const SCALAR_TYPE: ScalarType = ScalarType::F32;
    fn read_native(bytes: &[u8]) -> Self {
        NativeEndian::read_f32(bytes)
    }
    fn invert(self) -> Self {
        f32::from_bits(invert_u32(self.to_bits()))
    }
}

impl Primitive for f64 {
    const WIDTH: usize = 8;
    const SCALAR_TYPE: ScalarType = ScalarType::F64;
    fn read_native(bytes: &[u8]) -> Self {
        NativeEndian::read_f64(bytes)
    }
    fn invert(self) -> Self {
        f64::from_bits(invert_u64(self.to_bits()))
    }
}

/// Reads an unsigned count of `width` bytes (1, 2, 4 or 8) in native order.
pub(crate) fn read_native_uint(bytes: &[u8], width: usize) -> u64 {
    match width {
        1 => bytes[0] as u64,
        2 => NativeEndian::read_u16(bytes) as u64,
        4 => NativeEndian::read_u32(bytes) as u64,
        _ => NativeEndian::read_u64(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverters_reverse_bytes() {
        assert_eq!(invert_u16(0x1234), 0x3412);
        assert_eq!(invert_u32(0x1234_5678), 0x7856_3412);
        assert_eq!(invert_u64(0x0102_0304_0506_0708), 0x0807_0605_0403_0201);
    }

    #[test]
    fn inverters_are_involutions() {
        for v in [0u64, 1, 0xff, 0xdead_beef, u64::MAX, 0x8000_0000_0000_0001] {
            assert_eq!(invert_u64(invert_u64(v)), v);
            assert_eq!(invert_u32(invert_u32(v as u32)), v as u32);
            assert_eq!(invert_u16(invert_u16(v as u16)), v as u16);
        }
    }

    #[test]
    fn inverters_match_std_swap_bytes() {
        assert_eq!(invert_u32(0xa1b2_c3d4), 0xa1b2_c3d4u32.swap_bytes());
        assert_eq!(invert_u64(0x1122_3344_5566_7788), 0x1122_3344_5566_7788u64.swap_bytes());
    }

    #[test]
    fn read_native_matches_from_ne_bytes() {
        let bytes = [0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];
        assert_eq!(u32::read_native(&bytes[..4]), u32::from_ne_bytes([1, 0, 0, 0]));
        assert_eq!(u64::read_native(&bytes), u64::from_ne_bytes(bytes));
        assert_eq!(i16::read_native(&[0xff, 0xff]), -1);
        assert_eq!(read_native_uint(&bytes[..2], 2), u16::from_ne_bytes([1, 0]) as u64);
    }

    #[test]
    fn float_invert_swaps_bit_pattern() {
        let v = 1.5f32;
        assert_eq!(v.invert().to_bits(), v.to_bits().swap_bytes());
        assert_eq!(v.invert().invert(), v);
    }

    #[test]
    fn scalar_widths() {
        assert_eq!(ScalarType::U8.width(), u8::WIDTH);
        assert_eq!(ScalarType::F32.width(), f32::WIDTH);
        assert_eq!(ScalarType::I64.width(), i64::WIDTH);
    }
}
