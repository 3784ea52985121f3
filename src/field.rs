//! Field grammar: the declarative description of a packet layout.
//!
//! A grammar is a tree of [`Field`] nodes, generic over the output type `O` the decoded
//! values are delivered into. Each node carries its decoding parameters and a delivery
//! closure captured at construction time; nodes are never mutated by decode, so one tree
//! can be shared read-only between threads.
//!
//! ## Field kinds
//!
//! | Kind | Parameters | Delivers |
//! |------|------------|----------|
//! | [`Field::Scalar`] | [`ScalarType`], [`ByteOrderMode`] | the primitive value |
//! | [`Field::Text`] | window length (terminator included), allow-empty flag | bytes before the `0` terminator |
//! | [`Field::Group`] | ordered children, intermediate constructor | the populated intermediate value |
//! | [`Field::Repeated`] | [`PrefixWidth`] of the count, child | nothing itself; the child (at least 1 byte wide) runs `count` times |
//! | [`Field::Binary`] | reserved | decode reports `UnhandledFieldType` |
//! | [`Field::StaticArray`] | reserved | decode reports `UnhandledFieldType` |
//!
//! ## Example
//!
//! ```
//! use packetgrammar::{Field, Grammar, PrefixWidth};
//!
//! #[derive(Default)]
//! struct Item { name: String, value: u32 }
//! #[derive(Default)]
//! struct Packet { name: String, items: Vec<Item> }
//!
//! let grammar = Grammar::new(vec![
//!     Field::text(16, |p: &mut Packet, s: &[u8]| p.name = String::from_utf8_lossy(s).into_owned())?,
//!     Field::repeated(
//!         PrefixWidth::U8,
//!         Field::group_default(
//!             vec![
//!                 Field::text_allow_empty(16, |i: &mut Item, s: &[u8]| i.name = String::from_utf8_lossy(s).into_owned())?,
//!                 Field::swapped(|i: &mut Item, v: u32| i.value = v)?,
//!             ],
//!             |p: &mut Packet, i: Item| p.items.push(i),
//!         ),
//!     )?,
//! ]);
//! # Ok::<(), packetgrammar::GrammarError>(())
//! ```

use crate::codec::decode_sequence;
use crate::cursor::DecodeCursor;
use crate::error::{DecodeError, GrammarError};
use crate::primitive::{ByteOrderMode, Primitive, ScalarType};

type ScalarDelivery<O> = Box<dyn Fn(&mut O, &[u8], ByteOrderMode) + Send + Sync>;
type BytesDelivery<O> = Box<dyn Fn(&mut O, &[u8]) + Send + Sync>;

/// Kind tag of a [`Field`], used in diagnostics and profiling labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Text,
    Group,
    Repeated,
    Binary,
    StaticArray,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Scalar => "Scalar",
            FieldKind::Text => "Text",
            FieldKind::Group => "Group",
            FieldKind::Repeated => "Repeated",
            FieldKind::Binary => "Binary",
            FieldKind::StaticArray => "StaticArray",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width of the unsigned count that precedes a repeated field (or a binary blob).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixWidth {
    U8,
    U16,
    U32,
    U64,
}

impl PrefixWidth {
    pub fn from_bytes(width: usize) -> Result<Self, GrammarError> {
        match width {
            1 => Ok(PrefixWidth::U8),
            2 => Ok(PrefixWidth::U16),
            4 => Ok(PrefixWidth::U32),
            8 => Ok(PrefixWidth::U64),
            _ => Err(GrammarError::UnsupportedPrefixWidth { width }),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            PrefixWidth::U8 => 1,
            PrefixWidth::U16 => 2,
            PrefixWidth::U32 => 4,
            PrefixWidth::U64 => 8,
        }
    }
}

impl TryFrom<usize> for PrefixWidth {
    type Error = GrammarError;

    fn try_from(width: usize) -> Result<Self, Self::Error> {
        PrefixWidth::from_bytes(width)
    }
}

/// A node of the grammar tree.
pub enum Field<O> {
    Scalar(ScalarField<O>),
    Text(TextField<O>),
    Group(Box<dyn GroupRule<O>>),
    Repeated(RepeatedField<O>),
    /// Reserved: length-prefixed binary blob. Decode reports `UnhandledFieldType`.
    Binary(BinaryField<O>),
    /// Reserved: fixed-count array of one child. Decode reports `UnhandledFieldType`.
    StaticArray(StaticArrayField<O>),
}

pub struct ScalarField<O> {
    scalar_type: ScalarType,
    order: ByteOrderMode,
    deliver: ScalarDelivery<O>,
}

impl<O> ScalarField<O> {
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn order(&self) -> ByteOrderMode {
        self.order
    }

    pub fn width(&self) -> usize {
        self.scalar_type.width()
    }

    /// Converts `raw` (exactly [`width`](Self::width) bytes) and hands the value to the
    /// delivery closure.
    pub(crate) fn deliver(&self, out: &mut O, raw: &[u8]) {
        (self.deliver)(out, raw, self.order)
    }
}

pub struct TextField<O> {
    max_len: usize,
    allow_empty: bool,
    deliver: BytesDelivery<O>,
}

impl<O> TextField<O> {
    /// Scan window in bytes, terminator included. Always at least 1.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    pub(crate) fn deliver(&self, out: &mut O, text: &[u8]) {
        (self.deliver)(out, text)
    }
}

/// Decode rule of a group node, erasing the group's intermediate type.
///
/// Implemented by [`GroupField`]; the decode engine only sees `dyn GroupRule<O>`.
pub trait GroupRule<O>: Send + Sync {
    /// Decodes the children into a fresh intermediate value and, on success, delivers it
    /// into `out` exactly once. The cursor is shared with the enclosing sequence.
    fn decode_group(&self, cursor: &mut DecodeCursor<'_>, out: &mut O) -> Result<(), DecodeError>;

    fn child_count(&self) -> usize;

    /// Bytes one successful occurrence consumes at minimum (sum over the children).
    fn min_width(&self) -> usize;
}

/// Group node with intermediate type `I`.
pub struct GroupField<O, I> {
    children: Vec<Field<I>>,
    make: Box<dyn Fn() -> I + Send + Sync>,
    deliver: Box<dyn Fn(&mut O, I) + Send + Sync>,
}

impl<O, I> GroupField<O, I> {
    pub fn children(&self) -> &[Field<I>] {
        &self.children
    }
}

impl<O, I> GroupRule<O> for GroupField<O, I> {
    fn decode_group(&self, cursor: &mut DecodeCursor<'_>, out: &mut O) -> Result<(), DecodeError> {
        let mut intermediate = (self.make)();
        decode_sequence(&self.children, cursor, &mut intermediate)?;
        (self.deliver)(out, intermediate);
        Ok(())
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn min_width(&self) -> usize {
        self.children.iter().fold(0, |acc, c| acc.saturating_add(c.min_width()))
    }
}

pub struct RepeatedField<O> {
    prefix: PrefixWidth,
    child: Box<Field<O>>,
}

impl<O> RepeatedField<O> {
    pub fn prefix(&self) -> PrefixWidth {
        self.prefix
    }

    pub fn child(&self) -> &Field<O> {
        &self.child
    }
}

pub struct BinaryField<O> {
    prefix: PrefixWidth,
    #[allow(dead_code)]
    deliver: BytesDelivery<O>,
}

impl<O> BinaryField<O> {
    pub fn prefix(&self) -> PrefixWidth {
        self.prefix
    }
}

pub struct StaticArrayField<O> {
    count: usize,
    child: Box<Field<O>>,
}

impl<O> StaticArrayField<O> {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn child(&self) -> &Field<O> {
        &self.child
    }
}

impl<O> Field<O> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Scalar(_) => FieldKind::Scalar,
            Field::Text(_) => FieldKind::Text,
            Field::Group(_) => FieldKind::Group,
            Field::Repeated(_) => FieldKind::Repeated,
            Field::Binary(_) => FieldKind::Binary,
            Field::StaticArray(_) => FieldKind::StaticArray,
        }
    }

    /// Smallest number of bytes a successful decode of this node advances the cursor by.
    pub fn min_width(&self) -> usize {
        match self {
            Field::Scalar(s) => s.width(),
            Field::Text(_) => 1,
            Field::Group(g) => g.min_width(),
            Field::Repeated(r) => r.prefix.bytes(),
            Field::Binary(b) => b.prefix.bytes(),
            Field::StaticArray(a) => a.count.saturating_mul(a.child.min_width()),
        }
    }
}

impl<O: 'static> Field<O> {
    /// Scalar of type `T` in the given byte order.
    ///
    /// Fails with [`GrammarError::UnsupportedSwapWidth`] when `order` is
    /// [`ByteOrderMode::Swapped`] and `T` is not 2, 4 or 8 bytes wide.
    pub fn scalar<T, F>(order: ByteOrderMode, deliver: F) -> Result<Self, GrammarError>
    where
        T: Primitive,
        F: Fn(&mut O, T) + Send + Sync + 'static,
    {
        if order == ByteOrderMode::Swapped && !matches!(T::WIDTH, 2 | 4 | 8) {
            return Err(GrammarError::UnsupportedSwapWidth { width: T::WIDTH });
        }
        Ok(Field::Scalar(ScalarField {
            scalar_type: T::SCALAR_TYPE,
            order,
            deliver: Box::new(move |out: &mut O, raw: &[u8], order: ByteOrderMode| {
                let value = T::read_native(raw);
                let value = match order {
                    ByteOrderMode::Native => value,
                    ByteOrderMode::Swapped => value.invert(),
                };
                deliver(out, value)
            }),
        }))
    }

    /// Native-order scalar.
    pub fn native<T, F>(deliver: F) -> Self
    where
        T: Primitive,
        F: Fn(&mut O, T) + Send + Sync + 'static,
    {
        Field::Scalar(ScalarField {
            scalar_type: T::SCALAR_TYPE,
            order: ByteOrderMode::Native,
            deliver: Box::new(move |out: &mut O, raw: &[u8], _: ByteOrderMode| {
                deliver(out, T::read_native(raw))
            }),
        })
    }

    /// Byte-swapped scalar; see [`Field::scalar`].
    pub fn swapped<T, F>(deliver: F) -> Result<Self, GrammarError>
    where
        T: Primitive,
        F: Fn(&mut O, T) + Send + Sync + 'static,
    {
        Field::scalar(ByteOrderMode::Swapped, deliver)
    }

    /// Null-terminated text of at most `max_len` bytes (terminator included); empty text is
    /// rejected at decode time.
    pub fn text<F>(max_len: usize, deliver: F) -> Result<Self, GrammarError>
    where
        F: Fn(&mut O, &[u8]) + Send + Sync + 'static,
    {
        Self::text_field(max_len, false, Box::new(deliver))
    }

    pub fn text_allow_empty<F>(max_len: usize, deliver: F) -> Result<Self, GrammarError>
    where
        F: Fn(&mut O, &[u8]) + Send + Sync + 'static,
    {
        Self::text_field(max_len, true, Box::new(deliver))
    }

    fn text_field(max_len: usize, allow_empty: bool, deliver: BytesDelivery<O>) -> Result<Self, GrammarError> {
        if max_len == 0 {
            return Err(GrammarError::ZeroTextLength);
        }
        Ok(Field::Text(TextField {
            max_len,
            allow_empty,
            deliver,
        }))
    }

    /// Nested record: `children` decode into a value built by `make`, which is then handed
    /// to `deliver` once per occurrence.
    pub fn group<I, M, F>(children: Vec<Field<I>>, make: M, deliver: F) -> Self
    where
        I: 'static,
        M: Fn() -> I + Send + Sync + 'static,
        F: Fn(&mut O, I) + Send + Sync + 'static,
    {
        Field::Group(Box::new(GroupField {
            children,
            make: Box::new(make),
            deliver: Box::new(deliver),
        }))
    }

    pub fn group_default<I, F>(children: Vec<Field<I>>, deliver: F) -> Self
    where
        I: Default + 'static,
        F: Fn(&mut O, I) + Send + Sync + 'static,
    {
        Self::group(children, I::default, deliver)
    }

    /// `child` repeated as many times as the unsigned count read first.
    ///
    /// Every element must consume at least one byte, so a decode never runs more
    /// iterations than there are bytes left. A child that can succeed without reading
    /// (an empty group, or a group of empty groups) fails with
    /// [`GrammarError::ZeroWidthElement`].
    pub fn repeated(prefix: PrefixWidth, child: Field<O>) -> Result<Self, GrammarError> {
        if child.min_width() == 0 {
            return Err(GrammarError::ZeroWidthElement);
        }
        Ok(Field::Repeated(RepeatedField {
            prefix,
            child: Box::new(child),
        }))
    }

    pub fn binary<F>(prefix: PrefixWidth, deliver: F) -> Self
    where
        F: Fn(&mut O, &[u8]) + Send + Sync + 'static,
    {
        Field::Binary(BinaryField {
            prefix,
            deliver: Box::new(deliver),
        })
    }

    pub fn static_array(count: usize, child: Field<O>) -> Self {
        Field::StaticArray(StaticArrayField {
            count,
            child: Box::new(child),
        })
    }
}

impl<O> std::fmt::Debug for Field<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Scalar(s) => f
                .debug_struct("Scalar")
                .field("type", &s.scalar_type)
                .field("order", &s.order)
                .finish(),
            Field::Text(t) => f
                .debug_struct("Text")
                .field("max_len", &t.max_len)
                .field("allow_empty", &t.allow_empty)
                .finish(),
            Field::Group(g) => f.debug_struct("Group").field("children", &g.child_count()).finish(),
            Field::Repeated(r) => f
                .debug_struct("Repeated")
                .field("prefix", &r.prefix)
                .field("child", &r.child)
                .finish(),
            Field::Binary(b) => f.debug_struct("Binary").field("prefix", &b.prefix).finish(),
            Field::StaticArray(a) => f
                .debug_struct("StaticArray")
                .field("count", &a.count)
                .field("child", &a.child)
                .finish(),
        }
    }
}
