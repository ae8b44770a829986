//! Field types and field specs
//!
//! A field is a fixed-width value written in native byte order with no
//! padding. Anything that implements [`Field`] can appear in a
//! [`message!`](crate::message) declaration.
//!
//! `Field` is sealed: the crate implements it for primitives and arrays, and
//! [`payload!`](crate::payload) implements it for composite structs, so a
//! field's width is always the sum of the widths it is built from.

use bytes::{Buf, BufMut};
use tracing::debug;

use super::{Error, Result};

/// Implemented by crate field types and `payload!` structs only
#[doc(hidden)]
pub trait Sealed {}

/// A fixed-width payload value
///
/// Implement composite fields with [`payload!`](crate::payload); hand-written
/// implementations are rejected:
///
/// ```rust,compile_fail
/// use fixmsg::Field;
/// use bytes::{Buf, BufMut};
///
/// #[derive(Clone, Copy)]
/// struct Padded(u8);
///
/// impl Field for Padded {
///     const WIDTH: usize = 4;
///     const TYPE_NAME: &'static str = "Padded";
///     fn put<B: BufMut>(&self, buf: &mut B) { buf.put_u8(self.0); }
///     fn get<B: Buf>(buf: &mut B) -> Option<Self> { Some(Padded(buf.get_u8())) }
/// }
/// ```
pub trait Field: Sealed + Copy + Sized {
    /// Encoded width in bytes
    const WIDTH: usize;

    /// Type name shown in descriptors
    ///
    /// Arrays report `"array"` whatever their element type and length;
    /// [`message!`](crate::message) records the type as written instead, so
    /// a `[u16; 3]` field shows as `[u16; 3]` in a generated descriptor.
    const TYPE_NAME: &'static str;

    /// Append the encoded value, exactly `WIDTH` bytes
    fn put<B: BufMut>(&self, buf: &mut B);

    /// Read a value, `None` if the bytes are not a valid value
    ///
    /// Consumes exactly `WIDTH` bytes when enough are available.
    fn get<B: Buf>(buf: &mut B) -> Option<Self>;
}

/// Write one field into exactly `F::WIDTH` bytes
///
/// A short write is zero-filled so the fields after it keep their offsets.
///
/// # Panics
///
/// Panics if the field writes more than `F::WIDTH` bytes.
#[doc(hidden)]
pub fn write_field<F: Field, B: BufMut>(
    value: &F,
    buf: &mut B,
    message: &'static str,
    field: &'static str,
) {
    let mut limited = (&mut *buf).limit(F::WIDTH);
    value.put(&mut limited);
    let missing = bytes::buf::Limit::limit(&limited);
    if missing > 0 {
        debug!(
            message,
            field,
            width = F::WIDTH,
            missing,
            "field wrote fewer bytes than its width"
        );
        buf.put_bytes(0, missing);
    }
}

/// Read one field from the front of `buf`, consuming exactly `F::WIDTH` bytes
///
/// # Errors
///
/// Returns an error if:
/// - Fewer than `F::WIDTH` bytes remain
/// - The bytes are not a valid value
/// - The field reads fewer bytes than its width
#[doc(hidden)]
pub fn read_field<F: Field>(
    buf: &mut &[u8],
    message: &'static str,
    field: &'static str,
) -> Result<F> {
    if buf.len() < F::WIDTH {
        return Err(Error::BufferTooSmall {
            needed: F::WIDTH,
            got: buf.len(),
        });
    }

    let whole = *buf;
    let (mut reader, tail) = whole.split_at(F::WIDTH);
    let value = F::get(&mut reader).ok_or(Error::InvalidFieldValue { message, field })?;
    if !reader.is_empty() {
        return Err(Error::FieldWidthMismatch {
            message,
            field,
            width: F::WIDTH,
            consumed: F::WIDTH - reader.len(),
        });
    }

    *buf = tail;
    Ok(value)
}

macro_rules! impl_numeric_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Sealed for $ty {}

            impl Field for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                const TYPE_NAME: &'static str = stringify!($ty);

                #[inline]
                fn put<B: BufMut>(&self, buf: &mut B) {
                    buf.put_slice(&self.to_ne_bytes());
                }

                #[inline]
                fn get<B: Buf>(buf: &mut B) -> Option<Self> {
                    if buf.remaining() < Self::WIDTH {
                        return None;
                    }
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_to_slice(&mut raw);
                    Some(<$ty>::from_ne_bytes(raw))
                }
            }
        )*
    };
}

impl_numeric_field!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl Sealed for bool {}

impl Field for bool {
    const WIDTH: usize = 1;
    const TYPE_NAME: &'static str = "bool";

    fn put<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(u8::from(*self));
    }

    fn get<B: Buf>(buf: &mut B) -> Option<Self> {
        match u8::get(buf)? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

impl Sealed for char {}

impl Field for char {
    const WIDTH: usize = 4;
    const TYPE_NAME: &'static str = "char";

    fn put<B: BufMut>(&self, buf: &mut B) {
        u32::from(*self).put(buf);
    }

    fn get<B: Buf>(buf: &mut B) -> Option<Self> {
        char::from_u32(u32::get(buf)?)
    }
}

impl<T: Field + Default, const N: usize> Sealed for [T; N] {}

impl<T: Field + Default, const N: usize> Field for [T; N] {
    const WIDTH: usize = T::WIDTH * N;
    const TYPE_NAME: &'static str = "array";

    fn put<B: BufMut>(&self, buf: &mut B) {
        for item in self {
            item.put(buf);
        }
    }

    fn get<B: Buf>(buf: &mut B) -> Option<Self> {
        if buf.remaining() < Self::WIDTH {
            return None;
        }
        let mut out = [T::default(); N];
        for slot in &mut out {
            *slot = T::get(buf)?;
        }
        Some(out)
    }
}

/// Declared shape of one payload slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,
    /// Rust type as written in the declaration
    pub type_name: &'static str,
    /// Default expression as written in the declaration
    pub default: &'static str,
    /// Encoded width in bytes
    pub width: usize,
}

impl FieldSpec {
    /// Describe a field of type `T`
    ///
    /// The type name comes from [`Field::TYPE_NAME`], so arrays show as
    /// `"array"`.
    #[must_use]
    pub const fn of<T: Field>(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            type_name: T::TYPE_NAME,
            default,
            width: T::WIDTH,
        }
    }

    /// Describe a field with an explicit type name
    #[must_use]
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        default: &'static str,
        width: usize,
    ) -> Self {
        Self {
            name,
            type_name,
            default,
            width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Field + PartialEq + std::fmt::Debug>(value: T) {
        let mut buf = Vec::new();
        value.put(&mut buf);
        assert_eq!(buf.len(), T::WIDTH);
        let mut slice = buf.as_slice();
        assert_eq!(T::get(&mut slice), Some(value));
        assert!(slice.is_empty());
    }

    #[test]
    fn test_widths() {
        assert_eq!(u8::WIDTH, 1);
        assert_eq!(i32::WIDTH, 4);
        assert_eq!(f32::WIDTH, 4);
        assert_eq!(f64::WIDTH, 8);
        assert_eq!(u128::WIDTH, 16);
        assert_eq!(bool::WIDTH, 1);
        assert_eq!(char::WIDTH, 4);
        assert_eq!(<[u16; 3]>::WIDTH, 6);
    }

    #[test]
    fn test_native_byte_order() {
        let mut buf = Vec::new();
        0x0102_0304_u32.put(&mut buf);
        assert_eq!(buf, 0x0102_0304_u32.to_ne_bytes());
    }

    #[test]
    fn test_field_roundtrip() {
        roundtrip(42_i32);
        roundtrip(-7_i8);
        roundtrip(u64::MAX);
        roundtrip(3.14_f32);
        roundtrip(true);
        roundtrip('λ');
        roundtrip([1_u16, 2, 3]);
        roundtrip(*b"abcd");
    }

    #[test]
    fn test_invalid_bool() {
        let mut slice: &[u8] = &[2];
        assert_eq!(bool::get(&mut slice), None);
    }

    #[test]
    fn test_invalid_char() {
        let mut buf = Vec::new();
        0xD800_u32.put(&mut buf);
        assert_eq!(char::get(&mut buf.as_slice()), None);
    }

    #[test]
    fn test_short_input() {
        let mut slice: &[u8] = &[1, 2, 3];
        assert_eq!(u32::get(&mut slice), None);
        assert_eq!(slice.len(), 3);
    }

    #[test]
    fn test_field_spec_of() {
        let spec = FieldSpec::of::<f32>("value", "0.0");
        assert_eq!(spec.type_name, "f32");
        assert_eq!(spec.width, 4);
        assert_eq!(spec.default, "0.0");
    }
}
