//! Reusable payload structs and the generic message wrapper
//!
//! [`payload!`](crate::payload) declares a plain struct of fixed-width fields
//! that is itself a [`Field`], so it can be nested inside a message or
//! another payload. [`Msg`] turns any field into a message by pairing it with
//! a code:
//!
//! ```rust
//! use fixmsg::{Message, Msg, payload};
//!
//! payload! {
//!     /// Grid position
//!     pub struct Point {
//!         pub x: i32 = 0,
//!         pub y: i32 = 0,
//!     }
//! }
//!
//! pub type Position = Msg<Point, 0x05>;
//!
//! let msg = Position::new(Point::new(3, -4));
//! assert_eq!(Position::SIZE, 9);
//! assert_eq!(Position::decode(&msg.encode())?, msg);
//! # Ok::<(), fixmsg::Error>(())
//! ```

use std::fmt;

use bytes::BufMut;

use super::field::{read_field, write_field};
use super::{Field, FieldSpec, Message, MessageCode, MessageDescriptor, Result};

/// Message carrying a single payload value under code `C`
///
/// The descriptor is named after the payload type and lists one field,
/// `data`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Msg<T, const C: u8> {
    /// Payload
    pub data: T,
}

impl<T, const C: u8> Msg<T, C> {
    /// Wrap a payload
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { data }
    }

    /// Unwrap the payload
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T: Field, const C: u8> Msg<T, C> {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::of::<T>("data", "Default::default()")];
    const SHAPE: MessageDescriptor =
        MessageDescriptor::new(T::TYPE_NAME, MessageCode::new(C), Self::FIELDS);
}

impl<T, const C: u8> From<T> for Msg<T, C> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Field + Default + fmt::Debug, const C: u8> Message for Msg<T, C> {
    const CODE: MessageCode = MessageCode::new(C);
    const SIZE: usize = super::CODE_WIDTH + T::WIDTH;
    const DESCRIPTOR: &'static MessageDescriptor = &Self::SHAPE;

    fn encode_payload<B: BufMut>(&self, buf: &mut B) {
        write_field(&self.data, buf, T::TYPE_NAME, "data");
    }

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut buf = payload;
        let data = read_field::<T>(&mut buf, T::TYPE_NAME, "data")?;
        Ok(Self { data })
    }
}

impl<T: Field + Default + fmt::Debug, const C: u8> fmt::Display for Msg<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - code: {}, data: {:?}",
            T::TYPE_NAME,
            <Self as Message>::CODE,
            self.data
        )
    }
}

/// Declare one or more reusable payload structs
///
/// A payload has the same field syntax as [`message!`](crate::message) but no
/// code. It implements [`Field`](crate::Field) with a width equal to the sum
/// of its field widths, so it can be a field of a message, a field of another
/// payload, or the `T` of a [`Msg`](crate::Msg). It also gets `Default`,
/// `new`, positional `From` impls and a `FIELDS` list.
///
/// ```rust
/// use fixmsg::{Field, Message, message, payload};
///
/// payload! {
///     pub struct Point {
///         pub x: i16 = 0,
///         pub y: i16 = 0,
///     }
/// }
///
/// message! {
///     pub struct Segment = 0x07 {
///         pub from: Point = Point::default(),
///         pub to: Point = Point::new(1, 1),
///     }
/// }
///
/// assert_eq!(Point::WIDTH, 4);
/// assert_eq!(Segment::SIZE, 9);
/// assert_eq!(Segment::default().to.x, 1);
/// ```
#[macro_export]
macro_rules! payload {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty = $default:expr
            ),* $(,)?
        }
    )+) => {$(
        $crate::__fixed_struct! {
            $(#[$meta])*
            $vis struct $name {
                $( $(#[$fmeta])* $fvis $field : $fty = $default ),*
            }
        }

        impl $name {
            /// Fields in wire order
            pub const FIELDS: &'static [$crate::FieldSpec] = &[$(
                $crate::FieldSpec::new(
                    ::core::stringify!($field),
                    ::core::stringify!($fty),
                    ::core::stringify!($default),
                    <$fty as $crate::Field>::WIDTH,
                )
            ),*];
        }

        impl $crate::__private::Sealed for $name {}

        impl $crate::Field for $name {
            const WIDTH: usize = 0 $(+ <$fty as $crate::Field>::WIDTH)*;
            const TYPE_NAME: &'static str = ::core::stringify!($name);

            #[allow(unused_variables)]
            fn put<B: $crate::__private::BufMut>(&self, buf: &mut B) {
                $( <$fty as $crate::Field>::put(&self.$field, buf); )*
            }

            #[allow(unused_variables)]
            fn get<B: $crate::__private::Buf>(buf: &mut B) -> ::core::option::Option<Self> {
                ::core::option::Option::Some(Self {
                    $( $field: <$fty as $crate::Field>::get(buf)?, )*
                })
            }
        }

        const _: () = {
            $(
                ::core::assert!(
                    <$fty as $crate::Field>::WIDTH > 0,
                    "payload field has zero width",
                );
            )*
        };
    )+};
}
