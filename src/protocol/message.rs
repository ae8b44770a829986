//! Message contract and the `message!` type generator

use std::fmt;
use std::io;

use bytes::BufMut;

use super::{MessageCode, MessageDescriptor, Result};

/// Contract implemented by every declared message type
///
/// Implementations come from [`message!`](crate::message) or the generic
/// [`Msg`](crate::Msg) wrapper; the provided methods cover encoding and
/// validated decoding.
pub trait Message: Copy + Default + fmt::Debug {
    /// Leading code, fixed for the type
    const CODE: MessageCode;

    /// Encoded size in bytes, code included
    const SIZE: usize;

    /// Declared shape of the type
    const DESCRIPTOR: &'static MessageDescriptor;

    /// Append the fields, without the code
    fn encode_payload<B: BufMut>(&self, buf: &mut B);

    /// Rebuild the fields from exactly `SIZE - CODE_WIDTH` bytes
    fn decode_payload(payload: &[u8]) -> Result<Self>;

    /// Code of this instance's type
    ///
    /// Instances carry no code of their own, so this can never disagree with
    /// [`Message::CODE`].
    #[must_use]
    fn code(&self) -> MessageCode {
        Self::CODE
    }

    /// Encoded size of this instance's type
    #[must_use]
    fn size(&self) -> usize {
        Self::SIZE
    }

    /// Declared shape of the type
    #[must_use]
    fn descriptor() -> &'static MessageDescriptor {
        Self::DESCRIPTOR
    }

    /// Append code and fields to `buf`
    fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&Self::CODE.to_bytes());
        self.encode_payload(buf);
    }

    /// Encode message to bytes
    #[must_use]
    fn encode(&self) -> Vec<u8> {
        super::encode(self)
    }

    /// Write the encoded message to a channel
    fn write_to<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.encode())?;
        Ok(())
    }

    /// Decode message from bytes, ignoring anything after `SIZE` bytes
    fn decode(bytes: &[u8]) -> Result<Self> {
        super::decode(bytes)
    }

    /// Decode message from bytes holding exactly one message
    fn decode_exact(bytes: &[u8]) -> Result<Self> {
        super::decode_exact(bytes)
    }

    /// Decode the first message and return the bytes after it
    fn decode_prefix(bytes: &[u8]) -> Result<(Self, &[u8])> {
        super::decode_prefix(bytes)
    }
}

/// Declare one or more fixed-layout message types
///
/// Each declaration names the type, its one-byte code and its fields with
/// their defaults:
///
/// ```rust
/// use fixmsg::{Message, message};
///
/// message! {
///     /// Two-field sample
///     pub struct Sample = 0x03 {
///         pub value: f32 = 0.0,
///         pub tag: u8 = b'A',
///     }
/// }
///
/// let msg = Sample::new(3.14, b'B');
/// assert_eq!(Sample::SIZE, 6);
/// assert_eq!(Sample::from((1.5,)).tag, b'A');
/// assert_eq!(Sample::decode(&msg.encode())?, msg);
/// # Ok::<(), fixmsg::Error>(())
/// ```
///
/// The generated type gets `Default` from the declared defaults, a full
/// positional `new`, a `From` impl for every positional prefix of the field
/// list (missing trailing fields take their defaults), `Display`, and
/// [`Message`].
///
/// Field types must implement [`Field`](crate::Field) and have a non-zero
/// width; both are checked at compile time. The code literal must fit in a
/// `u8`. A zero-width field is rejected:
///
/// ```rust,compile_fail
/// use fixmsg::message;
///
/// message! {
///     pub struct Hollow = 0x01 {
///         pub nothing: [u8; 0] = [],
///     }
/// }
/// ```
///
/// and so is a type with no fixed wire width:
///
/// ```rust,compile_fail
/// use fixmsg::message;
///
/// message! {
///     pub struct Counted = 0x01 {
///         pub len: usize = 0,
///     }
/// }
/// ```
#[macro_export]
macro_rules! message {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $code:literal {
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

        impl $crate::Message for $name {
            const CODE: $crate::MessageCode = $crate::MessageCode::new($code);
            const SIZE: usize = $crate::CODE_WIDTH $(+ <$fty as $crate::Field>::WIDTH)*;
            const DESCRIPTOR: &'static $crate::MessageDescriptor = &$crate::MessageDescriptor::new(
                ::core::stringify!($name),
                $crate::MessageCode::new($code),
                &[$(
                    $crate::FieldSpec::new(
                        ::core::stringify!($field),
                        ::core::stringify!($fty),
                        ::core::stringify!($default),
                        <$fty as $crate::Field>::WIDTH,
                    )
                ),*],
            );

            #[allow(unused_variables)]
            fn encode_payload<B: $crate::__private::BufMut>(&self, buf: &mut B) {
                $(
                    $crate::__private::write_field(
                        &self.$field,
                        buf,
                        ::core::stringify!($name),
                        ::core::stringify!($field),
                    );
                )*
            }

            #[allow(unused_mut, unused_variables)]
            fn decode_payload(payload: &[u8]) -> $crate::Result<Self> {
                let mut buf = payload;
                ::core::result::Result::Ok(Self {
                    $(
                        $field: $crate::__private::read_field::<$fty>(
                            &mut buf,
                            ::core::stringify!($name),
                            ::core::stringify!($field),
                        )?,
                    )*
                })
            }
        }

        const _: () = {
            $(
                ::core::assert!(
                    <$fty as $crate::Field>::WIDTH > 0,
                    "message field has zero width",
                );
            )*
            ::core::assert!(
                <$name as $crate::Message>::DESCRIPTOR.size() == <$name as $crate::Message>::SIZE,
                "descriptor size disagrees with field widths",
            );
        };

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::write!(
                    f,
                    "{} - code: {}",
                    ::core::stringify!($name),
                    <Self as $crate::Message>::CODE,
                )?;
                $( ::core::write!(f, ", {}: {:?}", ::core::stringify!($field), self.$field)?; )*
                ::core::result::Result::Ok(())
            }
        }
    )+};
}

/// Struct, constructors and positional `From` impls shared by `message!`
/// and `payload!`
#[doc(hidden)]
#[macro_export]
macro_rules! __fixed_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty = $default:expr
            ),*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
        }

        impl $name {
            /// Create from every field value, in declared order
            #[must_use]
            #[allow(clippy::too_many_arguments)]
            pub const fn new($($field: $fty),*) -> Self {
                Self { $($field),* }
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self { $($field: $default),* }
            }
        }

        $crate::__message_prefixes!($name; []; [$($field : $fty),*]);
    };
}

/// Emit a `From` impl for each positional prefix of a field list
#[doc(hidden)]
#[macro_export]
macro_rules! __message_prefixes {
    ($name:ident; [$($done:ident : $dty:ty),*]; []) => {
        $crate::__message_prefix!($name; [$($done : $dty),*]);
    };
    ($name:ident; [$($done:ident : $dty:ty),*]; [$next:ident : $nty:ty $(, $rest:ident : $rty:ty)*]) => {
        $crate::__message_prefix!($name; [$($done : $dty),*]);
        $crate::__message_prefixes!($name; [$($done : $dty,)* $next : $nty]; [$($rest : $rty),*]);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __message_prefix {
    ($name:ident; [$($field:ident : $fty:ty),*]) => {
        impl ::core::convert::From<($($fty,)*)> for $name {
            #[allow(clippy::needless_update)]
            fn from(($($field,)*): ($($fty,)*)) -> Self {
                Self {
                    $($field,)*
                    ..<Self as ::core::default::Default>::default()
                }
            }
        }
    };
}
