//! Closed sets of message types and dispatch by code

/// Declare a closed set of message types dispatched by their leading code
///
/// The set is an enum with one variant per member type. A set needs at least
/// one member, and member codes must be unique; a collision fails to compile.
///
/// ```rust
/// use fixmsg::{Message, message, message_set};
///
/// message! {
///     pub struct Ping = 0x01 {
///         pub seq: u32 = 0,
///     }
///     pub struct Level = 0x02 {
///         pub value: i16 = 0,
///     }
/// }
///
/// message_set! {
///     pub enum Inbound {
///         Ping(Ping),
///         Level(Level),
///     }
/// }
///
/// let bytes = Level::new(-3).encode();
/// assert_eq!(Inbound::decode(&bytes)?, Inbound::Level(Level::new(-3)));
/// # Ok::<(), fixmsg::Error>(())
/// ```
///
/// ```rust,compile_fail
/// use fixmsg::{message, message_set};
///
/// message! {
///     pub struct A = 0x01 {}
///     pub struct B = 0x01 {}
/// }
///
/// message_set! {
///     pub enum Clash {
///         A(A),
///         B(B),
///     }
/// }
/// ```
#[macro_export]
macro_rules! message_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )*
        }

        const _: () = ::core::assert!(
            $crate::codes_are_unique(&[$(<$ty as $crate::Message>::CODE),*]),
            "duplicate message code in message set",
        );

        impl $name {
            /// Codes of every member, in declared order
            pub const CODES: &'static [$crate::MessageCode] =
                &[$(<$ty as $crate::Message>::CODE),*];

            /// Descriptors of every member, in declared order
            pub const DESCRIPTORS: &'static [&'static $crate::MessageDescriptor] =
                &[$(<$ty as $crate::Message>::DESCRIPTOR),*];

            /// Code of the held message
            #[must_use]
            pub const fn code(&self) -> $crate::MessageCode {
                match self {
                    $(Self::$variant(_) => <$ty as $crate::Message>::CODE,)*
                }
            }

            /// Encoded size of the held message
            #[must_use]
            pub const fn size(&self) -> usize {
                match self {
                    $(Self::$variant(_) => <$ty as $crate::Message>::SIZE,)*
                }
            }

            /// Descriptor of the held message
            #[must_use]
            pub const fn descriptor(&self) -> &'static $crate::MessageDescriptor {
                match self {
                    $(Self::$variant(_) => <$ty as $crate::Message>::DESCRIPTOR,)*
                }
            }

            /// Descriptor of the member declared with `code`
            #[must_use]
            pub fn descriptor_for(code: $crate::MessageCode) -> ::core::option::Option<&'static $crate::MessageDescriptor> {
                Self::DESCRIPTORS.iter().copied().find(|descriptor| descriptor.code == code)
            }

            /// Encode the held message to bytes
            #[must_use]
            pub fn encode(&self) -> ::std::vec::Vec<u8> {
                match self {
                    $(Self::$variant(message) => $crate::Message::encode(message),)*
                }
            }

            /// Append the held message to `buf`
            pub fn encode_into<B: $crate::__private::BufMut>(&self, buf: &mut B) {
                match self {
                    $(Self::$variant(message) => $crate::Message::encode_into(message, buf),)*
                }
            }

            /// Decode whichever member the leading code names
            pub fn decode(bytes: &[u8]) -> $crate::Result<Self> {
                Self::decode_prefix(bytes).map(|(message, _)| message)
            }

            /// Decode the first message and return the bytes after it
            #[allow(unused_variables)]
            pub fn decode_prefix(bytes: &[u8]) -> $crate::Result<(Self, &[u8])> {
                let code = $crate::peek_code(bytes)?;
                $(
                    if code == <$ty as $crate::Message>::CODE {
                        let (message, rest) = $crate::decode_prefix::<$ty>(bytes)?;
                        return ::core::result::Result::Ok((Self::$variant(message), rest));
                    }
                )*
                ::core::result::Result::Err($crate::__private::unknown_code(code))
            }

            /// Decode back-to-back messages until `bytes` is used up
            pub fn decode_all(mut bytes: &[u8]) -> $crate::Result<::std::vec::Vec<Self>> {
                let mut messages = ::std::vec::Vec::new();
                while !bytes.is_empty() {
                    let (message, rest) = Self::decode_prefix(bytes)?;
                    messages.push(message);
                    bytes = rest;
                }
                ::core::result::Result::Ok(messages)
            }
        }

        $(
            impl ::core::convert::From<$ty> for $name {
                fn from(message: $ty) -> Self {
                    Self::$variant(message)
                }
            }
        )*

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self {
                    $(Self::$variant(message) => ::core::fmt::Display::fmt(message, f),)*
                }
            }
        }
    };
}
