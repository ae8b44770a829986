//! fixmsg - Declarative fixed-layout binary messages
//!
//! Each message type is a one-byte code followed by an ordered list of
//! fixed-width fields with defaults. Types are declared once with
//! [`message!`], or as a reusable [`payload!`] struct wrapped in [`Msg`],
//! grouped for dispatch with [`message_set!`], and carried over any byte
//! channel with validated encode/decode.
//!
//! # Quick Start
//!
//! ```rust
//! use fixmsg::{Message, message};
//!
//! message! {
//!     /// A single reading
//!     pub struct Reading = 0x02 {
//!         pub value: i32 = 0,
//!     }
//! }
//!
//! // Create a message
//! let msg = Reading::new(42);
//! assert_eq!(msg.size(), 5);
//!
//! // Encode to bytes
//! let bytes = msg.encode();
//!
//! // Decode from bytes
//! let decoded = Reading::decode(&bytes)?;
//! assert_eq!(decoded.value, 42);
//! # Ok::<(), fixmsg::Error>(())
//! ```
//!
//! # Wire Format
//!
//! ```text
//! [CODE (1 byte)] [FIELD 1] [FIELD 2] ... [FIELD N]
//! ```
//!
//! Fields are written in declared order, in native byte order, with no
//! padding. The size of a type never varies between instances.
//!
//! # Features
//!
//! - **Compile-time declarations** - field types and widths are checked by
//!   the compiler
//! - **Validated decoding** - length, code and field values are checked
//! - **Closed dispatch sets** - duplicate codes fail to compile

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    CODE_WIDTH, Error, Field, FieldSpec, Message, MessageCode, MessageDescriptor, Msg, Result,
    check_unique_codes, codes_are_unique, decode, decode_exact, decode_prefix, encode, peek_code,
};

#[doc(hidden)]
pub mod __private {
    pub use crate::protocol::{Sealed, read_field, unknown_code, write_field};
    pub use bytes::{Buf, BufMut};
}
