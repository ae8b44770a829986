//! Message declaration core
//!
//! This module provides the field model, descriptors, the message contract,
//! payload structs, and the codec.

mod codec;
mod descriptor;
mod error;
mod field;
mod message;
mod payload;
mod set;
mod types;

pub use codec::{decode, decode_exact, decode_prefix, encode, peek_code};
pub use descriptor::{MessageDescriptor, check_unique_codes};
pub use error::{Error, Result};
pub use field::{Field, FieldSpec};
pub use message::Message;
pub use payload::Msg;
pub use types::{CODE_WIDTH, MessageCode, codes_are_unique};

#[doc(hidden)]
pub use codec::unknown_code;
#[doc(hidden)]
pub use field::{Sealed, read_field, write_field};
