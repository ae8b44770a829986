//! Message codec (encode/decode)
//!
//! Every message is `[CODE (1 byte)] [FIELDS (fixed width)]`. Decoding checks
//! the leading code and the buffer length before any field is read.

use tracing::{debug, trace};

use super::{CODE_WIDTH, Error, Message, MessageCode, Result};

/// Read the leading code of a buffer
///
/// # Errors
///
/// Returns [`Error::BufferTooSmall`] if the buffer is empty.
pub fn peek_code(bytes: &[u8]) -> Result<MessageCode> {
    match bytes.first() {
        Some(&byte) => Ok(MessageCode::new(byte)),
        None => Err(Error::BufferTooSmall {
            needed: CODE_WIDTH,
            got: 0,
        }),
    }
}

/// Encode a message to bytes
///
/// # Format
///
/// ```text
/// [CODE (1 byte)] [FIELD 1] ... [FIELD N]
/// ```
#[must_use]
pub fn encode<M: Message>(message: &M) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(M::SIZE);
    message.encode_into(&mut bytes);

    trace!(code = %M::CODE, size = M::SIZE, "encoded message");
    bytes
}

/// Decode a message from the front of `bytes`
///
/// Bytes past `M::SIZE` are ignored.
pub fn decode<M: Message>(bytes: &[u8]) -> Result<M> {
    decode_prefix(bytes).map(|(message, _)| message)
}

/// Decode a message from a buffer that holds exactly one message
pub fn decode_exact<M: Message>(bytes: &[u8]) -> Result<M> {
    let (message, rest) = decode_prefix::<M>(bytes)?;
    if !rest.is_empty() {
        let err = Error::TrailingBytes {
            message: M::DESCRIPTOR.name,
            extra: rest.len(),
        };
        debug!(error = %err, "rejected message");
        return Err(err);
    }
    Ok(message)
}

/// Decode a message from the front of `bytes` and return what follows it
///
/// # Errors
///
/// Returns an error if:
/// - Leading code is not `M::CODE`
/// - Buffer is shorter than `M::SIZE`
/// - A field holds an invalid value
pub fn decode_prefix<M: Message>(bytes: &[u8]) -> Result<(M, &[u8])> {
    check_frame::<M>(bytes).inspect_err(|err| debug!(error = %err, "rejected message"))?;

    let (frame, rest) = bytes.split_at(M::SIZE);
    let message = M::decode_payload(&frame[CODE_WIDTH..])
        .inspect_err(|err| debug!(error = %err, "rejected message"))?;

    trace!(code = %M::CODE, size = M::SIZE, "decoded message");
    Ok((message, rest))
}

fn check_frame<M: Message>(bytes: &[u8]) -> Result<()> {
    let Some(&byte) = bytes.first() else {
        return Err(Error::BufferTooSmall {
            needed: M::SIZE,
            got: 0,
        });
    };

    let found = MessageCode::new(byte);
    if found != M::CODE {
        return Err(Error::CodeMismatch {
            expected: M::CODE,
            found,
        });
    }

    if bytes.len() < M::SIZE {
        return Err(Error::BufferTooSmall {
            needed: M::SIZE,
            got: bytes.len(),
        });
    }

    Ok(())
}

/// Error for a code that no member of a message set claims
#[doc(hidden)]
#[must_use]
pub fn unknown_code(code: MessageCode) -> Error {
    let err = Error::UnknownCode { code };
    debug!(error = %err, "rejected message");
    err
}
