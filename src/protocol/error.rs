//! Message declaration and codec errors

use thiserror::Error;

use super::MessageCode;

/// Errors raised while declaring, encoding or decoding messages
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer too small
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Leading code does not belong to the requested type
    #[error("code mismatch: expected {expected}, got {found}")]
    CodeMismatch {
        /// Code of the type being decoded
        expected: MessageCode,
        /// Code found in the buffer
        found: MessageCode,
    },

    /// No member of the message set carries this code
    #[error("unknown message code: {code}")]
    UnknownCode {
        /// Code found in the buffer
        code: MessageCode,
    },

    /// Exact decode left bytes behind
    #[error("{message}: {extra} trailing bytes after message")]
    TrailingBytes {
        /// Message type name
        message: &'static str,
        /// Bytes left over
        extra: usize,
    },

    /// Field bytes are not a valid value of the field type
    #[error("{message}.{field}: invalid field value")]
    InvalidFieldValue {
        /// Message type name
        message: &'static str,
        /// Field name
        field: &'static str,
    },

    /// Field consumed a different number of bytes than its declared width
    #[error("{message}.{field}: read {consumed} bytes from a {width}-byte field")]
    FieldWidthMismatch {
        /// Message type name
        message: &'static str,
        /// Field name
        field: &'static str,
        /// Declared width
        width: usize,
        /// Bytes actually read
        consumed: usize,
    },

    /// Two message types share a code
    #[error("duplicate message code {code}: {first} and {second}")]
    DuplicateCode {
        /// Shared code
        code: MessageCode,
        /// First type declared with the code
        first: &'static str,
        /// Second type declared with the code
        second: &'static str,
    },

    /// Field occupies no bytes
    #[error("{message}.{field}: field has zero width")]
    ZeroWidthField {
        /// Message type name
        message: &'static str,
        /// Field name
        field: &'static str,
    },

    /// Field name declared twice
    #[error("{message}.{field}: field declared more than once")]
    DuplicateField {
        /// Message type name
        message: &'static str,
        /// Field name
        field: &'static str,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
