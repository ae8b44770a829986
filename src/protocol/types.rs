//! Message code type

use std::fmt;

/// Width of the leading code on the wire, in bytes
pub const CODE_WIDTH: usize = 1;

/// One-byte tag identifying a message type
///
/// Always the first byte of a serialized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MessageCode(u8);

impl MessageCode {
    /// Create a code from its byte value
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Convert to wire bytes
    #[must_use]
    pub const fn to_bytes(self) -> [u8; CODE_WIDTH] {
        [self.0]
    }
}

impl From<u8> for MessageCode {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<MessageCode> for u8 {
    fn from(code: MessageCode) -> Self {
        code.0
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Check at compile time that no two codes are equal
#[must_use]
pub const fn codes_are_unique(codes: &[MessageCode]) -> bool {
    let mut i = 0;
    while i < codes.len() {
        let mut j = i + 1;
        while j < codes.len() {
            if codes[i].0 == codes[j].0 {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}
