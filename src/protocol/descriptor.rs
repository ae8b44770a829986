//! Message type descriptors
//!
//! A descriptor is the immutable, `'static` shape of a declared message type:
//! its code and the ordered field specs. Every type produced by
//! [`message!`](crate::message) exposes one through
//! [`Message::DESCRIPTOR`](super::Message::DESCRIPTOR).

use std::fmt;

use super::{CODE_WIDTH, Error, FieldSpec, MessageCode, Result};

/// Declared shape of a message type
///
/// # Wire Format
///
/// ```text
/// +--------+-----------+-----------+-----+-----------+
/// | code   | field 1   | field 2   | ... | field n   |
/// | 1 byte | width 1   | width 2   |     | width n   |
/// +--------+-----------+-----------+-----+-----------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MessageDescriptor {
    /// Type name
    pub name: &'static str,
    /// Leading code
    pub code: MessageCode,
    /// Fields in wire order
    pub fields: &'static [FieldSpec],
}

impl MessageDescriptor {
    /// Create a descriptor
    #[must_use]
    pub const fn new(name: &'static str, code: MessageCode, fields: &'static [FieldSpec]) -> Self {
        Self { name, code, fields }
    }

    /// Total encoded size, code included
    #[must_use]
    pub const fn size(&self) -> usize {
        CODE_WIDTH + self.payload_size()
    }

    /// Encoded size of the fields alone
    #[must_use]
    pub const fn payload_size(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].width;
            i += 1;
        }
        total
    }

    /// Look up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Byte offset of a field from the start of the message
    #[must_use]
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.layout()
            .find(|(_, field)| field.name == name)
            .map(|(offset, _)| offset)
    }

    /// Fields paired with their byte offsets
    pub fn layout(&self) -> impl Iterator<Item = (usize, &'static FieldSpec)> + '_ {
        self.fields.iter().scan(CODE_WIDTH, |offset, field| {
            let at = *offset;
            *offset += field.width;
            Some((at, field))
        })
    }

    /// Check the declaration for zero-width or repeated fields
    pub fn validate(&self) -> Result<()> {
        for (index, field) in self.fields.iter().enumerate() {
            if field.width == 0 {
                return Err(Error::ZeroWidthField {
                    message: self.name,
                    field: field.name,
                });
            }
            if self.fields[..index].iter().any(|prev| prev.name == field.name) {
                return Err(Error::DuplicateField {
                    message: self.name,
                    field: field.name,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for MessageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (code {}, {} bytes)", self.name, self.code, self.size())?;
        writeln!(f, "  {:>6}  {:>5}  code", 0, CODE_WIDTH)?;
        for (offset, field) in self.layout() {
            writeln!(
                f,
                "  {:>6}  {:>5}  {}: {} = {}",
                offset, field.width, field.name, field.type_name, field.default
            )?;
        }
        Ok(())
    }
}

/// Check that no two descriptors share a code
pub fn check_unique_codes(descriptors: &[&MessageDescriptor]) -> Result<()> {
    for (index, descriptor) in descriptors.iter().enumerate() {
        if let Some(first) = descriptors[..index]
            .iter()
            .find(|prev| prev.code == descriptor.code)
        {
            return Err(Error::DuplicateCode {
                code: descriptor.code,
                first: first.name,
                second: descriptor.name,
            });
        }
    }
    Ok(())
}
