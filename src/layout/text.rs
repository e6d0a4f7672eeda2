//! Fixed-width UTF-16 text fields

use std::fmt;

use serde::{Serialize, Serializer};

use super::constants::WCHAR_SIZE;

/// A borrowed, NUL-terminated UTF-16LE text field.
///
/// The terminator search never runs past the field's declared width: a field
/// with no NUL spans the whole width.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Utf16Field<'a> {
    bytes: &'a [u8],
}

impl<'a> Utf16Field<'a> {
    /// Wrap a fixed-width field, truncated at its first NUL unit
    pub fn new(field: &'a [u8]) -> Self {
        let units = field.len() / WCHAR_SIZE;
        let len = field
            .chunks_exact(WCHAR_SIZE)
            .position(|unit| unit[0] == 0 && unit[1] == 0)
            .unwrap_or(units);
        Self {
            bytes: &field[..len * WCHAR_SIZE],
        }
    }

    /// Code units before the terminator
    pub fn units(&self) -> impl Iterator<Item = u16> + 'a {
        let bytes: &'a [u8] = self.bytes;
        bytes
            .chunks_exact(WCHAR_SIZE)
            .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
    }

    /// Number of code units before the terminator
    pub fn len_units(&self) -> usize {
        self.bytes.len() / WCHAR_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Compare against `text` without allocating
    pub fn matches(&self, text: &str) -> bool {
        self.units().eq(text.encode_utf16())
    }

    /// Decode to a `String`, replacing unpaired surrogates with U+FFFD
    pub fn to_string_lossy(&self) -> String {
        char::decode_utf16(self.units())
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

impl fmt::Debug for Utf16Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl fmt::Display for Utf16Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Serialize for Utf16Field<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}
