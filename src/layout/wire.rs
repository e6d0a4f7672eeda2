//! Bounds-checked little helpers for reading fixed-width values
//!
//! Every reader takes the byte slice and an offset. Bytes outside the slice
//! read as zero, so no offset can panic regardless of buffer content.

/// Copy `N` bytes starting at `offset`, zero-filled past the end of `bytes`.
#[inline]
pub(crate) fn array_at<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    if let Some(src) = offset
        .checked_add(N)
        .and_then(|end| bytes.get(offset..end))
    {
        out.copy_from_slice(src);
    }
    out
}

#[inline]
pub(crate) fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(array_at(bytes, offset))
}

/// Network byte order, as used for socket ports.
#[inline]
pub(crate) fn read_u16_be(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes(array_at(bytes, offset))
}

#[inline]
pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(array_at(bytes, offset))
}

#[inline]
pub(crate) fn read_u32_be(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(array_at(bytes, offset))
}

#[inline]
pub(crate) fn read_f32_le(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(array_at(bytes, offset))
}

#[inline]
pub(crate) fn read_u8(bytes: &[u8], offset: usize) -> u8 {
    bytes.get(offset).copied().unwrap_or(0)
}
