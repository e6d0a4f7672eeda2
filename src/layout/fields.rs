//! Field-by-field decoding of the positional link region

use serde::Serialize;

use super::constants::*;
use super::text::Utf16Field;
use super::wire::{read_f32_le, read_u32_le};

/// Three `f32` components as written by the producer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Read three consecutive little-endian `f32` values
    pub(crate) fn read(bytes: &[u8], offset: usize) -> Self {
        Self {
            x: read_f32_le(bytes, offset),
            y: read_f32_le(bytes, offset + 4),
            z: read_f32_le(bytes, offset + 8),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(f32, f32, f32)> for Vector3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

/// Structural decode of one region image.
///
/// Scalars and vectors are copied out; text fields and the context blob
/// borrow from the image so decoding allocates nothing. The image is
/// untrusted: a non-matching marker still decodes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RawFields<'a> {
    pub ui_version: u32,
    pub ui_tick: u32,
    pub avatar_position: Vector3,
    pub avatar_front: Vector3,
    pub avatar_top: Vector3,
    /// Producer marker
    pub name: Utf16Field<'a>,
    pub camera_position: Vector3,
    pub camera_front: Vector3,
    pub camera_top: Vector3,
    pub identity: Utf16Field<'a>,
    /// Context length as declared by the producer, unclamped
    pub context_len: u32,
    /// Full fixed-capacity context array
    #[serde(skip)]
    pub context: &'a [u8],
    pub description: Utf16Field<'a>,
}

impl<'a> RawFields<'a> {
    /// Decode every field at its fixed offset
    pub fn decode(image: &'a [u8; LINK_SIZE]) -> Self {
        let bytes: &'a [u8] = image;
        Self {
            ui_version: read_u32_le(bytes, VERSION_OFFSET),
            ui_tick: read_u32_le(bytes, TICK_OFFSET),
            avatar_position: Vector3::read(bytes, AVATAR_POSITION_OFFSET),
            avatar_front: Vector3::read(bytes, AVATAR_FRONT_OFFSET),
            avatar_top: Vector3::read(bytes, AVATAR_TOP_OFFSET),
            name: Utf16Field::new(text_field(bytes, NAME_OFFSET, NAME_UNITS)),
            camera_position: Vector3::read(bytes, CAMERA_POSITION_OFFSET),
            camera_front: Vector3::read(bytes, CAMERA_FRONT_OFFSET),
            camera_top: Vector3::read(bytes, CAMERA_TOP_OFFSET),
            identity: Utf16Field::new(text_field(bytes, IDENTITY_OFFSET, IDENTITY_UNITS)),
            context_len: read_u32_le(bytes, CONTEXT_LEN_OFFSET),
            context: &bytes[CONTEXT_OFFSET..CONTEXT_OFFSET + CONTEXT_CAPACITY],
            description: Utf16Field::new(text_field(
                bytes,
                DESCRIPTION_OFFSET,
                DESCRIPTION_UNITS,
            )),
        }
    }

    /// True when the name field carries the Guild Wars 2 marker
    pub fn has_marker(&self) -> bool {
        self.name.matches(PRODUCER_MARKER)
    }

    /// Declared context length clamped to the blob capacity
    pub fn context_len_clamped(&self) -> usize {
        (self.context_len as usize).min(CONTEXT_CAPACITY)
    }

    /// The declared prefix of the context blob
    pub fn declared_context(&self) -> &'a [u8] {
        &self.context[..self.context_len_clamped()]
    }
}

fn text_field(bytes: &[u8], offset: usize, units: usize) -> &[u8] {
    &bytes[offset..offset + units * WCHAR_SIZE]
}
