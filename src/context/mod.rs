//! Session context embedded in the positional link region
//!
//! The context blob starts with a native `sockaddr` for the map server,
//! followed by map and build identifiers:
//!
//! ```text
//! ┌──────────────────────────────────────────┐  offset
//! │ sockaddr_in / sockaddr_in6  (28 bytes)   │  0
//! │ map_id │ map_type │ shard_id │ instance  │  28
//! │ build_id                                 │  44
//! │ ui_state │ compass w/h │ compass rot.    │  48   (extended)
//! │ player x/y │ map center x/y │ map scale  │  60
//! │ process_id │ mount_index                 │  80
//! └──────────────────────────────────────────┘
//! ```
//!
//! Two contexts are equal iff their raw blobs and declared lengths are
//! equal. The decoded fields are presentation only; producers may add
//! fields the decoder does not know about.

pub mod address;
pub mod state;

use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::{LinkError, Result};
use crate::layout::wire::{read_f32_le, read_u16_le, read_u32_le, read_u8};

pub use address::ServerAddress;
pub use state::{ContextExtension, MapType, Mount, UiState};

pub const MAP_ID_OFFSET: usize = address::SOCKADDR_CAPACITY;
pub const MAP_TYPE_OFFSET: usize = MAP_ID_OFFSET + 4;
pub const SHARD_ID_OFFSET: usize = MAP_TYPE_OFFSET + 4;
pub const INSTANCE_OFFSET: usize = SHARD_ID_OFFSET + 4;
pub const BUILD_ID_OFFSET: usize = INSTANCE_OFFSET + 4;
pub const UI_STATE_OFFSET: usize = BUILD_ID_OFFSET + 4;
pub const COMPASS_WIDTH_OFFSET: usize = UI_STATE_OFFSET + 4;
pub const COMPASS_HEIGHT_OFFSET: usize = COMPASS_WIDTH_OFFSET + 2;
pub const COMPASS_ROTATION_OFFSET: usize = COMPASS_HEIGHT_OFFSET + 2;
pub const PLAYER_X_OFFSET: usize = COMPASS_ROTATION_OFFSET + 4;
pub const PLAYER_Y_OFFSET: usize = PLAYER_X_OFFSET + 4;
pub const MAP_CENTER_X_OFFSET: usize = PLAYER_Y_OFFSET + 4;
pub const MAP_CENTER_Y_OFFSET: usize = MAP_CENTER_X_OFFSET + 4;
pub const MAP_SCALE_OFFSET: usize = MAP_CENTER_Y_OFFSET + 4;
pub const PROCESS_ID_OFFSET: usize = MAP_SCALE_OFFSET + 4;
pub const MOUNT_INDEX_OFFSET: usize = PROCESS_ID_OFFSET + 4;

/// Declared length of a context without the extended fields
pub const LEGACY_CONTEXT_LEN: usize = UI_STATE_OFFSET;

/// Minimum declared length carrying every extended field
pub const EXTENDED_CONTEXT_LEN: usize = MOUNT_INDEX_OFFSET + 1;

/// Session context copied out of the region.
///
/// Equality and hashing use the raw blob and the declared length only.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    #[serde(skip)]
    raw: Box<[u8]>,
    declared_len: usize,
    server_address: ServerAddress,
    map_id: u32,
    map_type: u32,
    shard_id: u32,
    instance: u32,
    build_id: u32,
    extension: Option<ContextExtension>,
}

impl Context {
    /// The opaque blob this context was built from
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Context length the producer declared, clamped to the blob
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    pub fn server_address(&self) -> ServerAddress {
        self.server_address
    }

    pub fn port(&self) -> u16 {
        self.server_address.port()
    }

    pub fn map_id(&self) -> u32 {
        self.map_id
    }

    /// Raw map type value
    pub fn map_type_raw(&self) -> u32 {
        self.map_type
    }

    pub fn map_type(&self) -> MapType {
        MapType::from_raw(self.map_type)
    }

    pub fn shard_id(&self) -> u32 {
        self.shard_id
    }

    pub fn instance(&self) -> u32 {
        self.instance
    }

    pub fn build_id(&self) -> u32 {
        self.build_id
    }

    /// Extended fields, present when the producer declared them
    pub fn extension(&self) -> Option<&ContextExtension> {
        self.extension.as_ref()
    }

    /// CRC-32 of the raw blob, for compact logging of session changes
    pub fn fingerprint(&self) -> u32 {
        crc32fast::hash(&self.raw)
    }

    /// Same session as `other` (raw blob equality)
    pub fn same_session(&self, other: &Context) -> bool {
        self == other
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.declared_len == other.declared_len && self.raw == other.raw
    }
}

impl Eq for Context {}

impl Hash for Context {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declared_len.hash(state);
        self.raw.hash(state);
    }
}

/// Builds a [`Context`] from a fixed-capacity blob.
///
/// The blob is the opaque equality key and can be set once; a second
/// [`ContextBuilder::raw`] fails with [`LinkError::InvariantViolation`].
/// Every decoded field is read from that blob.
#[derive(Debug)]
pub struct ContextBuilder {
    declared_len: usize,
    raw: Option<Box<[u8]>>,
}

impl ContextBuilder {
    /// Start a context whose producer declared `declared_len` bytes
    pub fn new(declared_len: usize) -> Self {
        Self {
            declared_len,
            raw: None,
        }
    }

    /// Set the opaque blob
    pub fn raw(mut self, blob: &[u8]) -> Result<Self> {
        if self.raw.is_some() {
            return Err(LinkError::invariant("context blob already set"));
        }
        self.raw = Some(blob.into());
        Ok(self)
    }

    pub fn build(self) -> Result<Context> {
        let raw = self
            .raw
            .ok_or_else(|| LinkError::invariant("context blob was never set"))?;
        let declared_len = self.declared_len.min(raw.len());
        let blob = &raw[..];

        let extension = (declared_len >= EXTENDED_CONTEXT_LEN).then(|| ContextExtension {
            ui_state: UiState(read_u32_le(blob, UI_STATE_OFFSET)),
            compass_width: read_u16_le(blob, COMPASS_WIDTH_OFFSET),
            compass_height: read_u16_le(blob, COMPASS_HEIGHT_OFFSET),
            compass_rotation: read_f32_le(blob, COMPASS_ROTATION_OFFSET),
            player_position: [
                read_f32_le(blob, PLAYER_X_OFFSET),
                read_f32_le(blob, PLAYER_Y_OFFSET),
            ],
            map_center: [
                read_f32_le(blob, MAP_CENTER_X_OFFSET),
                read_f32_le(blob, MAP_CENTER_Y_OFFSET),
            ],
            map_scale: read_f32_le(blob, MAP_SCALE_OFFSET),
            process_id: read_u32_le(blob, PROCESS_ID_OFFSET),
            mount_index: read_u8(blob, MOUNT_INDEX_OFFSET),
        });

        let server_address = ServerAddress::decode(blob);
        let map_id = read_u32_le(blob, MAP_ID_OFFSET);
        let map_type = read_u32_le(blob, MAP_TYPE_OFFSET);
        let shard_id = read_u32_le(blob, SHARD_ID_OFFSET);
        let instance = read_u32_le(blob, INSTANCE_OFFSET);
        let build_id = read_u32_le(blob, BUILD_ID_OFFSET);

        Ok(Context {
            raw,
            declared_len,
            server_address,
            map_id,
            map_type,
            shard_id,
            instance,
            build_id,
            extension,
        })
    }
}

/// Decode the fixed-capacity context blob.
///
/// The whole blob is copied unmodified as the equality key, so every decoded
/// field is covered by it. `declared_len` only gates the extended fields.
pub fn decode(blob: &[u8], declared_len: usize) -> Result<Context> {
    ContextBuilder::new(declared_len).raw(blob)?.build()
}
