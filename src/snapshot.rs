//! Snapshot assembly: marker check plus context and identity decoding

use log::{debug, trace, warn};
use serde::Serialize;

use crate::config::EXPECTED_UI_VERSION;
use crate::context::{self, Context};
use crate::error::Result;
use crate::identity::{self, Identity};
use crate::layout::{RawFields, Vector3, CONTEXT_CAPACITY};

/// One decoded read of the region.
///
/// Owns all of its data; the mapping may be closed or overwritten without
/// affecting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Avatar {
    version: u32,
    tick: u64,
    avatar_position: Vector3,
    avatar_front: Vector3,
    avatar_top: Vector3,
    camera_position: Vector3,
    camera_front: Vector3,
    camera_top: Vector3,
    context: Context,
    identity: Identity,
    description: String,
}

impl Avatar {
    /// Protocol version written by the producer
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Update counter; advances once per producer frame
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn avatar_position(&self) -> Vector3 {
        self.avatar_position
    }

    pub fn avatar_front(&self) -> Vector3 {
        self.avatar_front
    }

    pub fn avatar_top(&self) -> Vector3 {
        self.avatar_top
    }

    pub fn camera_position(&self) -> Vector3 {
        self.camera_position
    }

    pub fn camera_front(&self) -> Vector3 {
        self.camera_front
    }

    pub fn camera_top(&self) -> Vector3 {
        self.camera_top
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Informational text; Guild Wars 2 leaves it empty
    pub fn description(&self) -> &str {
        &self.description
    }

    /// True when both snapshots carry byte-identical contexts
    pub fn is_same_session(&self, other: &Avatar) -> bool {
        self.context.same_session(&other.context)
    }
}

/// Turn a structural decode into a snapshot.
///
/// Returns `Ok(None)` when the producer marker is absent, which is the
/// normal state while the game is not running. Errors are reserved for
/// malformed sub-payloads.
pub fn assemble(raw: &RawFields<'_>) -> Result<Option<Avatar>> {
    if !raw.has_marker() {
        trace!("producer marker absent (name = {:?})", raw.name);
        return Ok(None);
    }

    if raw.ui_version != EXPECTED_UI_VERSION {
        debug!(
            "producer reports ui_version {}, expected {}",
            raw.ui_version, EXPECTED_UI_VERSION
        );
    }

    if raw.context_len as usize > CONTEXT_CAPACITY {
        warn!(
            "declared context length {} exceeds capacity {}, clamping",
            raw.context_len, CONTEXT_CAPACITY
        );
    }

    let context = context::decode(raw.context, raw.context_len_clamped())?;
    let identity = identity::decode(&raw.identity.to_string_lossy())?;

    Ok(Some(Avatar {
        version: raw.ui_version,
        tick: u64::from(raw.ui_tick),
        avatar_position: raw.avatar_position,
        avatar_front: raw.avatar_front,
        avatar_top: raw.avatar_top,
        camera_position: raw.camera_position,
        camera_front: raw.camera_front,
        camera_top: raw.camera_top,
        context,
        identity,
        description: raw.description.to_string_lossy(),
    }))
}
