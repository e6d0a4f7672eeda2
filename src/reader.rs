//! Reader owning the region mapping for its lifetime

use log::debug;

use crate::error::{LinkError, Result};
use crate::layout::{RawFields, LINK_SIZE};
use crate::memory::{RegionConfig, SharedMemoryRegion};
use crate::snapshot::{self, Avatar};

/// Reads snapshots from the positional link region.
///
/// The mapping is acquired in [`LinkReader::open`] and released by
/// [`LinkReader::close`] or on drop. Reads take `&self`; closing takes
/// `&mut self`, so a reader shared between threads needs external
/// synchronisation. No lock is taken against the producer: every read is a
/// best-effort copy that may mix two producer frames.
#[derive(Debug)]
pub struct LinkReader {
    region: Option<SharedMemoryRegion>,
}

impl LinkReader {
    /// Map the region described by `config`
    pub fn open(config: &RegionConfig) -> Result<Self> {
        let region = SharedMemoryRegion::open_or_create(config)?;
        Ok(Self {
            region: Some(region),
        })
    }

    /// Map the region under the platform's default name
    pub fn open_default() -> Result<Self> {
        Self::open(&RegionConfig::default())
    }

    /// Read one snapshot.
    ///
    /// `Ok(None)` means the producer marker is absent (game not running or
    /// not yet publishing).
    pub fn read(&self) -> Result<Option<Avatar>> {
        let image = self.read_image()?;
        snapshot::assemble(&RawFields::decode(&image))
    }

    /// Copy the current region bytes, for callers that decode themselves
    pub fn read_image(&self) -> Result<[u8; LINK_SIZE]> {
        let region = self.region()?;
        let mut image = [0u8; LINK_SIZE];
        region.copy_view(&mut image);
        Ok(image)
    }

    /// The mapped region
    pub fn region(&self) -> Result<&SharedMemoryRegion> {
        self.region.as_ref().ok_or(LinkError::Disposed)
    }

    /// Release the mapping. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(region) = self.region.take() {
            debug!("closing reader for '{}'", region.name());
        }
    }

    pub fn is_closed(&self) -> bool {
        self.region.is_none()
    }
}
