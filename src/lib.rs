//! # gw2link - Positional Link Snapshot Reader
//!
//! gw2link reads the avatar and camera telemetry Guild Wars 2 publishes
//! through the `MumbleLink` shared memory region, and decodes it into
//! immutable snapshots.
//!
//! ## Features
//!
//! - **Named region access**: POSIX shm on Unix, file mapping on Windows,
//!   or a plain file for bridges and tests
//! - **Field-by-field decoding**: fixed offsets, bounds-checked reads, no
//!   struct overlays
//! - **Context decoding**: map server `sockaddr`, map/shard/build ids and
//!   the extended UI/compass fields
//! - **Identity decoding**: the embedded JSON character payload
//! - **One error type**: every failure is a [`LinkError`]
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │  memory          │──▶│  layout          │──▶│  context         │
//! │  (mapping, view) │   │  (RawFields)     │   │  identity        │
//! └──────────────────┘   └──────────────────┘   └────────┬─────────┘
//!           ▲                                            ▼
//! ┌──────────────────┐                          ┌──────────────────┐
//! │  reader          │◀─────────────────────────│  snapshot        │
//! │  (lifecycle)     │                          │  (Avatar)        │
//! └──────────────────┘                          └──────────────────┘
//! ```
//!
//! ```no_run
//! use gw2link::LinkReader;
//!
//! let reader = LinkReader::open_default()?;
//! if let Some(avatar) = reader.read()? {
//!     println!("{} at {:?}", avatar.identity().name(), avatar.avatar_position());
//! }
//! # Ok::<(), gw2link::LinkError>(())
//! ```

pub mod context;
pub mod error;
pub mod identity;
pub mod layout;
pub mod memory;
pub mod reader;
pub mod snapshot;

pub use context::{Context, ContextBuilder, ContextExtension, MapType, Mount, ServerAddress, UiState};
pub use error::{LinkError, Result};
pub use identity::{Identity, Profession, Race, UiSize};
pub use layout::{RawFields, Utf16Field, Vector3, LINK_NAME, LINK_SIZE, PRODUCER_MARKER};
pub use memory::{BackingType, RegionConfig, SharedMemoryRegion};
pub use reader::LinkReader;
pub use snapshot::{assemble, Avatar};

/// Crate version, as published
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration constants
pub mod config {
    /// Poll interval matching the producer's frame cadence at 50 fps
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 20;

    /// Protocol version written by current producers
    pub const EXPECTED_UI_VERSION: u32 = 2;
}
