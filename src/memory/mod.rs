//! Shared memory region access

pub mod config;
pub mod regions;
#[cfg(windows)]
mod windows;

pub use config::{BackingType, RegionConfig};
pub use regions::SharedMemoryRegion;
