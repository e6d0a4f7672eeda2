//! Configuration types for the positional link region

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::layout::LINK_NAME;

/// Types of region backing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackingType {
    /// OS named shared memory (POSIX shm object or Windows file mapping)
    SharedMemory,
    /// Regular file, e.g. a bridge that mirrors the region to disk
    FileBacked,
}

impl Default for BackingType {
    fn default() -> Self {
        Self::SharedMemory
    }
}

impl BackingType {
    /// Get a human-readable name for the backing type
    pub fn name(&self) -> &'static str {
        match self {
            BackingType::SharedMemory => "shared-memory",
            BackingType::FileBacked => "file-backed",
        }
    }
}

/// Configuration for opening the region.
///
/// The size is not configurable: it is always [`crate::layout::LINK_SIZE`].
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// Name of the shared memory object
    pub name: String,
    /// Backing type for the region
    pub backing_type: BackingType,
    /// File path for file-backed regions
    pub file_path: Option<PathBuf>,
    /// Whether to create the region if it doesn't exist
    pub create: bool,
    /// Permissions for a created region (Unix permissions)
    pub permissions: u32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            backing_type: BackingType::default(),
            file_path: None,
            create: true,
            permissions: 0o600,
        }
    }
}

impl RegionConfig {
    /// Create a new region configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// File-backed configuration for `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            backing_type: BackingType::FileBacked,
            file_path: Some(path),
            ..Default::default()
        }
    }

    /// Set the backing type
    pub fn with_backing_type(mut self, backing_type: BackingType) -> Self {
        self.backing_type = backing_type;
        self
    }

    /// Set the file path for file-backed regions
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Set whether to create the region if it doesn't exist
    pub fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Set the permissions for the region
    pub fn with_permissions(mut self, permissions: u32) -> Self {
        self.permissions = permissions;
        self
    }

    /// Name the producer uses on this platform.
    ///
    /// Windows uses a session-wide file mapping; on Unix the Mumble
    /// convention suffixes the POSIX object with the user id.
    #[cfg(unix)]
    pub fn default_name() -> String {
        format!("/{}.{}", LINK_NAME, nix::unistd::getuid())
    }

    #[cfg(not(unix))]
    pub fn default_name() -> String {
        LINK_NAME.to_string()
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        use crate::error::LinkError;

        if self.name.is_empty() {
            return Err(LinkError::invalid_parameter(
                "name",
                "Region name cannot be empty",
            ));
        }

        if self.name.contains('\0') {
            return Err(LinkError::invalid_parameter(
                "name",
                "Region name contains null bytes",
            ));
        }

        let nested_slash = self.name.chars().skip(1).any(|c| c == '/');
        if cfg!(unix) && self.backing_type == BackingType::SharedMemory && nested_slash {
            return Err(LinkError::invalid_parameter(
                "name",
                "POSIX shared memory names cannot contain '/' after the first character",
            ));
        }

        if self.backing_type == BackingType::FileBacked && self.file_path.is_none() {
            return Err(LinkError::invalid_parameter(
                "file_path",
                "File path must be specified for file-backed regions",
            ));
        }

        Ok(())
    }

    /// Name with the leading '/' POSIX shm_open expects
    pub fn shm_name(&self) -> String {
        if self.name.starts_with('/') {
            self.name.clone()
        } else {
            format!("/{}", self.name)
        }
    }
}
