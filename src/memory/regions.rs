//! Shared memory region implementation

use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
};

use log::debug;
use memmap2::{Mmap, MmapOptions};

use crate::{
    error::{LinkError, Result},
    layout::LINK_SIZE,
};

use super::config::{BackingType, RegionConfig};

/// The OS mapping backing a region
#[derive(Debug)]
enum Mapping {
    /// POSIX shm object or regular file mapped with memmap2
    Mmap {
        mmap: Mmap,
        _file: File,
    },
    #[cfg(windows)]
    Named(super::windows::NamedMapping),
}

impl Mapping {
    fn as_slice(&self) -> &[u8] {
        match self {
            Mapping::Mmap { mmap, .. } => &mmap[..],
            #[cfg(windows)]
            Mapping::Named(named) => named.as_slice(),
        }
    }
}

/// A read-only view of the positional link region.
///
/// Always exactly [`LINK_SIZE`] bytes. The mapping is released when the
/// region is dropped. Nothing is ever written through it.
#[derive(Debug)]
pub struct SharedMemoryRegion {
    name: String,
    backing_type: BackingType,
    mapping: Mapping,
}

impl SharedMemoryRegion {
    /// Attach to the region, creating it if the config allows.
    ///
    /// An existing region is opened read-only. It is only reopened for
    /// writing when it is missing or smaller than [`LINK_SIZE`] and `create`
    /// is set; a short region is rejected otherwise.
    pub fn open_or_create(config: &RegionConfig) -> Result<Self> {
        config.validate()?;

        let mapping = match config.backing_type {
            BackingType::FileBacked => {
                let path = config.file_path.as_deref().ok_or_else(|| {
                    LinkError::invalid_parameter("file_path", "Missing file path")
                })?;
                let file = Self::open_file(path, config)?;
                Self::map_file(file, config)?
            }
            #[cfg(unix)]
            BackingType::SharedMemory => {
                let file = Self::open_shm(config)?;
                Self::map_file(file, config)?
            }
            #[cfg(windows)]
            BackingType::SharedMemory => Mapping::Named(super::windows::NamedMapping::open_or_create(
                &config.name,
                LINK_SIZE,
                config.create,
            )?),
            #[cfg(not(any(unix, windows)))]
            BackingType::SharedMemory => {
                return Err(LinkError::platform(
                    "Named shared memory is not supported on this platform",
                ))
            }
        };

        debug!(
            "mapped {} region '{}' ({} bytes)",
            config.backing_type.name(),
            config.name,
            LINK_SIZE
        );

        Ok(Self {
            name: config.name.clone(),
            backing_type: config.backing_type,
            mapping,
        })
    }

    /// Open the POSIX shared memory object
    #[cfg(unix)]
    fn open_shm(config: &RegionConfig) -> Result<File> {
        use nix::{
            fcntl::OFlag,
            sys::{mman::shm_open, stat::Mode},
        };

        let name = config.shm_name();
        let mode = Mode::from_bits_truncate(config.permissions as nix::sys::stat::mode_t);

        Self::attach_or_create(
            &name,
            config,
            || {
                shm_open(name.as_str(), OFlag::O_RDONLY, Mode::empty())
                    .map(File::from)
                    .map_err(io::Error::from)
            },
            || {
                shm_open(name.as_str(), OFlag::O_RDWR | OFlag::O_CREAT, mode)
                    .map(File::from)
                    .map_err(io::Error::from)
            },
        )
    }

    /// Open the backing file
    fn open_file(path: &Path, config: &RegionConfig) -> Result<File> {
        let name = path.display().to_string();

        Self::attach_or_create(
            &name,
            config,
            || File::open(path),
            || {
                let mut options = OpenOptions::new();
                options.read(true).write(true).create(true).truncate(false);
                #[cfg(unix)]
                {
                    use std::os::unix::fs::OpenOptionsExt;
                    options.mode(config.permissions);
                }
                options.open(path)
            },
        )
    }

    /// Attach read-only, falling back to `create` when the backing is
    /// missing or too short and the config allows creating it
    fn attach_or_create(
        name: &str,
        config: &RegionConfig,
        attach: impl FnOnce() -> io::Result<File>,
        create: impl FnOnce() -> io::Result<File>,
    ) -> Result<File> {
        match attach() {
            Ok(file) => {
                if !config.create || Self::backing_len(&file)? >= LINK_SIZE {
                    return Ok(file);
                }
                debug!("region '{}' is smaller than {} bytes, growing it", name, LINK_SIZE);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && config.create => {
                debug!("region '{}' does not exist, creating it", name);
            }
            Err(e) => return Err(LinkError::from_region_io(name, e, "Failed to open region")),
        }

        let file = create().map_err(|e| LinkError::from_region_io(name, e, "Failed to create region"))?;
        if Self::backing_len(&file)? < LINK_SIZE {
            file.set_len(LINK_SIZE as u64)
                .map_err(|e| LinkError::from_region_io(name, e, "Failed to size region"))?;
        }
        Ok(file)
    }

    fn backing_len(file: &File) -> Result<usize> {
        let metadata = file
            .metadata()
            .map_err(|e| LinkError::from_io(e, "Failed to stat region"))?;
        Ok(metadata.len() as usize)
    }

    /// Map the backing object read-only
    fn map_file(file: File, config: &RegionConfig) -> Result<Mapping> {
        let len = Self::backing_len(&file)?;
        if len < LINK_SIZE {
            return Err(LinkError::insufficient_space(LINK_SIZE, len));
        }

        // SAFETY: the mapping is read-only and never outlives `_file`. The
        // producer may write concurrently; readers copy the bytes out and
        // treat them as untrusted.
        let mmap = unsafe { MmapOptions::new().len(LINK_SIZE).map(&file) }
            .map_err(|e| LinkError::from_region_io(&config.name, e, "Failed to create memory mapping"))?;

        Ok(Mapping::Mmap { mmap, _file: file })
    }

    /// Copy the whole region into a new buffer
    pub fn create_view(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Copy the whole region into `out` without allocating.
    ///
    /// The copy is not synchronised with the producer and may be torn.
    pub fn copy_view(&self, out: &mut [u8; LINK_SIZE]) {
        let src = self.as_slice();
        let len = src.len().min(LINK_SIZE);
        out[..len].copy_from_slice(&src[..len]);
    }

    /// Get the raw memory slice (read-only)
    pub fn as_slice(&self) -> &[u8] {
        self.mapping.as_slice()
    }

    /// Get the size of the region
    pub fn size(&self) -> usize {
        self.as_slice().len()
    }

    /// Get the name of the region
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backing_type(&self) -> BackingType {
        self.backing_type
    }

    /// Check if the region is file-backed
    pub fn is_file_backed(&self) -> bool {
        matches!(self.backing_type, BackingType::FileBacked)
    }
}

impl Drop for SharedMemoryRegion {
    fn drop(&mut self) {
        debug!("unmapping region '{}'", self.name);
    }
}
