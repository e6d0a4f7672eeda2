//! Named file mapping on Windows

use std::fmt;

use windows_sys::Win32::{
    Foundation::{
        CloseHandle, GetLastError, ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, HANDLE,
        INVALID_HANDLE_VALUE,
    },
    System::Memory::{
        CreateFileMappingW, MapViewOfFile, OpenFileMappingW, UnmapViewOfFile, FILE_MAP_READ,
        MEMORY_MAPPED_VIEW_ADDRESS, PAGE_READWRITE,
    },
};

use crate::error::{LinkError, Result};

/// A view of a pagefile-backed named mapping
pub(crate) struct NamedMapping {
    handle: HANDLE,
    view: MEMORY_MAPPED_VIEW_ADDRESS,
    len: usize,
}

// SAFETY: the handle and view are process-wide and only read through `&self`.
unsafe impl Send for NamedMapping {}
unsafe impl Sync for NamedMapping {}

impl NamedMapping {
    /// Attach read-only to the producer's mapping, creating it only when it
    /// does not exist yet and `create` is set
    pub(crate) fn open_or_create(name: &str, len: usize, create: bool) -> Result<Self> {
        let wide: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();

        let mut handle = unsafe { OpenFileMappingW(FILE_MAP_READ, 0, wide.as_ptr()) };
        if handle == 0 {
            let code = unsafe { GetLastError() };
            if code != ERROR_FILE_NOT_FOUND || !create {
                return Err(error_for(code, name, "OpenFileMappingW"));
            }

            handle = unsafe {
                CreateFileMappingW(
                    INVALID_HANDLE_VALUE,
                    std::ptr::null(),
                    PAGE_READWRITE,
                    0,
                    len as u32,
                    wide.as_ptr(),
                )
            };
            if handle == 0 {
                return Err(last_error(name, "CreateFileMappingW"));
            }
        }

        let view = unsafe { MapViewOfFile(handle, FILE_MAP_READ, 0, 0, len) };
        if view.Value.is_null() {
            let err = last_error(name, "MapViewOfFile");
            unsafe {
                CloseHandle(handle);
            }
            return Err(err);
        }

        Ok(Self { handle, view, len })
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: the view is `len` bytes and stays mapped until drop.
        unsafe { std::slice::from_raw_parts(self.view.Value as *const u8, self.len) }
    }
}

impl Drop for NamedMapping {
    fn drop(&mut self) {
        unsafe {
            UnmapViewOfFile(self.view);
            CloseHandle(self.handle);
        }
    }
}

impl fmt::Debug for NamedMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedMapping")
            .field("handle", &self.handle)
            .field("len", &self.len)
            .finish()
    }
}

fn last_error(name: &str, call: &str) -> LinkError {
    error_for(unsafe { GetLastError() }, name, call)
}

fn error_for(code: u32, name: &str, call: &str) -> LinkError {
    if code == ERROR_ACCESS_DENIED {
        LinkError::access_denied(name)
    } else {
        LinkError::platform(format!("{} failed for '{}': error {}", call, name, code))
    }
}
