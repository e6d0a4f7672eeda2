//! Error types and handling for gw2link

/// Result type alias for gw2link operations
pub type Result<T> = std::result::Result<T, LinkError>;

/// Every failure the snapshot reader can surface.
///
/// A region whose producer marker is absent is not an error; readers report
/// it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// I/O related errors (shm_open, file open, mmap, etc.)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The OS refused to open or map the region
    #[error("Access denied to shared memory region: {name}")]
    AccessDenied { name: String },

    /// The reader was used after its mapping was released
    #[error("Reader has been disposed")]
    Disposed,

    /// An embedded sub-payload does not have the expected shape
    #[error("Malformed {payload} payload: {message}")]
    MalformedPayload {
        payload: &'static str,
        message: String,
    },

    /// A write-once value was written twice
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    /// Invalid parameters or configuration
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// An existing region is smaller than the protocol size
    #[error("Insufficient space: requested {requested}, available {available}")]
    InsufficientSpace { requested: usize, available: usize },

    /// Platform-specific errors
    #[error("Platform error: {message}")]
    Platform { message: String },
}

impl LinkError {
    /// Create an I/O error from a standard I/O error
    pub fn from_io(source: std::io::Error, context: &str) -> Self {
        Self::Io {
            message: format!("{}: {}", context, source),
            source: Some(source),
        }
    }

    /// Create an error for a failed open/map of the named region.
    ///
    /// Permission failures become [`LinkError::AccessDenied`] so callers can
    /// tell them apart without inspecting the OS error.
    pub fn from_region_io(name: &str, source: std::io::Error, context: &str) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::access_denied(name)
        } else {
            Self::from_io(source, context)
        }
    }

    /// Create an access denied error
    pub fn access_denied(name: impl Into<String>) -> Self {
        Self::AccessDenied { name: name.into() }
    }

    /// Create a malformed payload error
    pub fn malformed(payload: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            payload,
            message: message.into(),
        }
    }

    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an insufficient space error
    pub fn insufficient_space(requested: usize, available: usize) -> Self {
        Self::InsufficientSpace {
            requested,
            available,
        }
    }

    /// Create a platform error
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform {
            message: message.into(),
        }
    }

    /// True for errors caused by a malformed embedded payload
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }
}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        Self::from_io(err, "I/O operation failed")
    }
}
