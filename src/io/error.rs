//! Error types for collection operations and host I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all compositing operations
#[derive(Debug)]
pub enum CompositeError {
    /// A provider with the same name is already attached
    DuplicateName {
        /// The colliding provider name
        name: String,
    },

    /// A provider refused attachment from its `attach` hook
    AttachRejected {
        /// Name of the provider being added
        name: String,
        /// Explanation supplied by the provider
        reason: String,
    },

    /// Grid coordinate lies outside the composite grid
    OutOfBounds {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Grid slot has no provider tile to write into
    ///
    /// Occurs when the slot was never covered by an enabled provider, or when
    /// the provider that last covered it has since been removed.
    VacantSlot {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source data cannot be used as requested
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Failed to load a layer image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(
                    f,
                    "Tile provider '{name}' is already in use. Name must be unique."
                )
            }
            Self::AttachRejected { name, reason } => {
                write!(f, "Tile provider '{name}' rejected attachment: {reason}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Grid position ({x}, {y}) is out of bounds (grid size {width}x{height})"
                )
            }
            Self::VacantSlot { x, y } => {
                write!(f, "Grid position ({x}, {y}) holds no provider tile")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CompositeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for compositing results
pub type Result<T> = std::result::Result<T, CompositeError>;

impl From<image::ImageError> for CompositeError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for CompositeError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CompositeError {
    CompositeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an attach rejection error for a provider hook
pub fn attach_rejected(name: &str, reason: &impl ToString) -> CompositeError {
    CompositeError::AttachRejected {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
