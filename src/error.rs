//! Error types for volume handling and thinning.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for thinning operations.
pub type ThinningResult<T> = Result<T, ThinningError>;

/// Errors that can occur while building, reading or thinning a volume.
#[derive(Debug, Error)]
pub enum ThinningError {
    /// Buffer length does not match `depth * height * width`.
    #[error("size mismatch: expected {expected} voxels, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Raw volume file has the wrong length.
    #[error("malformed volume file {}: expected {expected} bytes, got {actual}", path.display())]
    MalformedFile {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// Coordinate lies outside the volume.
    #[error("coordinate (z={z}, y={y}, x={x}) outside volume {depth}x{height}x{width}")]
    InvalidCoordinate {
        z: isize,
        y: isize,
        x: isize,
        depth: usize,
        height: usize,
        width: usize,
    },

    /// Dimensions whose product does not fit in memory.
    #[error("invalid dimensions {depth}x{height}x{width}")]
    InvalidDimensions {
        depth: usize,
        height: usize,
        width: usize,
    },

    /// Filesystem failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker pool could not be built.
    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ThinningError {
    /// Create a size mismatch error.
    #[must_use]
    pub const fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }
}

/// Number of voxels in a `depth x height x width` volume, or an error on overflow.
pub fn voxel_count(depth: usize, height: usize, width: usize) -> ThinningResult<usize> {
    depth
        .checked_mul(height)
        .and_then(|n| n.checked_mul(width))
        .ok_or(ThinningError::InvalidDimensions {
            depth,
            height,
            width,
        })
}
