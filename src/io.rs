//! Raw volume files.
//!
//! A raw file is a headerless byte stream of exactly `depth * height * width`
//! bytes in z, y, x order (z slowest). 0 is background, anything else is
//! foreground; values are stored as-is.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{voxel_count, ThinningError, ThinningResult};
use crate::volume::Volume;

/// Read a raw volume. Fails with `MalformedFile` unless the file holds exactly
/// `depth * height * width` bytes.
pub fn read_raw(
    path: impl AsRef<Path>,
    depth: usize,
    height: usize,
    width: usize,
) -> ThinningResult<Volume> {
    let path = path.as_ref();
    let expected = voxel_count(depth, height, width)?;
    let bytes = fs::read(path)?;
    if bytes.len() != expected {
        return Err(ThinningError::MalformedFile {
            path: path.to_path_buf(),
            expected,
            actual: bytes.len(),
        });
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Read raw volume");
    Volume::from_vec(depth, height, width, bytes)
}

/// Write a volume as a raw byte stream.
pub fn write_raw(path: impl AsRef<Path>, volume: &Volume) -> ThinningResult<()> {
    let path = path.as_ref();
    let expected = voxel_count(volume.depth, volume.height, volume.width)?;
    if volume.cells.len() != expected {
        return Err(ThinningError::size_mismatch(expected, volume.cells.len()));
    }

    fs::write(path, &volume.cells)?;
    debug!(path = %path.display(), bytes = expected, "Wrote raw volume");
    Ok(())
}
