//! C FFI layer.
//!
//! Exports C ABI functions so the engine can be driven from C, LuaJIT FFI or
//! any other host that can load a shared library. All functions are marked
//! with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic lives in `thinning` and `volume`. These functions are thin
//! wrappers that handle null checks, pointer safety and error-to-status
//! conversion.

pub mod lifecycle;
pub mod thin;
pub mod volume;

pub use lifecycle::{vt_create_volume, vt_destroy_volume, vt_volume_len};
pub use thin::{vt_thin_buffer, vt_thin_volume};
pub use volume::{vt_count_foreground, vt_get_voxel, vt_set_voxel};

use crate::error::ThinningError;

/// Call succeeded.
pub const VT_OK: i32 = 0;
/// A required pointer was null.
pub const VT_ERR_NULL: i32 = 1;
/// Buffer length did not match the dimensions, or the dimensions overflow.
pub const VT_ERR_SIZE_MISMATCH: i32 = 2;
/// Coordinates were out of range.
pub const VT_ERR_INVALID_COORDINATE: i32 = 3;
/// Worker pool could not be built.
pub const VT_ERR_THREAD_POOL: i32 = 4;
/// Any other failure.
pub const VT_ERR_OTHER: i32 = 5;

pub(crate) fn status_of(err: &ThinningError) -> i32 {
    match err {
        ThinningError::SizeMismatch { .. } | ThinningError::InvalidDimensions { .. } => {
            VT_ERR_SIZE_MISMATCH
        }
        ThinningError::InvalidCoordinate { .. } => VT_ERR_INVALID_COORDINATE,
        ThinningError::ThreadPool(_) => VT_ERR_THREAD_POOL,
        ThinningError::MalformedFile { .. } | ThinningError::Io(_) => VT_ERR_OTHER,
    }
}
