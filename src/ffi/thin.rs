//! Thinning entry points.

use std::{ptr, slice};

use super::{status_of, VT_ERR_NULL, VT_OK};
use crate::thinning::{thin, Thinner, ThinningConfig};
use crate::volume::Volume;

/// Thins a volume handle in place.
///
/// `num_threads` sizes the collect-phase pool: 1 runs on the calling thread,
/// 0 lets rayon choose.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Volume, or null
///
/// # Returns
/// `VT_OK`, or an error status with the volume left unchanged.
#[no_mangle]
pub unsafe extern "C" fn vt_thin_volume(ptr: *mut Volume, num_threads: u32) -> i32 {
    if ptr.is_null() {
        return VT_ERR_NULL;
    }

    let volume = &mut *ptr;
    let result = Thinner::new(ThinningConfig::with_threads(num_threads as usize))
        .and_then(|thinner| thinner.thin_volume(volume));

    match result {
        Ok(thinned) => {
            *volume = thinned;
            VT_OK
        }
        Err(err) => status_of(&err),
    }
}

/// Thins a caller-owned z-major buffer into `output`.
///
/// # Safety
/// - `input` must point to `len` readable bytes
/// - `output` must point to `len` writable bytes that do not overlap `input`
///
/// # Returns
/// `VT_OK`, `VT_ERR_NULL`, or `VT_ERR_SIZE_MISMATCH` when
/// `len != depth * height * width`. `output` is only written on success.
#[no_mangle]
pub unsafe extern "C" fn vt_thin_buffer(
    input: *const u8,
    len: usize,
    depth: u32,
    height: u32,
    width: u32,
    output: *mut u8,
) -> i32 {
    if input.is_null() || output.is_null() {
        return VT_ERR_NULL;
    }

    let input = slice::from_raw_parts(input, len);
    match thin(input, depth as usize, height as usize, width as usize) {
        Ok(cells) => {
            ptr::copy_nonoverlapping(cells.as_ptr(), output, cells.len());
            VT_OK
        }
        Err(err) => status_of(&err),
    }
}
