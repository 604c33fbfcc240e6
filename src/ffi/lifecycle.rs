//! Volume handle creation and destruction.

use crate::volume::Volume;

/// Creates an all-background volume and returns an opaque pointer.
///
/// # Returns
/// A pointer to a new Volume, or null if the dimensions are too large.
///
/// # Safety
/// The returned pointer must eventually be freed with `vt_destroy_volume()`.
#[no_mangle]
pub extern "C" fn vt_create_volume(depth: u32, height: u32, width: u32) -> *mut Volume {
    match Volume::new(depth as usize, height as usize, width as usize) {
        Ok(volume) => Box::into_raw(Box::new(volume)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Destroys a volume and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vt_create_volume()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn vt_destroy_volume(ptr: *mut Volume) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Number of voxels in the volume.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Volume, or null
///
/// # Returns
/// `depth * height * width`, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn vt_volume_len(ptr: *const Volume) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        unsafe {
            let vol = vt_create_volume(4, 5, 6);
            assert!(!vol.is_null());
            assert_eq!(vt_volume_len(vol), 120);

            // Should not crash
            vt_destroy_volume(vol);
        }
    }

    #[test]
    fn test_null_handling() {
        unsafe {
            assert_eq!(vt_volume_len(ptr::null()), 0);
            vt_destroy_volume(ptr::null_mut());
        }
    }
}
