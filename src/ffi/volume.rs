//! Voxel access on a volume handle.

use crate::volume::Volume;

/// Sets a voxel to foreground (non-zero) or background (0).
///
/// # Safety
/// - `ptr` must be a valid pointer to a Volume, or null
///
/// Out-of-bounds coordinates are silently ignored.
#[no_mangle]
pub unsafe extern "C" fn vt_set_voxel(ptr: *mut Volume, z: i32, y: i32, x: i32, value: u8) {
    if ptr.is_null() {
        return;
    }

    let volume = &mut *ptr;
    volume.set(z as isize, y as isize, x as isize, value);
}

/// Gets the raw value of a voxel.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Volume, or null
///
/// # Returns
/// 0 if out of bounds, null pointer, or background.
#[no_mangle]
pub unsafe extern "C" fn vt_get_voxel(ptr: *const Volume, z: i32, y: i32, x: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }

    (*ptr).get(z as isize, y as isize, x as isize)
}

/// Counts foreground voxels.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Volume, or null
#[no_mangle]
pub unsafe extern "C" fn vt_count_foreground(ptr: *const Volume) -> u64 {
    if ptr.is_null() {
        return 0;
    }

    (*ptr).count_foreground() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle;
    use std::ptr;

    #[test]
    fn test_set_and_get_voxel() {
        unsafe {
            let vol = lifecycle::vt_create_volume(8, 8, 8);

            vt_set_voxel(vol, 0, 0, 0, 1);
            vt_set_voxel(vol, 7, 7, 7, 1);
            vt_set_voxel(vol, 3, 4, 5, 9);

            assert_eq!(vt_get_voxel(vol, 0, 0, 0), 1);
            assert_eq!(vt_get_voxel(vol, 7, 7, 7), 1);
            assert_eq!(vt_get_voxel(vol, 3, 4, 5), 9);
            assert_eq!(vt_get_voxel(vol, 4, 4, 4), 0);
            assert_eq!(vt_count_foreground(vol), 3);

            vt_set_voxel(vol, 0, 0, 0, 0);
            assert_eq!(vt_get_voxel(vol, 0, 0, 0), 0);
            assert_eq!(vt_count_foreground(vol), 2);

            lifecycle::vt_destroy_volume(vol);
        }
    }

    #[test]
    fn test_out_of_bounds_access() {
        unsafe {
            let vol = lifecycle::vt_create_volume(4, 4, 4);

            assert_eq!(vt_get_voxel(vol, -1, 0, 0), 0);
            assert_eq!(vt_get_voxel(vol, 4, 0, 0), 0);

            // Should not crash
            vt_set_voxel(vol, -1, 0, 0, 1);
            vt_set_voxel(vol, 0, 0, 4, 1);
            assert_eq!(vt_count_foreground(vol), 0);

            lifecycle::vt_destroy_volume(vol);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            vt_set_voxel(ptr::null_mut(), 0, 0, 0, 1); // Should not crash
            assert_eq!(vt_get_voxel(ptr::null(), 0, 0, 0), 0);
            assert_eq!(vt_count_foreground(ptr::null()), 0);
        }
    }
}
