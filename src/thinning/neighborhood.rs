//! 3x3x3 neighborhood extraction.
//!
//! Cell `k` of a [`Neighborhood`] holds the voxel at offset `(dz, dy, dx)` with
//! `k = (dz + 1) * 9 + (dy + 1) * 3 + (dx + 1)`; dx is fastest. Cell 13 is the
//! voxel itself. Out-of-volume cells read as background.

use crate::error::ThinningResult;
use crate::volume::Volume;

/// Number of cells in a neighborhood, center included.
pub const NEIGHBORHOOD_SIZE: usize = 27;

/// Index of the center voxel.
pub const CENTER: usize = 13;

/// Binary 3x3x3 window around a voxel, values in {0, 1}.
pub type Neighborhood = [u8; NEIGHBORHOOD_SIZE];

/// Window index of the offset `(dz, dy, dx)`, each in `-1..=1`.
#[inline]
pub(crate) const fn offset_index(dz: isize, dy: isize, dx: isize) -> usize {
    debug_assert!(dz >= -1 && dz <= 1 && dy >= -1 && dy <= 1 && dx >= -1 && dx <= 1);
    ((dz + 1) * 9 + (dy + 1) * 3 + (dx + 1)) as usize
}

/// Offset `(dz, dy, dx)` of window index `k`.
#[inline]
pub(crate) const fn index_offset(k: usize) -> (isize, isize, isize) {
    (
        (k / 9) as isize - 1,
        ((k / 3) % 3) as isize - 1,
        (k % 3) as isize - 1,
    )
}

/// Extract the neighborhood of `(z, y, x)`.
///
/// Fails with `InvalidCoordinate` when the voxel itself lies outside the volume.
pub fn neighborhood(volume: &Volume, z: isize, y: isize, x: isize) -> ThinningResult<Neighborhood> {
    volume.check_coord(z, y, x)?;
    let mut n = [0; NEIGHBORHOOD_SIZE];
    gather(volume, z as usize, y as usize, x as usize, &mut n);
    Ok(n)
}

/// Count foreground cells in the window, excluding the center.
#[inline]
pub fn foreground_neighbors(n: &Neighborhood) -> usize {
    n.iter()
        .enumerate()
        .filter(|&(k, &c)| k != CENTER && c != 0)
        .count()
}

/// Fill `out` with the neighborhood of an in-range voxel.
///
/// Voxels with a full ring of neighbors take the unchecked path; both paths
/// produce identical windows.
#[inline]
pub(crate) fn gather(volume: &Volume, z: usize, y: usize, x: usize, out: &mut Neighborhood) {
    let interior = x > 0
        && x + 1 < volume.width
        && y > 0
        && y + 1 < volume.height
        && z > 0
        && z + 1 < volume.depth;
    if interior {
        gather_interior(volume, z, y, x, out);
    } else {
        gather_bounded(volume, z, y, x, out);
    }
}

/// Requires `1 <= x <= W-2`, `1 <= y <= H-2`, `1 <= z <= D-2`.
fn gather_interior(volume: &Volume, z: usize, y: usize, x: usize, out: &mut Neighborhood) {
    let w = volume.width;
    let plane = volume.height * w;
    let center = volume.index(z, y, x);
    let mut k = 0;

    for base in [center - plane, center, center + plane] {
        for row in [base - w, base, base + w] {
            for idx in row - 1..=row + 1 {
                out[k] = u8::from(volume.cells[idx] != 0);
                k += 1;
            }
        }
    }
}

fn gather_bounded(volume: &Volume, z: usize, y: usize, x: usize, out: &mut Neighborhood) {
    let (z, y, x) = (z as isize, y as isize, x as isize);
    for (k, cell) in out.iter_mut().enumerate() {
        let (dz, dy, dx) = index_offset(k);
        *cell = u8::from(volume.get(z + dz, y + dy, x + dx) != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_index() {
        assert_eq!(offset_index(0, 0, 0), CENTER);
        assert_eq!(index_offset(CENTER), (0, 0, 0));
    }

    #[test]
    fn test_dx_is_fastest() {
        let a = offset_index(-1, -1, -1);
        assert_eq!(a, 0);
        assert_eq!(offset_index(-1, -1, 0), a + 1);
        assert_eq!(offset_index(-1, -1, 1), a + 2);
        // dy steps by 3, dz by 9
        assert_eq!(offset_index(-1, 0, -1), a + 3);
        assert_eq!(offset_index(0, -1, -1), a + 9);
        assert_eq!(offset_index(1, 1, 1), 26);

        for k in 0..NEIGHBORHOOD_SIZE {
            let (dz, dy, dx) = index_offset(k);
            assert_eq!(offset_index(dz, dy, dx), k);
        }
    }

    #[test]
    fn test_single_voxel_window() {
        let mut vol = Volume::new(5, 5, 5).unwrap();
        vol.set(2, 2, 2, 1);

        let n = neighborhood(&vol, 2, 2, 2).unwrap();
        assert_eq!(n[CENTER], 1);
        assert_eq!(n.iter().map(|&c| c as usize).sum::<usize>(), 1);
        assert_eq!(foreground_neighbors(&n), 0);
    }

    #[test]
    fn test_offsets_land_in_right_cells() {
        let mut vol = Volume::new(5, 5, 5).unwrap();
        vol.set(2, 2, 3, 1); // +x
        vol.set(2, 1, 2, 1); // -y
        vol.set(3, 3, 1, 1); // +z +y -x

        let n = neighborhood(&vol, 2, 2, 2).unwrap();
        assert_eq!(n[offset_index(0, 0, 1)], 1);
        assert_eq!(n[offset_index(0, -1, 0)], 1);
        assert_eq!(n[offset_index(1, 1, -1)], 1);
        assert_eq!(n[CENTER], 0);
        assert_eq!(foreground_neighbors(&n), 3);
    }

    #[test]
    fn test_out_of_volume_reads_background() {
        let vol = Volume::from_vec(3, 3, 3, vec![1; 27]).unwrap();

        // Corner voxel only sees the 2x2x2 block inside the volume
        let n = neighborhood(&vol, 0, 0, 0).unwrap();
        assert_eq!(foreground_neighbors(&n), 7);
        assert_eq!(n[offset_index(-1, 0, 0)], 0);
        assert_eq!(n[offset_index(1, 1, 1)], 1);

        // Center voxel sees everything
        let n = neighborhood(&vol, 1, 1, 1).unwrap();
        assert_eq!(foreground_neighbors(&n), 26);
    }

    #[test]
    fn test_values_are_normalized() {
        let vol = Volume::from_vec(3, 3, 3, vec![200; 27]).unwrap();
        let n = neighborhood(&vol, 1, 1, 1).unwrap();
        assert!(n.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_interior_path_matches_bounded_path() {
        // Deterministic pseudo-random pattern
        let mut cells = vec![0u8; 6 * 7 * 8];
        let mut seed = 0x2545_f491u32;
        for c in cells.iter_mut() {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            *c = (seed % 3) as u8;
        }
        let vol = Volume::from_vec(6, 7, 8, cells).unwrap();

        for z in 1..5 {
            for y in 1..6 {
                for x in 1..7 {
                    let mut fast = [0; NEIGHBORHOOD_SIZE];
                    let mut slow = [0; NEIGHBORHOOD_SIZE];
                    gather_interior(&vol, z, y, x, &mut fast);
                    gather_bounded(&vol, z, y, x, &mut slow);
                    assert_eq!(fast, slow, "mismatch at ({z}, {y}, {x})");
                }
            }
        }
    }

    #[test]
    fn test_invalid_coordinate() {
        let vol = Volume::new(4, 4, 4).unwrap();
        assert!(neighborhood(&vol, 4, 0, 0).is_err());
        assert!(neighborhood(&vol, 0, -1, 0).is_err());
        assert!(neighborhood(&vol, 3, 3, 3).is_ok());
    }
}
