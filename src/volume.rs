//! Dense binary volume and voxel access helpers.

use crate::error::{voxel_count, ThinningError, ThinningResult};

/// A dense 3D voxel volume in z, y, x order (z changes slowest, x fastest).
///
/// Cells hold raw bytes: 0 = background, anything else = foreground.
/// The thinning engine normalizes to {0, 1} on its own copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Volume {
    pub depth: usize,
    pub height: usize,
    pub width: usize,
    pub cells: Vec<u8>,
}

impl Volume {
    /// Create an all-background volume with the given dimensions.
    pub fn new(depth: usize, height: usize, width: usize) -> ThinningResult<Self> {
        let size = voxel_count(depth, height, width)?;
        Ok(Volume {
            depth,
            height,
            width,
            cells: vec![0; size],
        })
    }

    /// Wrap an existing buffer. Fails if `cells.len() != depth * height * width`.
    pub fn from_vec(
        depth: usize,
        height: usize,
        width: usize,
        cells: Vec<u8>,
    ) -> ThinningResult<Self> {
        let expected = voxel_count(depth, height, width)?;
        if cells.len() != expected {
            return Err(ThinningError::size_mismatch(expected, cells.len()));
        }
        Ok(Volume {
            depth,
            height,
            width,
            cells,
        })
    }

    /// Dimensions as `(depth, height, width)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.depth, self.height, self.width)
    }

    /// Total number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index for an in-range coordinate: `(z * H + y) * W + x`.
    #[inline]
    pub fn index(&self, z: usize, y: usize, x: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    /// Inverse of [`Volume::index`].
    #[inline]
    pub fn coords_of(&self, idx: usize) -> (usize, usize, usize) {
        let plane = self.height * self.width;
        let z = idx / plane;
        let rem = idx - z * plane;
        let y = rem / self.width;
        (z, y, rem - y * self.width)
    }

    /// Check if signed coordinates are within volume bounds.
    #[inline]
    pub fn in_bounds(&self, z: isize, y: isize, x: isize) -> bool {
        z >= 0
            && y >= 0
            && x >= 0
            && (z as usize) < self.depth
            && (y as usize) < self.height
            && (x as usize) < self.width
    }

    /// Get a cell value. Out-of-range coordinates read as background.
    pub fn get(&self, z: isize, y: isize, x: isize) -> u8 {
        if self.in_bounds(z, y, x) {
            self.cells[self.index(z as usize, y as usize, x as usize)]
        } else {
            0
        }
    }

    /// Set a cell value. Out-of-range coordinates are silently ignored.
    pub fn set(&mut self, z: isize, y: isize, x: isize, value: u8) {
        if self.in_bounds(z, y, x) {
            let idx = self.index(z as usize, y as usize, x as usize);
            self.cells[idx] = value;
        }
    }

    /// Number of foreground (non-zero) voxels.
    pub fn count_foreground(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Number of voxels whose raw values differ between two equal-sized volumes.
    pub fn diff_count(&self, other: &Volume) -> ThinningResult<usize> {
        if self.cells.len() != other.cells.len() {
            return Err(ThinningError::size_mismatch(
                self.cells.len(),
                other.cells.len(),
            ));
        }
        Ok(self
            .cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a != b)
            .count())
    }

    /// Copy with every non-zero cell normalized to 1.
    pub fn binarized(&self) -> Volume {
        Volume {
            depth: self.depth,
            height: self.height,
            width: self.width,
            cells: self.cells.iter().map(|&c| u8::from(c != 0)).collect(),
        }
    }

    /// Fail with `InvalidCoordinate` unless `(z, y, x)` is inside the volume.
    pub(crate) fn check_coord(&self, z: isize, y: isize, x: isize) -> ThinningResult<()> {
        if self.in_bounds(z, y, x) {
            Ok(())
        } else {
            Err(ThinningError::InvalidCoordinate {
                z,
                y,
                x,
                depth: self.depth,
                height: self.height,
                width: self.width,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_volume() {
        let vol = Volume::new(8, 8, 8).unwrap();
        assert_eq!(vol.dims(), (8, 8, 8));
        assert_eq!(vol.len(), 512);
        assert!(vol.cells.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        let err = Volume::from_vec(4, 4, 4, vec![0; 63]).unwrap_err();
        assert!(matches!(
            err,
            ThinningError::SizeMismatch {
                expected: 64,
                actual: 63
            }
        ));
        assert!(Volume::from_vec(4, 4, 4, vec![0; 64]).is_ok());
    }

    #[test]
    fn test_index_of() {
        let vol = Volume::new(4, 4, 4).unwrap();

        // First cell
        assert_eq!(vol.index(0, 0, 0), 0);
        // Last cell
        assert_eq!(vol.index(3, 3, 3), 63);
        // x fastest, then y, then z
        assert_eq!(vol.index(0, 0, 1), 1);
        assert_eq!(vol.index(0, 1, 0), 4);
        assert_eq!(vol.index(1, 0, 0), 16);
    }

    #[test]
    fn test_coords_of_inverts_index() {
        let vol = Volume::new(3, 5, 7).unwrap();
        for idx in 0..vol.len() {
            let (z, y, x) = vol.coords_of(idx);
            assert_eq!(vol.index(z, y, x), idx);
        }
    }

    #[test]
    fn test_in_bounds() {
        let vol = Volume::new(4, 4, 4).unwrap();

        assert!(vol.in_bounds(0, 0, 0));
        assert!(vol.in_bounds(3, 3, 3));
        assert!(vol.in_bounds(2, 2, 2));

        assert!(!vol.in_bounds(-1, 0, 0));
        assert!(!vol.in_bounds(4, 0, 0));
        assert!(!vol.in_bounds(0, -1, 0));
        assert!(!vol.in_bounds(0, 4, 0));
        assert!(!vol.in_bounds(0, 0, -1));
        assert!(!vol.in_bounds(0, 0, 4));
    }

    #[test]
    fn test_set_get() {
        let mut vol = Volume::new(8, 8, 8).unwrap();

        vol.set(4, 4, 4, 1);
        assert_eq!(vol.get(4, 4, 4), 1);
        assert_eq!(vol.get(0, 0, 0), 0);

        // Out of bounds reads are background, writes are ignored
        assert_eq!(vol.get(-1, 0, 0), 0);
        assert_eq!(vol.get(8, 0, 0), 0);
        vol.set(8, 0, 0, 1);
        assert_eq!(vol.count_foreground(), 1);
    }

    #[test]
    fn test_diff_and_binarize() {
        let a = Volume::from_vec(1, 1, 4, vec![0, 7, 1, 0]).unwrap();
        let b = a.binarized();
        assert_eq!(b.cells, vec![0, 1, 1, 0]);
        assert_eq!(a.diff_count(&b).unwrap(), 1);
        assert_eq!(a.count_foreground(), 2);

        let c = Volume::new(1, 1, 5).unwrap();
        assert!(a.diff_count(&c).is_err());
    }
}
