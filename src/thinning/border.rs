//! Face directions and border-point classification.

use std::fmt;

use crate::error::ThinningResult;
use crate::volume::Volume;

/// One of the six face directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

/// Order in which one thinning cycle visits the directions.
///
/// Deletions are order dependent, so this order fixes the exact skeleton.
pub const CANONICAL_ORDER: [Direction; 6] = [
    Direction::NegY,
    Direction::PosY,
    Direction::PosX,
    Direction::NegX,
    Direction::PosZ,
    Direction::NegZ,
];

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NegX,
        Direction::PosX,
        Direction::NegY,
        Direction::PosY,
        Direction::NegZ,
        Direction::PosZ,
    ];

    /// Unit step `(dz, dy, dx)` toward this face.
    #[inline]
    pub const fn offset(self) -> (isize, isize, isize) {
        match self {
            Direction::NegX => (0, 0, -1),
            Direction::PosX => (0, 0, 1),
            Direction::NegY => (0, -1, 0),
            Direction::PosY => (0, 1, 0),
            Direction::NegZ => (-1, 0, 0),
            Direction::PosZ => (1, 0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::NegX => "-X",
            Direction::PosX => "+X",
            Direction::NegY => "-Y",
            Direction::PosY => "+Y",
            Direction::NegZ => "-Z",
            Direction::PosZ => "+Z",
        };
        f.write_str(s)
    }
}

/// Whether the voxel at `(z, y, x)` is a border point toward `dir`.
///
/// Background voxels are never border points. A foreground voxel is one when
/// its neighbor along `dir` is background or outside the volume.
pub fn is_border(volume: &Volume, z: isize, y: isize, x: isize, dir: Direction) -> ThinningResult<bool> {
    volume.check_coord(z, y, x)?;
    let (z, y, x) = (z as usize, y as usize, x as usize);
    let idx = volume.index(z, y, x);
    Ok(is_border_at(volume, idx, z, y, x, dir))
}

/// Unchecked variant for in-range voxels whose linear index is already known.
#[inline]
pub(crate) fn is_border_at(
    volume: &Volume,
    idx: usize,
    z: usize,
    y: usize,
    x: usize,
    dir: Direction,
) -> bool {
    let cells = &volume.cells;
    if cells[idx] == 0 {
        return false;
    }

    let w = volume.width;
    let plane = volume.height * w;
    match dir {
        Direction::NegX => x == 0 || cells[idx - 1] == 0,
        Direction::PosX => x + 1 == volume.width || cells[idx + 1] == 0,
        Direction::NegY => y == 0 || cells[idx - w] == 0,
        Direction::PosY => y + 1 == volume.height || cells[idx + w] == 0,
        Direction::NegZ => z == 0 || cells[idx - plane] == 0,
        Direction::PosZ => z + 1 == volume.depth || cells[idx + plane] == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_voxel_is_border_everywhere() {
        let mut vol = Volume::new(5, 5, 5).unwrap();
        vol.set(2, 2, 2, 1);

        for dir in Direction::ALL {
            assert!(is_border(&vol, 2, 2, 2, dir).unwrap(), "dir={dir}");
        }
    }

    #[test]
    fn test_background_is_never_border() {
        let vol = Volume::new(3, 3, 3).unwrap();
        for dir in Direction::ALL {
            assert!(!is_border(&vol, 1, 1, 1, dir).unwrap());
            assert!(!is_border(&vol, 0, 0, 0, dir).unwrap());
        }
    }

    #[test]
    fn test_shared_face_is_not_border() {
        let mut vol = Volume::new(5, 5, 5).unwrap();
        vol.set(2, 2, 2, 1); // left
        vol.set(2, 2, 3, 1); // right

        assert!(!is_border(&vol, 2, 2, 2, Direction::PosX).unwrap());
        assert!(!is_border(&vol, 2, 2, 3, Direction::NegX).unwrap());

        // Outer faces are border
        assert!(is_border(&vol, 2, 2, 2, Direction::NegX).unwrap());
        assert!(is_border(&vol, 2, 2, 3, Direction::PosX).unwrap());
        assert!(is_border(&vol, 2, 2, 2, Direction::PosY).unwrap());
    }

    #[test]
    fn test_volume_edge_counts_as_background() {
        let vol = Volume::from_vec(2, 2, 2, vec![1; 8]).unwrap();

        assert!(is_border(&vol, 0, 0, 0, Direction::NegZ).unwrap());
        assert!(!is_border(&vol, 0, 0, 0, Direction::PosZ).unwrap());
        assert!(is_border(&vol, 1, 1, 1, Direction::PosY).unwrap());
        assert!(!is_border(&vol, 1, 1, 1, Direction::NegX).unwrap());
    }

    #[test]
    fn test_offsets_match_checks() {
        let mut vol = Volume::new(3, 3, 3).unwrap();
        vol.set(1, 1, 1, 1);
        for dir in Direction::ALL {
            let (dz, dy, dx) = dir.offset();
            vol.set(1 + dz, 1 + dy, 1 + dx, 1);
            assert!(!is_border(&vol, 1, 1, 1, dir).unwrap(), "dir={dir}");
            vol.set(1 + dz, 1 + dy, 1 + dx, 0);
        }
    }

    #[test]
    fn test_canonical_order_covers_all_directions() {
        for dir in Direction::ALL {
            assert_eq!(CANONICAL_ORDER.iter().filter(|&&d| d == dir).count(), 1);
        }
        assert_eq!(CANONICAL_ORDER[0], Direction::NegY);
        assert_eq!(CANONICAL_ORDER[5], Direction::NegZ);
    }

    #[test]
    fn test_invalid_coordinate() {
        let vol = Volume::new(2, 2, 2).unwrap();
        assert!(is_border(&vol, 0, 0, 2, Direction::PosX).is_err());
    }
}
