//! Synthetic test volumes.
//!
//! Ranges are clamped into the volume and swapped when given backwards.
//! Voxels that would land outside the volume are dropped.

use crate::error::ThinningResult;
use crate::volume::Volume;

/// Clamp both ends into `0..len` and order them.
fn clamp_range(a: isize, b: isize, len: usize) -> (isize, isize) {
    let hi = len as isize - 1;
    let a = a.clamp(0, hi);
    let b = b.clamp(0, hi);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Straight segment along x at row `(z, y)`, covering `x0..=x1`.
pub fn line_x(
    depth: usize,
    height: usize,
    width: usize,
    z: isize,
    y: isize,
    x0: isize,
    x1: isize,
) -> ThinningResult<Volume> {
    let mut vol = Volume::new(depth, height, width)?;
    if vol.is_empty() {
        return Ok(vol);
    }

    let (x0, x1) = clamp_range(x0, x1, width);
    for x in x0..=x1 {
        vol.set(z, y, x, 1);
    }
    Ok(vol)
}

/// Filled axis-aligned box, bounds inclusive.
#[allow(clippy::too_many_arguments)]
pub fn solid_box(
    depth: usize,
    height: usize,
    width: usize,
    z0: isize,
    z1: isize,
    y0: isize,
    y1: isize,
    x0: isize,
    x1: isize,
) -> ThinningResult<Volume> {
    let mut vol = Volume::new(depth, height, width)?;
    if vol.is_empty() {
        return Ok(vol);
    }

    let (z0, z1) = clamp_range(z0, z1, depth);
    let (y0, y1) = clamp_range(y0, y1, height);
    let (x0, x1) = clamp_range(x0, x1, width);
    for z in z0..=z1 {
        for y in y0..=y1 {
            for x in x0..=x1 {
                vol.set(z, y, x, 1);
            }
        }
    }
    Ok(vol)
}

/// Three orthogonal 1-voxel arms of half-length `arm` through `(cz, cy, cx)`.
pub fn cross(
    depth: usize,
    height: usize,
    width: usize,
    cz: isize,
    cy: isize,
    cx: isize,
    arm: isize,
) -> ThinningResult<Volume> {
    let mut vol = Volume::new(depth, height, width)?;

    for t in -arm..=arm {
        vol.set(cz, cy, cx + t, 1);
        vol.set(cz, cy + t, cx, 1);
        vol.set(cz + t, cy, cx, 1);
    }
    Ok(vol)
}

/// 1-voxel-thick rectangular frame in plane `z`, corners at `(y0, x0)` and `(y1, x1)`.
#[allow(clippy::too_many_arguments)]
pub fn square_loop_xy(
    depth: usize,
    height: usize,
    width: usize,
    z: isize,
    y0: isize,
    y1: isize,
    x0: isize,
    x1: isize,
) -> ThinningResult<Volume> {
    let mut vol = Volume::new(depth, height, width)?;
    if vol.is_empty() {
        return Ok(vol);
    }

    let (y0, y1) = clamp_range(y0, y1, height);
    let (x0, x1) = clamp_range(x0, x1, width);
    for x in x0..=x1 {
        vol.set(z, y0, x, 1);
        vol.set(z, y1, x, 1);
    }
    for y in y0..=y1 {
        vol.set(z, y, x0, 1);
        vol.set(z, y, x1, 1);
    }
    Ok(vol)
}

/// Solid torus around the z axis through `(cz, cy, cx)`.
///
/// A voxel is set when `(sqrt(dx² + dy²) - major)² + dz² <= minor²`.
#[allow(clippy::too_many_arguments)]
pub fn torus(
    depth: usize,
    height: usize,
    width: usize,
    cz: isize,
    cy: isize,
    cx: isize,
    major: f64,
    minor: f64,
) -> ThinningResult<Volume> {
    let mut vol = Volume::new(depth, height, width)?;

    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let dz = (z as isize - cz) as f64;
                let dy = (y as isize - cy) as f64;
                let dx = (x as isize - cx) as f64;

                let t = (dx * dx + dy * dy).sqrt() - major;
                if t * t + dz * dz <= minor * minor {
                    let idx = vol.index(z, y, x);
                    vol.cells[idx] = 1;
                }
            }
        }
    }
    Ok(vol)
}
