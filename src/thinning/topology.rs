//! Local topology predicates of Lee, Kashyap & Chu (1994).
//!
//! Both predicates look only at a voxel's [`Neighborhood`]:
//! - Euler invariance sums a signed contribution per 2x2x2 octant through
//!   [`EULER_LUT`]; a zero sum means removing the center keeps the local Euler
//!   characteristic.
//! - The simple-point test requires the 26 surrounding cells to hold at most one
//!   26-connected foreground component.

use super::neighborhood::{index_offset, Neighborhood, CENTER, NEIGHBORHOOD_SIZE};

/// Non-zero Euler table entries as `(octant code, contribution)`. Only odd codes
/// (center bit set) appear.
#[rustfmt::skip]
const EULER_ENTRIES: [(u8, i8); 128] = [
    (1, 1), (3, -1), (5, -1), (7, 1), (9, -3), (11, -1), (13, -1), (15, 1),
    (17, -1), (19, 1), (21, 1), (23, -1), (25, 3), (27, 1), (29, 1), (31, -1),
    (33, -3), (35, -1), (37, 3), (39, 1), (41, 1), (43, -1), (45, 3), (47, 1),
    (49, -1), (51, 1), (53, 1), (55, -1), (57, 3), (59, 1), (61, 1), (63, -1),
    (65, -3), (67, 3), (69, -1), (71, 1), (73, 1), (75, 3), (77, -1), (79, 1),
    (81, -1), (83, 1), (85, 1), (87, -1), (89, 3), (91, 1), (93, 1), (95, -1),
    (97, 1), (99, 3), (101, 3), (103, 1), (105, 5), (107, 3), (109, 3), (111, 1),
    (113, -1), (115, 1), (117, 1), (119, -1), (121, 3), (123, 1), (125, 1), (127, -1),
    (129, -7), (131, -1), (133, -1), (135, 1), (137, -3), (139, -1), (141, -1), (143, 1),
    (145, -1), (147, 1), (149, 1), (151, -1), (153, 3), (155, 1), (157, 1), (159, -1),
    (161, -3), (163, -1), (165, 3), (167, 1), (169, 1), (171, -1), (173, 3), (175, 1),
    (177, -1), (179, 1), (181, 1), (183, -1), (185, 3), (187, 1), (189, 1), (191, -1),
    (193, -3), (195, 3), (197, -1), (199, 1), (201, 1), (203, 3), (205, -1), (207, 1),
    (209, -1), (211, 1), (213, 1), (215, -1), (217, 3), (219, 1), (221, 1), (223, -1),
    (225, 1), (227, 3), (229, 3), (231, 1), (233, 5), (235, 3), (237, 3), (239, 1),
    (241, -1), (243, 1), (245, 1), (247, -1), (249, 3), (251, 1), (253, 1), (255, -1),
];

/// Signed Euler contribution of each 8-bit octant code.
pub static EULER_LUT: [i8; 256] = build_euler_lut();

/// Smallest table entry; bounds the pruning in [`is_euler_invariant`].
const EULER_MIN: i32 = lut_bound(false);
/// Largest table entry.
const EULER_MAX: i32 = lut_bound(true);

/// Window indices forming each octant, most significant bit first.
/// Bit 0 of an octant code is always set and stands for the center.
pub const OCTANTS: [[usize; 7]; 8] = [
    [24, 25, 15, 16, 21, 22, 12], // -x -y +z
    [26, 23, 17, 14, 25, 22, 16], // +x -y +z
    [18, 21, 9, 12, 19, 22, 10],  // -x +y +z
    [20, 23, 19, 22, 11, 14, 10], // +x +y +z
    [6, 15, 7, 16, 3, 12, 4],     // -x -y -z
    [8, 7, 17, 16, 5, 4, 14],     // +x -y -z
    [0, 9, 3, 12, 1, 10, 4],      // -x +y -z
    [2, 1, 11, 10, 5, 4, 14],     // +x +y -z
];

/// Bitmask of the cells 26-adjacent to each window cell, center excluded.
const ADJACENCY: [u32; NEIGHBORHOOD_SIZE] = build_adjacency();

const fn build_euler_lut() -> [i8; 256] {
    let mut lut = [0i8; 256];
    let mut i = 0;
    while i < EULER_ENTRIES.len() {
        let (code, value) = EULER_ENTRIES[i];
        lut[code as usize] = value;
        i += 1;
    }
    lut
}

const fn lut_bound(max: bool) -> i32 {
    let lut = build_euler_lut();
    let mut bound = lut[0] as i32;
    let mut i = 1;
    while i < lut.len() {
        let v = lut[i] as i32;
        if (max && v > bound) || (!max && v < bound) {
            bound = v;
        }
        i += 1;
    }
    bound
}

const fn build_adjacency() -> [u32; NEIGHBORHOOD_SIZE] {
    let mut masks = [0u32; NEIGHBORHOOD_SIZE];
    let mut a = 0;
    while a < NEIGHBORHOOD_SIZE {
        let (az, ay, ax) = index_offset(a);
        let mut b = 0;
        while b < NEIGHBORHOOD_SIZE {
            let (bz, by, bx) = index_offset(b);
            let near = (az - bz).abs() <= 1 && (ay - by).abs() <= 1 && (ax - bx).abs() <= 1;
            if a != b && b != CENTER && near {
                masks[a] |= 1 << b;
            }
            b += 1;
        }
        a += 1;
    }
    masks
}

/// 8-bit code of one octant: bit 0 set, then bits 7..1 from the octant cells.
#[inline]
pub fn octant_code(n: &Neighborhood, octant: &[usize; 7]) -> u8 {
    let mut code = 1u8;
    for (bit, &k) in octant.iter().enumerate() {
        if n[k] != 0 {
            code |= 1 << (7 - bit);
        }
    }
    code
}

/// Whether removing the center leaves the local Euler characteristic unchanged.
///
/// Stops early once the partial sum can no longer return to zero with the
/// remaining octants; the answer is the same as the full sum.
pub fn is_euler_invariant(n: &Neighborhood) -> bool {
    let mut euler = 0i32;
    for (i, octant) in OCTANTS.iter().enumerate() {
        euler += EULER_LUT[octant_code(n, octant) as usize] as i32;

        let remaining = (OCTANTS.len() - 1 - i) as i32;
        if euler < -EULER_MAX * remaining || euler > -EULER_MIN * remaining {
            return false;
        }
    }
    euler == 0
}

/// Whether the foreground cells around the center form at most one
/// 26-connected component.
pub fn is_simple_point(n: &Neighborhood) -> bool {
    let mut unvisited = 0u32;
    for (k, &cell) in n.iter().enumerate() {
        if k != CENTER && cell != 0 {
            unvisited |= 1 << k;
        }
    }
    if unvisited == 0 {
        return true;
    }

    // Each cell is pushed once, when it leaves `unvisited`.
    let mut stack = [0u8; NEIGHBORHOOD_SIZE - 1];
    let first = unvisited.trailing_zeros();
    unvisited &= !(1 << first);
    stack[0] = first as u8;
    let mut top = 1;

    while top > 0 {
        top -= 1;
        let k = stack[top] as usize;
        let mut reached = ADJACENCY[k] & unvisited;
        unvisited &= !reached;
        while reached != 0 {
            let next = reached.trailing_zeros();
            reached &= reached - 1;
            stack[top] = next as u8;
            top += 1;
        }
    }

    unvisited == 0
}
