//! Voxel Thinning - 3D topology-preserving skeletonization
//!
//! Implements the directional thinning of Lee, Kashyap & Chu (1994) on dense
//! binary volumes. Foreground voxels are peeled away one face direction at a
//! time until only a 1-voxel-thick skeleton with the same topology remains.
//!
//! The library is usable from Rust directly and exposes a C ABI in `ffi`.

pub mod error;
pub mod ffi;
pub mod generate;
pub mod io;
pub mod thinning;
pub mod volume;


pub use error::{ThinningError, ThinningResult};
pub use thinning::{
    is_border, is_euler_invariant, is_simple_point, neighborhood, thin, thin_with_stats,
    Direction, Neighborhood, Thinner, ThinningConfig, ThinningObserver, ThinningStats,
    CANONICAL_ORDER,
};
pub use volume::Volume;
