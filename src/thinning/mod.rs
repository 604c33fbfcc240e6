//! Topology-preserving thinning of binary volumes.
//!
//! This module contains the neighborhood access, border classification and
//! topology predicates, plus the directional deletion loop that drives them
//! to a fixed point. The FFI layer in `ffi/` and the `voxel-thin` binary call
//! into here.

pub mod border;
pub mod engine;
pub mod neighborhood;
pub mod stats;
pub mod topology;

pub use border::{is_border, Direction, CANONICAL_ORDER};
pub use engine::{thin, thin_with_stats, Thinner, ThinningConfig};
pub use neighborhood::{foreground_neighbors, neighborhood, Neighborhood, CENTER};
pub use stats::{CollectSummary, ThinningObserver, ThinningStats};
pub use topology::{is_euler_invariant, is_simple_point, EULER_LUT, OCTANTS};
