//! Directional thinning loop.
//!
//! Each cycle visits the six face directions in a fixed order. A direction pass
//! has two phases:
//! - Collect: read-only scan of the volume as it stood when the pass began.
//!   Border points that are not line ends, are Euler invariant and are simple
//!   become candidates, kept in scan order. This phase may run on the worker pool.
//! - Recheck: candidates are deleted one at a time, in order. A deletion is
//!   undone if the voxel stopped being simple because of earlier deletions in
//!   the same pass. Always sequential.
//!
//! The loop stops after a cycle in which no pass deleted anything.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use super::border::{is_border_at, Direction, CANONICAL_ORDER};
use super::neighborhood::{foreground_neighbors, gather, NEIGHBORHOOD_SIZE};
use super::stats::{CollectSummary, ThinningObserver, ThinningStats};
use super::topology::{is_euler_invariant, is_simple_point};
use crate::error::{ThinningError, ThinningResult};
use crate::volume::Volume;

/// A voxel provisionally eligible for deletion in the current pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    idx: usize,
    z: usize,
    y: usize,
    x: usize,
}

/// Candidates and counters gathered by one worker.
#[derive(Debug, Default)]
struct CollectBatch {
    candidates: Vec<Candidate>,
    checks: u64,
}

impl CollectBatch {
    /// Append `other`, which covers voxels after `self` in scan order.
    fn merge(mut self, mut other: CollectBatch) -> CollectBatch {
        self.candidates.append(&mut other.candidates);
        self.checks += other.checks;
        self
    }

    fn summary(&self) -> CollectSummary {
        CollectSummary {
            checks: self.checks,
            candidates: self.candidates.len() as u64,
        }
    }
}

/// Settings for a [`Thinner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThinningConfig {
    /// Worker threads for the collect phase. 1 runs it on the calling thread,
    /// 0 lets rayon pick the thread count.
    pub num_threads: usize,

    /// Minimum number of tracked foreground voxels before the collect phase is
    /// handed to the pool.
    pub parallel_threshold: usize,

    /// Direction visiting order within a cycle.
    pub direction_order: [Direction; 6],
}

impl Default for ThinningConfig {
    fn default() -> Self {
        Self {
            num_threads: 1,
            parallel_threshold: 4096,
            direction_order: CANONICAL_ORDER,
        }
    }
}

impl ThinningConfig {
    /// Config with a dedicated pool of `num_threads` workers.
    #[must_use]
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads,
            ..Default::default()
        }
    }

    /// Config visiting directions in `order` instead of the canonical order.
    #[must_use]
    pub fn with_direction_order(order: [Direction; 6]) -> Self {
        Self {
            direction_order: order,
            ..Default::default()
        }
    }
}

/// Reusable thinning engine owning its worker pool.
pub struct Thinner {
    config: ThinningConfig,
    thread_pool: Option<rayon::ThreadPool>,
}

impl Default for Thinner {
    fn default() -> Self {
        Thinner {
            config: ThinningConfig::default(),
            thread_pool: None,
        }
    }
}

impl Thinner {
    /// Create an engine, building a worker pool unless `num_threads == 1`.
    pub fn new(config: ThinningConfig) -> ThinningResult<Self> {
        let thread_pool = if config.num_threads == 1 {
            None
        } else {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.num_threads)
                    .build()?,
            )
        };
        Ok(Thinner {
            config,
            thread_pool,
        })
    }

    pub fn config(&self) -> &ThinningConfig {
        &self.config
    }

    /// Thin a z-major buffer of `depth * height * width` voxels.
    ///
    /// The input is left untouched; the result holds only 0 and 1.
    pub fn thin(&self, input: &[u8], depth: usize, height: usize, width: usize) -> ThinningResult<Vec<u8>> {
        self.thin_observed(input, depth, height, width, &mut ())
    }

    /// Same as [`Thinner::thin`], reporting progress to `observer`.
    pub fn thin_observed<O: ThinningObserver + ?Sized>(
        &self,
        input: &[u8],
        depth: usize,
        height: usize,
        width: usize,
        observer: &mut O,
    ) -> ThinningResult<Vec<u8>> {
        // Saturates on overflow; no slice is that long, so it reports a mismatch.
        let expected = depth.saturating_mul(height).saturating_mul(width);
        if input.len() != expected {
            return Err(ThinningError::size_mismatch(expected, input.len()));
        }

        let volume = Volume {
            depth,
            height,
            width,
            cells: input.iter().map(|&c| u8::from(c != 0)).collect(),
        };
        Ok(self.run(volume, observer).cells)
    }

    /// Thin a [`Volume`], returning a new one.
    pub fn thin_volume(&self, volume: &Volume) -> ThinningResult<Volume> {
        self.thin_volume_observed(volume, &mut ())
    }

    pub fn thin_volume_observed<O: ThinningObserver + ?Sized>(
        &self,
        volume: &Volume,
        observer: &mut O,
    ) -> ThinningResult<Volume> {
        let (depth, height, width) = volume.dims();
        let cells = self.thin_observed(&volume.cells, depth, height, width, observer)?;
        Ok(Volume {
            depth,
            height,
            width,
            cells,
        })
    }

    fn run<O: ThinningObserver + ?Sized>(&self, mut volume: Volume, observer: &mut O) -> Volume {
        let started = Instant::now();

        // Scan-ordered list of voxels that may still be foreground.
        let mut foreground: Vec<usize> = volume
            .cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(|(idx, _)| idx)
            .collect();

        info!(
            depth = volume.depth,
            height = volume.height,
            width = volume.width,
            foreground = foreground.len(),
            threads = self.thread_pool.as_ref().map_or(1, rayon::ThreadPool::current_num_threads),
            "Starting thinning"
        );

        let passes_per_cycle = self.config.direction_order.len();
        let mut unchanged_passes = 0;
        let mut cycles = 0u32;
        let mut deleted_total = 0u64;

        while unchanged_passes < passes_per_cycle {
            unchanged_passes = 0;
            cycles += 1;
            observer.cycle_started();
            foreground.retain(|&idx| volume.cells[idx] != 0);

            for &dir in &self.config.direction_order {
                observer.pass_started(dir);

                let collect_started = Instant::now();
                let batch = self.collect(&volume, &foreground, dir);
                observer.collected(dir, batch.summary(), collect_started.elapsed());

                let recheck_started = Instant::now();
                let deleted = recheck(&mut volume, &batch.candidates, observer);
                observer.pass_finished(dir, deleted, recheck_started.elapsed());

                debug!(
                    cycle = cycles,
                    %dir,
                    candidates = batch.candidates.len(),
                    deleted,
                    "Direction pass"
                );

                if deleted == 0 {
                    unchanged_passes += 1;
                }
                deleted_total += deleted;
            }
        }

        let elapsed = started.elapsed();
        observer.finished(elapsed);

        info!(
            cycles,
            passes = cycles as usize * passes_per_cycle,
            deleted = deleted_total,
            remaining = volume.count_foreground(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Thinning converged"
        );

        volume
    }

    fn collect(&self, volume: &Volume, foreground: &[usize], dir: Direction) -> CollectBatch {
        match &self.thread_pool {
            Some(pool) if foreground.len() >= self.config.parallel_threshold => pool.install(|| {
                foreground
                    .par_iter()
                    .fold(CollectBatch::default, |mut batch, &idx| {
                        evaluate(volume, idx, dir, &mut batch);
                        batch
                    })
                    .reduce(CollectBatch::default, CollectBatch::merge)
            }),
            _ => {
                let mut batch = CollectBatch::default();
                for &idx in foreground {
                    evaluate(volume, idx, dir, &mut batch);
                }
                batch
            }
        }
    }
}

/// Test one voxel during the collect phase.
fn evaluate(volume: &Volume, idx: usize, dir: Direction, batch: &mut CollectBatch) {
    if volume.cells[idx] == 0 {
        return;
    }

    let (z, y, x) = volume.coords_of(idx);
    if !is_border_at(volume, idx, z, y, x, dir) {
        return;
    }

    let mut n = [0; NEIGHBORHOOD_SIZE];
    gather(volume, z, y, x, &mut n);
    batch.checks += 1;

    // Line ends stay
    if foreground_neighbors(&n) == 1 {
        return;
    }
    if !is_euler_invariant(&n) || !is_simple_point(&n) {
        return;
    }

    batch.candidates.push(Candidate { idx, z, y, x });
}

/// Delete candidates in order, restoring any that are no longer simple.
/// Returns the number of voxels deleted.
fn recheck<O: ThinningObserver + ?Sized>(
    volume: &mut Volume,
    candidates: &[Candidate],
    observer: &mut O,
) -> u64 {
    let mut n = [0; NEIGHBORHOOD_SIZE];
    let mut deleted = 0;

    for c in candidates {
        if volume.cells[c.idx] == 0 {
            continue;
        }

        volume.cells[c.idx] = 0;
        gather(volume, c.z, c.y, c.x, &mut n);
        let simple = is_simple_point(&n);
        if simple {
            deleted += 1;
        } else {
            volume.cells[c.idx] = 1;
        }
        observer.rechecked(simple);
    }

    deleted
}

/// Thin a buffer with the default sequential engine.
pub fn thin(input: &[u8], depth: usize, height: usize, width: usize) -> ThinningResult<Vec<u8>> {
    Thinner::default().thin(input, depth, height, width)
}

/// Thin a buffer with the default engine, accumulating counters into `stats`.
pub fn thin_with_stats(
    input: &[u8],
    depth: usize,
    height: usize,
    width: usize,
    stats: &mut ThinningStats,
) -> ThinningResult<Vec<u8>> {
    Thinner::default().thin_observed(input, depth, height, width, stats)
}
