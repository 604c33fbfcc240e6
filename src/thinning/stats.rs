//! Optional thinning counters.
//!
//! The engine reports progress through [`ThinningObserver`]. `()` ignores every
//! event, so an unobserved run pays nothing. Observers never influence which
//! voxels are deleted.

use std::fmt;
use std::time::Duration;

use super::border::Direction;

/// Totals from one collect phase, aggregated across workers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectSummary {
    /// Border points whose neighborhood was evaluated.
    pub checks: u64,
    /// Voxels that passed every predicate.
    pub candidates: u64,
}

/// Receives engine events. Every method defaults to a no-op.
pub trait ThinningObserver {
    /// A new outer cycle over all six directions begins.
    fn cycle_started(&mut self) {}

    /// A direction pass begins.
    fn pass_started(&mut self, _dir: Direction) {}

    /// The collect phase of a pass finished.
    fn collected(&mut self, _dir: Direction, _summary: CollectSummary, _elapsed: Duration) {}

    /// One candidate was rechecked; `deleted` tells whether the deletion stuck.
    fn rechecked(&mut self, _deleted: bool) {}

    /// The sequential phase of a pass finished.
    fn pass_finished(&mut self, _dir: Direction, _deleted: u64, _elapsed: Duration) {}

    /// The fixed point was reached.
    fn finished(&mut self, _elapsed: Duration) {}
}

impl ThinningObserver for () {}

/// Counters and phase timings for one thinning run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThinningStats {
    pub outer_loops: u32,
    pub border_passes: u32,
    pub candidate_checks: u64,
    pub candidates_added: u64,
    pub sequential_checks: u64,
    pub deleted_accepted: u64,
    pub deleted_reverted: u64,
    pub total: Duration,
    pub collect: Duration,
    pub sequential: Duration,
}

impl ThinningObserver for ThinningStats {
    fn cycle_started(&mut self) {
        self.outer_loops += 1;
    }

    fn pass_started(&mut self, _dir: Direction) {
        self.border_passes += 1;
    }

    fn collected(&mut self, _dir: Direction, summary: CollectSummary, elapsed: Duration) {
        self.candidate_checks += summary.checks;
        self.candidates_added += summary.candidates;
        self.collect += elapsed;
    }

    fn rechecked(&mut self, deleted: bool) {
        self.sequential_checks += 1;
        if deleted {
            self.deleted_accepted += 1;
        } else {
            self.deleted_reverted += 1;
        }
    }

    fn pass_finished(&mut self, _dir: Direction, _deleted: u64, elapsed: Duration) {
        self.sequential += elapsed;
    }

    fn finished(&mut self, elapsed: Duration) {
        self.total = elapsed;
    }
}

impl fmt::Display for ThinningStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total(ms)         : {}", self.total.as_millis())?;
        writeln!(f, "collect(ms)       : {}", self.collect.as_millis())?;
        writeln!(f, "sequential(ms)    : {}", self.sequential.as_millis())?;
        writeln!(f, "outer loops       : {}", self.outer_loops)?;
        writeln!(f, "border passes     : {}", self.border_passes)?;
        writeln!(f, "candidate checks  : {}", self.candidate_checks)?;
        writeln!(f, "candidates added  : {}", self.candidates_added)?;
        writeln!(f, "sequential checks : {}", self.sequential_checks)?;
        writeln!(f, "deleted accepted  : {}", self.deleted_accepted)?;
        write!(f, "deleted reverted  : {}", self.deleted_reverted)
    }
}
