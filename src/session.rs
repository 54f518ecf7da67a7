//! The interaction state machine: pick a pattern, seed cells, lock the result.
//!
//! ```text
//!   Idle ──start──▶ Selecting ──end──▶ Locked
//!    ▲                  │                 │
//!    └──────reset───────┴─────reset───────┘
//! ```
//!
//! `start` is also accepted from `Locked` (and from `Selecting`, where it
//! simply restarts), matching the control panel where Start stays enabled.

use bevy::prelude::*;

use crate::cluster::{Channel, ClusterMap, ReusePattern, Selection, apply_cluster_coloring};
use crate::error::ToolError;
use crate::lattice::HexLattice;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SessionPhase {
    /// No selection in progress; the pattern can be edited.
    #[default]
    Idle,
    /// Clicks on the board record seeds, up to `N`.
    Selecting,
    /// Co-channel repeats are painted; the board ignores clicks.
    Locked,
}

/// Context object owning the pattern, the seeds, and the computed clusters.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct ReuseSession {
    phase: SessionPhase,
    pattern: ReusePattern,
    selection: Selection,
    #[reflect(ignore)]
    clusters: ClusterMap,
}

impl ReuseSession {
    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Pattern the next (or current) selection uses.
    pub fn pattern(&self) -> ReusePattern {
        self.pattern
    }

    /// `N` of the current pattern.
    pub fn cluster_size(&self) -> u32 {
        self.pattern.cluster_size()
    }

    /// Seeds picked so far.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// How many more clicks will be accepted.
    pub fn remaining_seeds(&self) -> usize {
        match self.phase {
            SessionPhase::Selecting => self.selection.remaining(),
            _ => 0,
        }
    }

    /// Replaces the pattern and returns the new `N`.
    ///
    /// Refused while seeds are being picked, since `N` bounds the selection.
    pub fn set_reuse_pattern(&mut self, pattern: ReusePattern) -> Result<u32, ToolError> {
        if self.phase == SessionPhase::Selecting {
            return Err(ToolError::PatternLocked);
        }
        self.pattern = pattern;
        let n = pattern.cluster_size();
        info!("Reuse pattern i={} j={} -> N={n}", pattern.i(), pattern.j());
        Ok(n)
    }

    /// Clears previous seeds and starts accepting up to `N` clicks.
    pub fn start(&mut self) {
        self.selection = Selection::with_capacity(self.cluster_size() as usize);
        self.clusters.clear();
        self.phase = SessionPhase::Selecting;
        info!("Selecting up to {} seed cells", self.cluster_size());
    }

    /// Seeds the cell nearest to `pixel`, returning the channel it received.
    ///
    /// Every click counts toward `N`, so clicking a seed again gives it the
    /// next channel. Ignored outside [`SessionPhase::Selecting`] and once `N`
    /// clicks have been made.
    pub fn select_cell(&mut self, pixel: Vec2, lattice: &HexLattice) -> Option<Channel> {
        if self.phase != SessionPhase::Selecting {
            return None;
        }
        let coord = lattice.closest_cell(pixel).coord;
        let channel = self.selection.try_insert(coord);
        match channel {
            Some(ch) => debug!(
                "Click {}/{} at ({coord}) -> {}",
                self.selection.clicks(),
                self.selection.capacity(),
                ch.name()
            ),
            None => debug!("Click on ({coord}) ignored"),
        }
        channel
    }

    /// Tiles every seed's channel onto its co-channel repeats and locks the board.
    ///
    /// Only a selection in progress can be locked; when idle the (empty) map is
    /// returned unchanged. Repeated calls with the same seeds and pattern return
    /// the same map.
    pub fn compute_clusters(&mut self) -> ClusterMap {
        if self.phase == SessionPhase::Idle {
            debug!("End ignored: no selection in progress");
            return self.clusters.clone();
        }
        self.clusters = apply_cluster_coloring(&self.selection, self.pattern);
        if self.phase != SessionPhase::Locked {
            info!(
                "Locked {} seeds, {} co-channel cells",
                self.selection.len(),
                self.clusters.len()
            );
        }
        self.phase = SessionPhase::Locked;
        self.clusters.clone()
    }

    /// Drops seeds and clusters and returns to [`SessionPhase::Idle`].
    pub fn reset(&mut self) {
        self.selection = Selection::default();
        self.clusters.clear();
        self.phase = SessionPhase::Idle;
        info!("Session reset");
    }

    /// Channel to paint per cell: seeds first, then co-channel repeats on top.
    pub fn coloring(&self) -> ClusterMap {
        let mut out: ClusterMap = self.selection.iter().collect();
        out.extend(self.clusters.iter().map(|(&c, &ch)| (c, ch)));
        out
    }
}
