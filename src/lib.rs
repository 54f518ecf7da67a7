#![warn(missing_docs)]
//! Frequency-reuse cluster explorer for hexagonal cellular layouts.
//!
//! Pick a reuse pattern `(i, j)`, seed up to `N = i² + ij + j²` cells with
//! distinct channels, and see where each channel repeats. The geometry lives
//! in the pure [`lattice`], [`cluster`] and [`capacity`] modules; [`session`]
//! is the interaction state machine, and [`board`] / [`controls`] are the Bevy
//! plugins that draw it.

pub mod board;
pub mod capacity;
pub mod cluster;
pub mod controls;
pub mod error;
pub mod lattice;
pub mod session;

use bevy::prelude::*;

/// Application-wide mode, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum AppMode {
    /// Normal use: the board accepts clicks.
    #[default]
    Running,
    /// World inspector shown (F1 to toggle); board clicks are ignored.
    Debugging,
}

impl AppMode {
    /// The mode the inspector key switches to.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Running => Self::Debugging,
            Self::Debugging => Self::Running,
        }
    }
}
