//! Frequency-reuse cluster tiling.
//!
//! A reuse pattern `(i, j)` means: from a cell, walk `i` cells in a straight
//! line, turn 60° and walk `j` more to reach the nearest cell that reuses the
//! same channel. Rotating that walk through the six directions gives the six
//! co-channel repeats of a seed.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::error::ToolError;
use crate::lattice::CellCoord;

/// Number of distinct channel colors; seeds cycle through them.
pub const PALETTE_SIZE: usize = 10;

/// Display names of the channel palette, in assignment order.
pub const CHANNEL_NAMES: [&str; PALETTE_SIZE] = [
    "pink", "orange", "yellow", "purple", "cyan", "magenta", "blue", "green", "red", "brown",
];

/// Palette slot assigned to a seed and all of its co-channel repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct Channel(pub usize);

impl Channel {
    /// Channel given to the seed selected at position `order` (0-based).
    pub fn for_seed(order: usize) -> Self {
        Self(order % PALETTE_SIZE)
    }

    /// Palette name, e.g. `"pink"`.
    pub fn name(self) -> &'static str {
        CHANNEL_NAMES[self.0 % PALETTE_SIZE]
    }
}

/// Channel assignments keyed by lattice tag.
///
/// Keys may fall outside the bounded grid; renderers skip those.
pub type ClusterMap = HashMap<CellCoord, Channel>;

/// Reuse distance pair `(i, j)` and its derived cluster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub struct ReusePattern {
    i: u32,
    j: u32,
}

impl ReusePattern {
    /// Largest accepted index; keeps `N` within `u32` and translations within `i32`.
    pub const MAX_INDEX: u32 = 1 << 15;

    /// Creates a pattern, rejecting indices above [`ReusePattern::MAX_INDEX`].
    pub fn new(i: u32, j: u32) -> Result<Self, ToolError> {
        for (field, value) in [("i", i), ("j", j)] {
            if value > Self::MAX_INDEX {
                return Err(ToolError::OutOfRange {
                    field,
                    value: i64::from(value),
                    max: Self::MAX_INDEX,
                });
            }
        }
        Ok(Self { i, j })
    }

    /// Parses the two text entries of the control panel.
    ///
    /// Blank entries count as 0.
    pub fn from_inputs(i: &str, j: &str) -> Result<Self, ToolError> {
        Self::new(parse_index("i", i)?, parse_index("j", j)?)
    }

    /// Steps along the first direction.
    pub fn i(&self) -> u32 {
        self.i
    }

    /// Steps after the 60° turn.
    pub fn j(&self) -> u32 {
        self.j
    }

    /// Cluster size `N = i² + ij + j²`: distinct channel groups per tile.
    pub fn cluster_size(&self) -> u32 {
        self.i * self.i + self.i * self.j + self.j * self.j
    }

    /// Hex steps between a seed and each of its co-channel repeats.
    pub fn reuse_distance(&self) -> u32 {
        self.i + self.j
    }

    /// Co-channel reuse ratio `D / R = √(3N)`.
    pub fn reuse_ratio(&self) -> f64 {
        (3.0 * f64::from(self.cluster_size())).sqrt()
    }
}

fn parse_index(field: &'static str, text: &str) -> Result<u32, ToolError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    let value: i64 = text.parse().map_err(|_| ToolError::InvalidNumber {
        field,
        value: text.to_string(),
    })?;
    if value < 0 {
        return Err(ToolError::NegativeIndex { field, value });
    }
    u32::try_from(value).map_err(|_| ToolError::OutOfRange {
        field,
        value,
        max: ReusePattern::MAX_INDEX,
    })
}

/// The six nearest cells that share `coord`'s channel under `pattern`.
///
/// One hop only: repeats of the repeats are not generated.
pub fn co_channel_neighbors(coord: CellCoord, pattern: ReusePattern) -> [CellCoord; 6] {
    let (x, y) = (coord.x, coord.y);
    let (i, j) = (pattern.i as i32, pattern.j as i32);
    [
        CellCoord::new(x - j, y - 2 * i - j),
        CellCoord::new(x - i - j, y - i + j),
        CellCoord::new(x - i, y + i + 2 * j),
        CellCoord::new(x + j, y + 2 * i + j),
        CellCoord::new(x + i + j, y + i - j),
        CellCoord::new(x + i, y - i - 2 * j),
    ]
}

/// Seed cells in the order they were first picked, each with its channel.
///
/// Every accepted click uses up one of `capacity` clicks and hands out the next
/// palette channel. Clicking a seed again recolors it in place.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Selection {
    capacity: usize,
    clicks: usize,
    seeds: Vec<(CellCoord, Channel)>,
}

impl Selection {
    /// An empty selection accepting up to `capacity` clicks.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            clicks: 0,
            seeds: Vec::with_capacity(capacity.min(64)),
        }
    }

    /// Gives `coord` the next channel and returns it.
    ///
    /// Returns `None` once `capacity` clicks have been used.
    pub fn try_insert(&mut self, coord: CellCoord) -> Option<Channel> {
        if self.is_full() {
            return None;
        }
        let channel = Channel::for_seed(self.clicks);
        self.clicks += 1;
        match self.seeds.iter_mut().find(|(c, _)| *c == coord) {
            Some(seed) => seed.1 = channel,
            None => self.seeds.push((coord, channel)),
        }
        Some(channel)
    }

    /// Channel of `coord` if it is a seed.
    pub fn channel_of(&self, coord: CellCoord) -> Option<Channel> {
        self.seeds
            .iter()
            .find(|(c, _)| *c == coord)
            .map(|&(_, ch)| ch)
    }

    /// Seeds in first-pick order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Channel)> + '_ {
        self.seeds.iter().copied()
    }

    /// Number of distinct seed cells.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// `true` when no seed has been picked.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Clicks accepted so far, repeats included.
    pub fn clicks(&self) -> usize {
        self.clicks
    }

    /// Maximum number of clicks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clicks still accepted.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.clicks)
    }

    /// `true` once `capacity` clicks have been used.
    pub fn is_full(&self) -> bool {
        self.clicks >= self.capacity
    }
}

/// Assigns every seed's channel to its six co-channel repeats.
///
/// Seeds are applied in insertion order, so when two seeds reach the same
/// cell the later seed's channel is kept.
pub fn apply_cluster_coloring(selection: &Selection, pattern: ReusePattern) -> ClusterMap {
    let mut map = ClusterMap::new();
    for (seed, channel) in selection.iter() {
        for coord in co_channel_neighbors(seed, pattern) {
            map.insert(coord, channel);
        }
    }
    map
}
