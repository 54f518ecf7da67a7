use bevy::prelude::*;

use crate::lattice::{CellCoord, HexLattice};

/// Marker for the 2D camera looking at the board.
#[derive(Component, Reflect)]
pub struct BoardCamera;

/// One rendered lattice cell. Its fill is a per-tile `ColorMaterial`.
#[derive(Component, Reflect)]
pub struct HexTile {
    /// Lattice tag of the cell this tile draws.
    pub coord: CellCoord,
}

/// `true` while the pointer is over an egui panel, so board clicks are skipped.
///
/// Written by the control panel each frame.
#[derive(Resource, Default, Debug)]
pub struct PointerOverUi(pub bool);

/// Maps between lattice pixel space (y down, origin at the first cell) and
/// world space (y up, origin at the middle of the board).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BoardFrame {
    center: Vec2,
    extent: Vec2,
}

impl BoardFrame {
    /// Frame centred on the bounding box of `lattice`.
    pub fn from_lattice(lattice: &HexLattice) -> Self {
        let (min, max) = lattice.bounds();
        Self {
            center: (min + max) / 2.0,
            extent: max - min,
        }
    }

    /// Width and height of the board in pixels.
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    /// World position of a lattice pixel.
    pub fn to_world(&self, pixel: Vec2) -> Vec2 {
        let d = pixel - self.center;
        Vec2::new(d.x, -d.y)
    }

    /// Lattice pixel of a world position.
    pub fn to_pixel(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x, -world.y) + self.center
    }
}
