//! Hex board: one flat mesh per lattice cell, outlines, fills, and click picking.
//!
//! The board only renders what [`ReuseSession::coloring`] reports and forwards
//! clicks to [`ReuseSession::select_cell`]; it owns no selection state.

mod entities;
mod systems;

pub use entities::{BoardCamera, BoardFrame, HexTile, PointerOverUi};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::AppMode;
use crate::cluster::{Channel, PALETTE_SIZE};
use crate::lattice::HexLattice;
use crate::session::ReuseSession;

/// Grid dimensions and colors of the board.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct BoardConfig {
    /// Number of hex columns.
    pub cols: u32,
    /// Number of hex rows.
    pub rows: u32,
    /// Circumradius of a cell in pixels.
    pub cell_size: f32,
    /// Fill of cells without a channel.
    pub background: Color,
    /// Cell outline color.
    pub outline: Color,
    /// Window clear color.
    pub clear_color: Color,
    /// Fill per channel, indexed by [`Channel`].
    pub channel_colors: [Color; PALETTE_SIZE],
    /// Overlay each cell's lattice tag.
    pub show_coords: bool,
}

impl BoardConfig {
    /// Fill color for `channel`.
    pub fn channel_color(&self, channel: Channel) -> Color {
        self.channel_colors[channel.0 % PALETTE_SIZE]
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cols: 25,
            rows: 25,
            cell_size: 40.0,
            background: Color::WHITE,
            outline: Color::srgb(0.745, 0.745, 0.745),
            clear_color: Color::WHITE,
            channel_colors: [
                Color::srgb(1.0, 0.753, 0.796),
                Color::srgb(1.0, 0.647, 0.0),
                Color::srgb(1.0, 1.0, 0.0),
                Color::srgb(0.627, 0.125, 0.941),
                Color::srgb(0.0, 1.0, 1.0),
                Color::srgb(1.0, 0.0, 1.0),
                Color::srgb(0.0, 0.0, 1.0),
                Color::srgb(0.0, 0.502, 0.0),
                Color::srgb(1.0, 0.0, 0.0),
                Color::srgb(0.647, 0.165, 0.165),
            ],
            show_coords: false,
        }
    }
}

/// Builds the lattice at startup and keeps the board in sync with the session.
pub struct BoardPlugin(pub BoardConfig);

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        let lattice = HexLattice::new(self.0.cols, self.0.rows, self.0.cell_size);
        let frame = BoardFrame::from_lattice(&lattice);

        app.register_type::<BoardConfig>()
            .register_type::<HexTile>()
            .register_type::<ReuseSession>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .insert_resource(lattice)
            .insert_resource(frame)
            .init_resource::<ReuseSession>()
            .init_resource::<PointerOverUi>()
            .add_systems(Startup, systems::spawn_board)
            .add_systems(
                Update,
                systems::pick_cell.run_if(in_state(AppMode::Running)),
            )
            .add_systems(
                Update,
                systems::paint_cells
                    .after(systems::pick_cell)
                    .run_if(resource_changed::<ReuseSession>),
            )
            .add_systems(Update, systems::draw_outlines);

        if self.0.show_coords {
            app.add_systems(EguiPrimaryContextPass, systems::draw_coord_labels);
        }
    }
}
