//! Control panel: reuse pattern entries, session buttons, capacity window.

mod entities;
mod systems;

pub use entities::{CapacityForm, ControlsState, PanelAction};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

/// Panel layout and pre-filled entries.
#[derive(Resource, Clone, Debug, Default, Reflect)]
pub struct ControlsConfig {
    /// Value pre-filled in the `i` entry.
    pub initial_i: Option<u32>,
    /// Value pre-filled in the `j` entry.
    pub initial_j: Option<u32>,
}

/// egui side panel driving the [`crate::session::ReuseSession`].
///
/// Expects [`crate::board::BoardPlugin`] to provide the session resource.
pub struct ControlsPlugin(pub ControlsConfig);

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ControlsConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(ControlsState::from_config(&self.0))
            .add_systems(
                EguiPrimaryContextPass,
                (systems::controls_panel, systems::capacity_window).chain(),
            );
    }
}
