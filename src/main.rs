//! Frequency-reuse cluster explorer.
//!
//! Draws a hexagonal cell grid, lets the student seed one cell per channel of
//! a reuse cluster, and paints every co-channel repeat.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use hex_reuse::AppMode;
use hex_reuse::board::{BoardConfig, BoardPlugin};
use hex_reuse::controls::{ControlsConfig, ControlsPlugin};
#[cfg(feature = "native")]
use hex_reuse::lattice::{HexLattice, parse_cell_size};

/// Command-line overrides for the board and the pattern entries.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "hex-reuse", version, about = "Frequency-reuse clusters on a hex grid")]
struct Cli {
    /// Number of hex columns.
    #[arg(long, value_parser = grid_dimension())]
    cols: Option<u32>,
    /// Number of hex rows.
    #[arg(long, value_parser = grid_dimension())]
    rows: Option<u32>,
    /// Cell circumradius in pixels.
    #[arg(long, value_parser = parse_cell_size)]
    cell_size: Option<f32>,
    /// Pre-fill the `i` entry.
    #[arg(short, long)]
    i: Option<u32>,
    /// Pre-fill the `j` entry.
    #[arg(short, long)]
    j: Option<u32>,
    /// Label every cell with its lattice coordinates.
    #[arg(long)]
    show_coords: bool,
}

#[cfg(feature = "native")]
fn grid_dimension() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(HexLattice::MAX_DIMENSION))
}

#[cfg(feature = "native")]
fn configs() -> (BoardConfig, ControlsConfig) {
    let cli = Cli::parse();
    let defaults = BoardConfig::default();
    let board = BoardConfig {
        cols: cli.cols.unwrap_or(defaults.cols),
        rows: cli.rows.unwrap_or(defaults.rows),
        cell_size: cli.cell_size.unwrap_or(defaults.cell_size),
        show_coords: cli.show_coords,
        ..defaults
    };
    let controls = ControlsConfig {
        initial_i: cli.i,
        initial_j: cli.j,
    };
    (board, controls)
}

#[cfg(not(feature = "native"))]
fn configs() -> (BoardConfig, ControlsConfig) {
    (BoardConfig::default(), ControlsConfig::default())
}

fn main() {
    let (board, controls) = configs();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Frequency Reuse & Capacity".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<AppMode>()
    .init_state::<AppMode>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(BoardPlugin(board))
    .add_plugins(ControlsPlugin(controls))
    .add_systems(Update, hotkeys)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(AppMode::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

/// F1 shows or hides the world inspector, Escape quits.
fn hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    mode: Res<State<AppMode>>,
    mut next_mode: ResMut<NextState<AppMode>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    } else if keys.just_pressed(KeyCode::F1) {
        let mode = mode.get().toggled();
        info!("Inspector mode: {mode:?}");
        next_mode.set(mode);
    }
}
