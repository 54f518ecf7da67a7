use bevy::asset::RenderAssetUsages;
use bevy::camera::ScalingMode;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContext, PrimaryEguiContext, egui};

use super::BoardConfig;
use super::entities::{BoardCamera, BoardFrame, HexTile, PointerOverUi};
use crate::lattice::{HexLattice, hex_vertices};
use crate::session::{ReuseSession, SessionPhase};

/// Extra horizontal room left of the board, as a fraction of its width,
/// so the control panel does not cover the first columns.
const PANEL_MARGIN: f32 = 0.25;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the board camera and one [`HexTile`] per lattice cell.
pub fn spawn_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    lattice: Res<HexLattice>,
    frame: Res<BoardFrame>,
    cfg: Res<BoardConfig>,
) {
    let extent = frame.extent();
    commands.spawn((
        Name::new("BoardCamera"),
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: extent.x * (1.0 + PANEL_MARGIN),
                min_height: extent.y,
            },
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(-extent.x * PANEL_MARGIN / 2.0, 0.0, 0.0),
        BoardCamera,
    ));

    let mesh_handle = meshes.add(hex_mesh(lattice.size()));

    let board_entity = commands
        .spawn((
            Name::new("Board"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for cell in lattice.cells() {
        let pos = frame.to_world(cell.center);
        // Each tile gets its own material so fills can change per cell
        let tile = commands
            .spawn((
                HexTile { coord: cell.coord },
                Name::new(format!("HexTile({})", cell.coord)),
                Mesh2d(mesh_handle.clone()),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(cfg.background))),
                Transform::from_xyz(pos.x, pos.y, 0.0),
            ))
            .id();
        commands.entity(board_entity).add_child(tile);
    }

    info!(
        "Board ready: {} x {} cells of size {}",
        lattice.cols(),
        lattice.rows(),
        lattice.size()
    );
}

/// Triangle fan over a hex outline, centred on the origin, in world space.
fn hex_mesh(size: f32) -> Mesh {
    // Pixel space is y-down: flip, then reverse so the fan winds counter-clockwise.
    let mut positions: Vec<[f32; 3]> = vec![[0.0, 0.0, 0.0]];
    positions.extend(
        hex_vertices(Vec2::ZERO, size)
            .iter()
            .rev()
            .map(|v| [v.x, -v.y, 0.0]),
    );
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [p[0] / (2.0 * size) + 0.5, 0.5 - p[1] / (2.0 * size)])
        .collect();
    let indices: Vec<u16> = (1..=6u16).flat_map(|k| [0, k, k % 6 + 1]).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U16(indices))
}

// ── Update ──────────────────────────────────────────────────────────

/// Forwards a left click on the board to [`ReuseSession::select_cell`].
pub fn pick_cell(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<BoardCamera>>,
    lattice: Res<HexLattice>,
    frame: Res<BoardFrame>,
    over_ui: Res<PointerOverUi>,
    mut session: ResMut<ReuseSession>,
) {
    if !buttons.just_pressed(MouseButton::Left) || over_ui.0 {
        return;
    }
    if session.phase() != SessionPhase::Selecting {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(cam_gt, cursor) else {
        return;
    };
    session.select_cell(frame.to_pixel(world), &lattice);
}

/// Repaints every tile from the session's coloring.
pub fn paint_cells(
    session: Res<ReuseSession>,
    cfg: Res<BoardConfig>,
    tiles: Query<(&HexTile, &MeshMaterial2d<ColorMaterial>)>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let coloring = session.coloring();
    for (tile, mat_handle) in &tiles {
        let color = coloring
            .get(&tile.coord)
            .map_or(cfg.background, |&ch| cfg.channel_color(ch));
        if let Some(mat) = materials.get_mut(&mat_handle.0) {
            mat.color = color;
        }
    }
}

/// Outlines every cell with a closed line strip.
pub fn draw_outlines(
    mut gizmos: Gizmos,
    lattice: Res<HexLattice>,
    frame: Res<BoardFrame>,
    cfg: Res<BoardConfig>,
) {
    for cell in lattice.cells() {
        let outline = lattice.vertices(cell);
        gizmos.linestrip_2d(
            outline
                .iter()
                .chain(std::iter::once(&outline[0]))
                .map(|&v| frame.to_world(v)),
            cfg.outline,
        );
    }
}

/// Writes each cell's lattice tag at its center.
pub fn draw_coord_labels(
    mut egui_ctx: Query<&mut EguiContext, With<PrimaryEguiContext>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<BoardCamera>>,
    lattice: Res<HexLattice>,
    frame: Res<BoardFrame>,
) {
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    for cell in lattice.cells() {
        let world = frame.to_world(cell.center).extend(0.0);
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, world) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                cell.coord.to_string(),
                egui::FontId::proportional(10.0),
                egui::Color32::DARK_GRAY,
            );
        }
    }
}
