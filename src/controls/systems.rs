use bevy::prelude::*;
use bevy_egui::{EguiContext, PrimaryEguiContext, egui};

use super::entities::{ControlsState, PanelAction};
use crate::board::PointerOverUi;
use crate::session::{ReuseSession, SessionPhase};

/// Left side panel: pattern entries, `N`, Start / Reset / End, status line.
pub fn controls_panel(
    mut egui_ctx: Query<&mut EguiContext, With<PrimaryEguiContext>>,
    mut state: ResMut<ControlsState>,
    mut session: ResMut<ReuseSession>,
    mut pointer: ResMut<PointerOverUi>,
) {
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let ctx = ctx.get_mut();
    let phase = session.phase();
    let mut action = None;

    egui::SidePanel::left("controls")
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Frequency reuse");
            ui.separator();

            // Entries are frozen while seeds are being picked
            let editable = phase != SessionPhase::Selecting;
            egui::Grid::new("pattern_inputs")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("i :");
                    ui.add_enabled(
                        editable,
                        egui::TextEdit::singleline(&mut state.i_text).desired_width(60.0),
                    );
                    ui.end_row();
                    ui.label("j :");
                    ui.add_enabled(
                        editable,
                        egui::TextEdit::singleline(&mut state.j_text).desired_width(60.0),
                    );
                    ui.end_row();
                });
            ui.label(format!("N : {}", session.cluster_size()));
            ui.add_space(8.0);

            if ui.button("Start").clicked() {
                action = Some(PanelAction::Start);
            }
            if ui.button("Reset").clicked() {
                action = Some(PanelAction::Reset);
            }
            if ui
                .add_enabled(phase == SessionPhase::Selecting, egui::Button::new("End"))
                .clicked()
            {
                action = Some(PanelAction::End);
            }
            ui.add_space(8.0);

            match phase {
                SessionPhase::Idle => ui.label("Enter i and j, then Start"),
                SessionPhase::Selecting => {
                    ui.label(format!("{} click(s) left", session.remaining_seeds()))
                }
                SessionPhase::Locked => ui.label(format!(
                    "{} seed(s) tiled, reuse distance {}",
                    session.selection().len(),
                    session.pattern().reuse_distance()
                )),
            };
            if let Some(status) = &state.status {
                ui.colored_label(egui::Color32::RED, status);
            }

            ui.separator();
            if ui.button("Capacity…").clicked() {
                state.capacity.open = true;
            }
        });

    if let Some(action) = action {
        state.apply(action, &mut session);
    }
    pointer.0 = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
}

/// Floating capacity calculator for the session's current `N`.
pub fn capacity_window(
    mut egui_ctx: Query<&mut EguiContext, With<PrimaryEguiContext>>,
    mut state: ResMut<ControlsState>,
    session: Res<ReuseSession>,
) {
    if !state.capacity.open {
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let form = &mut state.capacity;
    let mut open = true;
    let mut calculate = false;

    egui::Window::new("Capacity")
        .open(&mut open)
        .resizable(false)
        .show(ctx.get_mut(), |ui| {
            egui::Grid::new("capacity_inputs")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Total area:");
                    ui.text_edit_singleline(&mut form.total_area);
                    ui.end_row();
                    ui.label("Cell area:");
                    ui.text_edit_singleline(&mut form.cell_area);
                    ui.end_row();
                    ui.label("Channels:");
                    ui.text_edit_singleline(&mut form.channels);
                    ui.end_row();
                });
            ui.label(format!("N : {}", session.cluster_size()));
            if ui.button("Calculate").clicked() {
                calculate = true;
            }
            match &form.result {
                Some(Ok(report)) => {
                    ui.monospace(report.to_string());
                }
                Some(Err(err)) => {
                    ui.colored_label(egui::Color32::RED, err.to_string());
                }
                None => {}
            }
        });

    if calculate {
        form.calculate(session.pattern());
    }
    form.open = open;
}
