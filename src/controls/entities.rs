use bevy::prelude::*;

use super::ControlsConfig;
use crate::capacity::{CapacityInputs, CapacityReport};
use crate::cluster::ReusePattern;
use crate::error::ToolError;
use crate::session::ReuseSession;

/// Button presses of the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Read `i`/`j`, recompute `N`, and start selecting seeds.
    Start,
    /// Clear everything and return to idle.
    Reset,
    /// Tile the seeds and lock the board.
    End,
}

/// Text entries and messages of the side panel.
#[derive(Resource, Debug, Clone, Default)]
pub struct ControlsState {
    /// Raw `i` entry.
    pub i_text: String,
    /// Raw `j` entry.
    pub j_text: String,
    /// Last validation failure, cleared by the next successful action.
    pub status: Option<String>,
    /// The capacity window.
    pub capacity: CapacityForm,
}

impl ControlsState {
    /// Entries pre-filled from `cfg`.
    pub fn from_config(cfg: &ControlsConfig) -> Self {
        let text = |v: Option<u32>| v.map(|v| v.to_string()).unwrap_or_default();
        Self {
            i_text: text(cfg.initial_i),
            j_text: text(cfg.initial_j),
            ..default()
        }
    }

    /// Applies a button press to `session`.
    ///
    /// Invalid entries leave the session untouched and set [`Self::status`].
    pub fn apply(&mut self, action: PanelAction, session: &mut ReuseSession) {
        match action {
            PanelAction::Start => {
                let pattern = match ReusePattern::from_inputs(&self.i_text, &self.j_text) {
                    Ok(p) => p,
                    Err(err) => return self.fail(err),
                };
                session.reset();
                if let Err(err) = session.set_reuse_pattern(pattern) {
                    return self.fail(err);
                }
                session.start();
                self.status = None;
            }
            PanelAction::Reset => {
                session.reset();
                self.status = None;
            }
            PanelAction::End => {
                session.compute_clusters();
            }
        }
    }

    fn fail(&mut self, err: ToolError) {
        warn!("Rejected input: {err}");
        self.status = Some(err.to_string());
    }
}

/// Entries and last result of the capacity window.
#[derive(Debug, Clone, Default)]
pub struct CapacityForm {
    /// Whether the window is shown.
    pub open: bool,
    /// Raw total area entry.
    pub total_area: String,
    /// Raw cell area entry.
    pub cell_area: String,
    /// Raw channel count entry.
    pub channels: String,
    /// Outcome of the last calculation.
    pub result: Option<Result<CapacityReport, ToolError>>,
}

impl CapacityForm {
    /// Computes the report for the session's current pattern.
    pub fn calculate(&mut self, pattern: ReusePattern) {
        let result = CapacityInputs::from_inputs(&self.total_area, &self.cell_area, &self.channels)
            .and_then(|inputs| CapacityReport::new(pattern, inputs));
        match &result {
            Ok(report) => info!("{} (N={})", report.headline(), report.cluster_size),
            Err(err) => warn!("Capacity calculation failed: {err}"),
        }
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionPhase;

    fn state(i: &str, j: &str) -> ControlsState {
        ControlsState {
            i_text: i.into(),
            j_text: j.into(),
            ..default()
        }
    }

    // ── panel actions ───────────────────────────────────────────────

    #[test]
    fn prefilled_entries() {
        let s = ControlsState::from_config(&ControlsConfig {
            initial_i: Some(2),
            initial_j: None,
        });
        assert_eq!((s.i_text.as_str(), s.j_text.as_str()), ("2", ""));
    }

    #[test]
    fn start_reads_pattern_and_selects() {
        let mut session = ReuseSession::default();
        let mut s = state("2", "1");
        s.apply(PanelAction::Start, &mut session);
        assert_eq!(session.phase(), SessionPhase::Selecting);
        assert_eq!(session.cluster_size(), 7);
        assert!(s.status.is_none());
    }

    #[test]
    fn invalid_start_commits_nothing() {
        let mut session = ReuseSession::default();
        let mut s = state("x", "1");
        s.apply(PanelAction::Start, &mut session);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.cluster_size(), 0);
        assert!(s.status.as_deref().unwrap().contains("'x'"));
    }

    #[test]
    fn restart_while_selecting_picks_up_new_entries() {
        let mut session = ReuseSession::default();
        let mut s = state("1", "1");
        s.apply(PanelAction::Start, &mut session);
        s.j_text = "2".into();
        s.apply(PanelAction::Start, &mut session);
        assert_eq!(session.cluster_size(), 7);
        assert_eq!(session.phase(), SessionPhase::Selecting);
    }

    #[test]
    fn end_then_reset() {
        let mut session = ReuseSession::default();
        let mut s = state("1", "0");
        s.apply(PanelAction::Start, &mut session);
        s.apply(PanelAction::End, &mut session);
        assert_eq!(session.phase(), SessionPhase::Locked);
        s.status = Some("stale".into());
        s.apply(PanelAction::Reset, &mut session);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(s.status.is_none());
    }

    // ── capacity form ───────────────────────────────────────────────

    #[test]
    fn capacity_form_reports_result() {
        let mut form = CapacityForm {
            total_area: "100".into(),
            cell_area: "4".into(),
            channels: "21".into(),
            ..default()
        };
        form.calculate(ReusePattern::new(2, 1).unwrap());
        let report = form.result.unwrap().unwrap();
        assert_eq!(report.headline(), "Capacity: 75.00");
    }

    #[test]
    fn capacity_form_without_pattern_is_division_by_zero() {
        let mut form = CapacityForm {
            total_area: "100".into(),
            cell_area: "4".into(),
            channels: "21".into(),
            ..default()
        };
        form.calculate(ReusePattern::default());
        assert!(matches!(
            form.result,
            Some(Err(ToolError::DivisionByZero { .. }))
        ));
    }
}
