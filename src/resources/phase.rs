//! Scenario phase controller.
//!
//! [`PhaseController`] is the single authority on the current [`Phase`]. It
//! only knows which transitions are legal; entering a phase (stopping the
//! belts, starting fades, requesting the next scene, ...) is done by the
//! systems in [`systems::phase`](crate::systems::phase).
//!
//! Legal transitions:
//!
//! | from          | signal             | to            |
//! |---------------|--------------------|---------------|
//! | (not started) | `Begin`            | Working       |
//! | Working       | `AnomalyActivated` | Anomaly       |
//! | Anomaly       | `ApproachComplete` | Transitioning |
//! | any but Cleared | `CleanupRequested` | Cleared     |
//!
//! Every other combination is ignored. `Transitioning` and `Cleared` are
//! terminal for this scene.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::events::phase::PhaseSignal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    #[default]
    Working,
    Anomaly,
    Transitioning,
    Cleared,
}

/// Progress inside the current phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum PhaseStage {
    /// `Begin` has not been signalled yet.
    #[default]
    NotStarted,
    Working,
    /// Glitch overlay fading in before the reveal.
    GlitchFade,
    /// Anomaly body moving toward the viewpoint.
    Approaching,
    /// Blackout fading in before the scene load.
    BlackoutFade,
    Loading,
    /// Next scene loaded; this scene is done.
    Handoff,
    /// A required collaborator is missing, nothing more will happen.
    Stalled,
    Cleared,
}

#[derive(Resource, Debug, Clone)]
pub struct PhaseController {
    current: Phase,
    previous: Option<Phase>,
    time_in_phase: f32,
    stage: PhaseStage,
    pub glitch_fade: f32,
    pub blackout_fade: f32,
    pub work_duration: Option<f32>,
    pub next_scene: String,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new("Scene 2")
    }
}

impl PhaseController {
    pub fn new(next_scene: impl Into<String>) -> Self {
        Self {
            current: Phase::Working,
            previous: None,
            time_in_phase: 0.0,
            stage: PhaseStage::NotStarted,
            glitch_fade: 2.0,
            blackout_fade: 0.75,
            work_duration: None,
            next_scene: next_scene.into(),
        }
    }

    pub fn with_fades(mut self, glitch: f32, blackout: f32) -> Self {
        self.glitch_fade = glitch;
        self.blackout_fade = blackout;
        self
    }

    pub fn with_work_duration(mut self, work_duration: Option<f32>) -> Self {
        self.work_duration = work_duration;
        self
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn previous(&self) -> Option<Phase> {
        self.previous
    }

    pub fn time_in_phase(&self) -> f32 {
        self.time_in_phase
    }

    pub fn stage(&self) -> PhaseStage {
        self.stage
    }

    pub fn set_stage(&mut self, stage: PhaseStage) {
        self.stage = stage;
    }

    pub fn is_started(&self) -> bool {
        self.stage != PhaseStage::NotStarted
    }

    /// The scene has nothing left to do.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.stage,
            PhaseStage::Handoff | PhaseStage::Stalled | PhaseStage::Cleared
        )
    }

    /// Phase that `signal` leads to from the current state, if legal.
    pub fn resolve(&self, signal: PhaseSignal) -> Option<Phase> {
        match (signal, self.current) {
            (PhaseSignal::Begin, _) if !self.is_started() => Some(Phase::Working),
            (PhaseSignal::AnomalyActivated, Phase::Working) if self.is_started() => {
                Some(Phase::Anomaly)
            }
            (PhaseSignal::ApproachComplete, Phase::Anomaly) => Some(Phase::Transitioning),
            (PhaseSignal::CleanupRequested, current) if current != Phase::Cleared => {
                Some(Phase::Cleared)
            }
            _ => None,
        }
    }

    /// Switch to `next` and reset the phase timer. Returns the phase left,
    /// or `None` for the initial entry.
    pub fn apply(&mut self, next: Phase) -> Option<Phase> {
        let left = self.is_started().then_some(self.current);
        if left.is_some() {
            self.previous = left;
        }
        self.current = next;
        self.time_in_phase = 0.0;
        left
    }

    pub fn advance(&mut self, dt: f32) {
        if self.is_started() {
            self.time_in_phase += dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> PhaseController {
        let mut c = PhaseController::default();
        let next = c.resolve(PhaseSignal::Begin).unwrap();
        c.apply(next);
        c.set_stage(PhaseStage::Working);
        c
    }

    #[test]
    fn begin_only_once() {
        let mut c = PhaseController::default();
        assert_eq!(c.resolve(PhaseSignal::Begin), Some(Phase::Working));
        assert_eq!(c.apply(Phase::Working), None);
        c.set_stage(PhaseStage::Working);
        assert_eq!(c.resolve(PhaseSignal::Begin), None);
    }

    #[test]
    fn nothing_but_begin_or_cleanup_before_start() {
        let c = PhaseController::default();
        assert_eq!(c.resolve(PhaseSignal::AnomalyActivated), None);
        assert_eq!(c.resolve(PhaseSignal::ApproachComplete), None);
        assert_eq!(c.resolve(PhaseSignal::CleanupRequested), Some(Phase::Cleared));
    }

    #[test]
    fn forward_chain() {
        let mut c = started();
        assert_eq!(c.resolve(PhaseSignal::ApproachComplete), None);
        let next = c.resolve(PhaseSignal::AnomalyActivated).unwrap();
        assert_eq!(next, Phase::Anomaly);
        assert_eq!(c.apply(next), Some(Phase::Working));
        assert_eq!(c.resolve(PhaseSignal::AnomalyActivated), None);
        assert_eq!(
            c.resolve(PhaseSignal::ApproachComplete),
            Some(Phase::Transitioning)
        );
        c.apply(Phase::Transitioning);
        assert_eq!(c.previous(), Some(Phase::Anomaly));
        assert_eq!(c.resolve(PhaseSignal::ApproachComplete), None);
        assert_eq!(c.resolve(PhaseSignal::AnomalyActivated), None);
    }

    #[test]
    fn cleanup_from_any_phase_except_cleared() {
        for phase in [Phase::Working, Phase::Anomaly, Phase::Transitioning] {
            let mut c = started();
            c.apply(phase);
            assert_eq!(c.resolve(PhaseSignal::CleanupRequested), Some(Phase::Cleared));
        }
        let mut c = started();
        c.apply(Phase::Cleared);
        for signal in [
            PhaseSignal::Begin,
            PhaseSignal::AnomalyActivated,
            PhaseSignal::ApproachComplete,
            PhaseSignal::CleanupRequested,
        ] {
            assert_eq!(c.resolve(signal), None);
        }
    }

    #[test]
    fn timer_resets_on_apply() {
        let mut c = started();
        c.advance(1.5);
        assert_eq!(c.time_in_phase(), 1.5);
        c.apply(Phase::Anomaly);
        assert_eq!(c.time_in_phase(), 0.0);
    }

    #[test]
    fn timer_idle_before_start() {
        let mut c = PhaseController::default();
        c.advance(3.0);
        assert_eq!(c.time_in_phase(), 0.0);
    }

    #[test]
    fn finished_stages() {
        let mut c = started();
        assert!(!c.is_finished());
        c.set_stage(PhaseStage::Handoff);
        assert!(c.is_finished());
        c.set_stage(PhaseStage::Stalled);
        assert!(c.is_finished());
    }
}
