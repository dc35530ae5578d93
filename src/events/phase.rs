//! Phase signals and the phase change notification.
//!
//! Every transition of the scenario [`Phase`] is requested by triggering a
//! [`PhaseSignal`]. The observer in
//! [`systems::phase`](crate::systems::phase::observe_phase_signal) resolves the
//! signal against the current phase and, when it is legal, applies the
//! transition and triggers a [`PhaseChangeEvent`].
//!
//! ```ignore
//! fn on_phase_change(trigger: On<PhaseChangeEvent>) {
//!     let change = trigger.event();
//!     println!("{:?} -> {:?}", change.previous, change.current);
//! }
//!
//! world.add_observer(on_phase_change);
//! ```

use bevy_ecs::prelude::*;

use crate::resources::phase::Phase;

/// Request for a phase transition.
///
/// Signals that are not legal in the current phase are ignored.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSignal {
    /// Start the run. Only honoured once.
    Begin,
    /// The anomaly body was picked up.
    AnomalyActivated,
    /// The anomaly approach reached the viewpoint.
    ApproachComplete,
    /// External forced cleanup.
    CleanupRequested,
}

/// Emitted after a transition has been applied and the new phase entered.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChangeEvent {
    /// `None` for the initial entry into [`Phase::Working`].
    pub previous: Option<Phase>,
    pub current: Phase,
}
