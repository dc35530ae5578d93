//! Anomaly components.
//!
//! - [`AnomalyTrigger`] – one of the burst bodies produced after the spawn
//!   threshold; grabbing it ends the working phase (once).
//! - [`AnomalyApproach`] – the distinguished anomaly body and its approach
//!   sequence toward the participant.
//!
//! # Approach lifecycle
//!
//! ```text
//!   reset() ──► Idle (hidden, intangible, grab disabled, initial pose)
//!   reveal() ─► Idle (visible, still intangible, initial pose)
//!   begin_approach() ─► Moving ──tick()──► Arrived   (tick returns true once)
//! ```
//!
//! `begin_approach` always cancels a running approach first. Without a
//! viewpoint it leaves the sequencer idle and nothing ever completes.

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::components::grab::Grabbable;
use crate::components::pose::{Pose, look_rotation};
use crate::components::presence::Presence;
use crate::components::tween::{Easing, Tween};
use crate::resources::viewpoint::Viewpoint;

pub const DEFAULT_TRAVEL_DURATION: f32 = 5.0;
pub const DEFAULT_STOP_DISTANCE: f32 = 0.2;

/// Burst body whose first grab activates the anomaly phase.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct AnomalyTrigger {
    triggered: bool,
}

impl AnomalyTrigger {
    /// Latch the trigger. Returns `true` only the first time.
    pub fn try_trigger(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ApproachState {
    Idle,
    Moving { from: Pose, to: Pose, tween: Tween },
    Arrived,
}

#[derive(Component, Clone, Debug)]
pub struct AnomalyApproach {
    initial_pose: Pose,
    pub travel_duration: f32,
    pub stop_distance: f32,
    state: ApproachState,
}

impl AnomalyApproach {
    pub fn new(initial_pose: Pose) -> Self {
        Self {
            initial_pose,
            travel_duration: DEFAULT_TRAVEL_DURATION,
            stop_distance: DEFAULT_STOP_DISTANCE,
            state: ApproachState::Idle,
        }
    }

    pub fn with_travel(mut self, duration: f32, stop_distance: f32) -> Self {
        self.travel_duration = duration;
        self.stop_distance = stop_distance;
        self
    }

    pub fn state(&self) -> &ApproachState {
        &self.state
    }

    pub fn initial_pose(&self) -> Pose {
        self.initial_pose
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, ApproachState::Moving { .. })
    }

    /// Stop any approach in progress without touching the body.
    pub fn cancel(&mut self) {
        self.state = ApproachState::Idle;
    }

    /// Hide the body, put it back on its cached pose and make it
    /// non-interactive.
    pub fn reset(&mut self, pose: &mut Pose, presence: &mut Presence, grab: &mut Grabbable) {
        self.cancel();
        *pose = self.initial_pose;
        *presence = Presence::hidden();
        *grab = Grabbable::disabled();
    }

    /// Show the body on its cached pose. It stays intangible and ungrabbable.
    pub fn reveal(&mut self, pose: &mut Pose, presence: &mut Presence, grab: &mut Grabbable) {
        *pose = self.initial_pose;
        presence.visible = true;
        presence.tangible = false;
        *grab = Grabbable::disabled();
    }

    /// Start moving from `current` to just in front of `viewpoint`.
    ///
    /// Returns `false` (and stays idle) when there is no viewpoint.
    pub fn begin_approach(&mut self, current: Pose, viewpoint: Option<&Viewpoint>) -> bool {
        self.cancel();
        let Some(view) = viewpoint else {
            return false;
        };
        let forward = view.forward_dir();
        let to = Pose {
            position: view.position + forward * self.stop_distance,
            rotation: look_rotation(forward, Vec3::Y),
        };
        self.state = ApproachState::Moving {
            from: current,
            to,
            tween: Tween::new(self.travel_duration).with_easing(Easing::SmoothStep),
        };
        true
    }

    /// Advance the approach and write the interpolated pose.
    ///
    /// Returns `true` on the single tick the approach completes.
    pub fn tick(&mut self, dt: f32, pose: &mut Pose) -> bool {
        let (finished, from, to, t) = match &mut self.state {
            ApproachState::Moving { from, to, tween } => {
                let finished = tween.advance(dt);
                (finished, *from, *to, tween.progress())
            }
            _ => return false,
        };
        pose.position = from.position.lerp(to.position, t);
        pose.rotation = from.rotation.slerp(to.rotation, t);
        if finished {
            pose.position = to.position;
            self.state = ApproachState::Arrived;
        }
        finished
    }
}
