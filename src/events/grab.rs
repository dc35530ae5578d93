//! Interaction events from the participant's hands.

use bevy_ecs::prelude::*;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrabAction {
    /// Hand closed on the body.
    Select,
    /// Held body moved to a new position.
    Carry { position: Vec3 },
    /// Hand opened; the body leaves with `velocity`.
    Release { velocity: Vec3 },
}

/// Triggered by the interaction layer for a grabbable entity.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GrabEvent {
    pub entity: Entity,
    pub action: GrabAction,
}

impl GrabEvent {
    pub fn select(entity: Entity) -> Self {
        Self {
            entity,
            action: GrabAction::Select,
        }
    }

    pub fn carry(entity: Entity, position: Vec3) -> Self {
        Self {
            entity,
            action: GrabAction::Carry { position },
        }
    }

    pub fn release(entity: Entity, velocity: Vec3) -> Self {
        Self {
            entity,
            action: GrabAction::Release { velocity },
        }
    }
}
