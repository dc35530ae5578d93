//! Static surfaces that bodies can rest on.
//!
//! A [`Surface`] is a box whose top face supports bodies (floor, belt, bin
//! bottoms). [`Contacts`] lists the bodies resting on it this tick and is
//! refilled by [`crate::systems::support::support_system`] before any force
//! that depends on contact is applied.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub half_extents: Vec3,
}

impl Surface {
    /// Create a surface from its full size.
    pub fn new(size: Vec3) -> Self {
        Self {
            half_extents: size.abs() * 0.5,
        }
    }

    /// Height of the supporting face for a surface centred at `position`.
    pub fn top(&self, position: Vec3) -> f32 {
        position.y + self.half_extents.y
    }

    /// Whether `point` lies over the surface footprint (XZ only).
    pub fn covers(&self, position: Vec3, point: Vec3) -> bool {
        (point.x - position.x).abs() <= self.half_extents.x
            && (point.z - position.z).abs() <= self.half_extents.z
    }
}

/// Bodies touching a surface during the current tick.
#[derive(Component, Clone, Debug, Default)]
pub struct Contacts {
    bodies: SmallVec<[Entity; 8]>,
}

impl Contacts {
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn push(&mut self, entity: Entity) {
        if !self.bodies.contains(&entity) {
            self.bodies.push(entity);
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.bodies.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.bodies.iter().copied()
    }
}
