//! Participant viewpoint.
//!
//! The approach sequence ends just in front of this point. When the resource
//! is absent the approach target is unresolvable and the approach does
//! nothing.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Viewpoint {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Viewpoint {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Normalised forward direction, `+Z` if unset.
    pub fn forward_dir(&self) -> Vec3 {
        let f = self.forward.normalize_or_zero();
        if f == Vec3::ZERO { Vec3::Z } else { f }
    }
}
