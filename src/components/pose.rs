//! World-space pose (position and orientation) of a 3D entity.

use bevy_ecs::prelude::Component;
use glam::{Mat3, Quat, Vec3};

/// Position and rotation of an entity in world space.
///
/// The world is Y-up. Local "forward" is `+Z`, matching
/// [`look_rotation`].
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// The pose's local `+Z` axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// The pose's local `+Y` axis in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Transform a local direction into world space.
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }
}

/// Rotation whose `+Z` axis points along `forward`, keeping `+Y` as close to
/// `up` as possible.
///
/// Degenerate inputs (zero forward, or forward parallel to up) fall back to a
/// sensible basis instead of producing NaNs.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = up.cross(f).normalize_or_zero();
    if right == Vec3::ZERO {
        right = Vec3::X.cross(f).normalize_or_zero();
        if right == Vec3::ZERO {
            right = Vec3::Z.cross(f).normalize();
        }
    }
    let true_up = f.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, true_up, f)).normalize()
}
