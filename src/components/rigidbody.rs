//! Simple 3D body with named acceleration forces.
//!
//! The [`RigidBody`] component stores linear and angular velocity, mass and
//! damping for an entity, plus any number of named acceleration forces that
//! can be toggled independently (gravity is just one of them).
//!
//! This is not a rigid-body solver. Systems only integrate velocities and
//! apply corrective accelerations; resting contact is handled by
//! [`crate::systems::support`].
//!
//! The `frozen` flag disables all integration, used while a body is held by
//! the participant or while the anomaly body is driven by its approach.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Standard gravity in world units per second squared.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec3,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Kinematic body storing velocity, mass, damping and named forces.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_mass(0.5).with_damping(5.0, 5.0);
/// rb.add_force("gravity", GRAVITY);
/// rb.apply_impulse(Vec3::new(0.0, -0.1, 0.0));
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Linear velocity in world units per second.
    pub velocity: Vec3,
    /// Angular velocity in radians per second (axis * rate).
    pub angular_velocity: Vec3,
    /// Mass in kilograms. Always positive.
    pub mass: f32,
    /// Linear damping. Applied as: velocity *= 1 / (1 + damping * delta).
    pub linear_damping: f32,
    /// Angular damping, same form as `linear_damping`.
    pub angular_damping: f32,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// When true, movement skips all physics calculations for this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a 1 kg body at rest with no damping and no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            forces: FxHashMap::default(),
            frozen: false,
        }
    }

    /// Create a body with the given mass. Non-positive masses are clamped to a
    /// small positive value so impulses stay finite.
    pub fn with_mass(mass: f32) -> Self {
        Self {
            mass: mass.max(1e-3),
            ..Self::new()
        }
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear.max(0.0);
        self.angular_damping = angular.max(0.0);
        self
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec3) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Check if a force exists and is enabled.
    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec3 {
        self.forces
            .values()
            .filter(|f| f.enabled)
            .fold(Vec3::ZERO, |acc, f| acc + f.value)
    }

    /// Apply an instantaneous impulse (change in momentum).
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }

    /// Apply an acceleration for `dt` seconds, independent of mass.
    pub fn apply_acceleration(&mut self, acceleration: Vec3, dt: f32) {
        self.velocity += acceleration * dt;
    }

    /// Freeze the body, preventing the movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the body, allowing the movement system to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
