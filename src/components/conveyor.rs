//! Powered transport surface.
//!
//! A [`ConveyorBelt`] lives on an entity that also carries a
//! [`Surface`](super::surface::Surface) and [`Contacts`](super::surface::Contacts).
//! Every tick [`crate::systems::conveyor::conveyor_system`] drags the resting
//! bodies toward the belt's target velocity.
//!
//! # Drive models
//!
//! - [`BeltDrive::VelocityMatch`] (default): spin is blended toward zero, then
//!   the horizontal velocity error against `direction * target_speed` is
//!   corrected with an acceleration of `error * acceleration`, plus a term
//!   that cancels the body's own horizontal linear damping. Bodies converge
//!   to the belt speed whatever their damping, and never overshoot for
//!   `acceleration * dt < 1`.
//! - [`BeltDrive::ConstantAcceleration`]: a fixed horizontal acceleration of
//!   `belt_force` along the belt direction, with no speed limit beyond the
//!   body's own damping.
//!
//! The vertical component of the applied acceleration is zero in both modes.

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::components::pose::Pose;

pub const DEFAULT_TARGET_SPEED: f32 = 0.6;
pub const DEFAULT_ACCELERATION: f32 = 8.0;
pub const DEFAULT_ANGULAR_BLEND: f32 = 10.0;
pub const DEFAULT_BELT_FORCE: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BeltDrive {
    #[default]
    VelocityMatch,
    ConstantAcceleration,
}

impl BeltDrive {
    /// Parse the `drive` config value. Unknown strings yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "velocity_match" | "velocity" => Some(BeltDrive::VelocityMatch),
            "constant" | "constant_force" => Some(BeltDrive::ConstantAcceleration),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BeltDrive::VelocityMatch => "velocity_match",
            BeltDrive::ConstantAcceleration => "constant",
        }
    }
}

#[derive(Component, Clone, Debug)]
pub struct ConveyorBelt {
    /// Transport direction in the belt's local frame.
    pub local_direction: Vec3,
    /// Speed bodies are driven toward, in world units per second.
    pub target_speed: f32,
    /// Gain applied to the velocity error.
    pub acceleration: f32,
    /// Rate at which angular velocity is blended toward zero, per second.
    pub angular_blend: f32,
    /// Acceleration applied by the constant drive.
    pub belt_force: f32,
    pub drive: BeltDrive,
    active: bool,
}

impl Default for ConveyorBelt {
    fn default() -> Self {
        Self::new()
    }
}

impl ConveyorBelt {
    /// A stopped velocity-matching belt running along local `+Z`.
    pub fn new() -> Self {
        Self {
            local_direction: Vec3::Z,
            target_speed: DEFAULT_TARGET_SPEED,
            acceleration: DEFAULT_ACCELERATION,
            angular_blend: DEFAULT_ANGULAR_BLEND,
            belt_force: DEFAULT_BELT_FORCE,
            drive: BeltDrive::VelocityMatch,
            active: false,
        }
    }

    pub fn with_direction(mut self, local_direction: Vec3) -> Self {
        self.local_direction = local_direction;
        self
    }

    pub fn with_drive(mut self, drive: BeltDrive) -> Self {
        self.drive = drive;
        self
    }

    /// Enable the drive. Idempotent.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Disable the drive. Idempotent; moving bodies keep their velocity.
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Unit transport direction in world space, flattened onto the horizontal
    /// plane. Zero if the belt direction is vertical.
    pub fn world_direction(&self, pose: &Pose) -> Vec3 {
        let mut dir = pose.transform_direction(self.local_direction);
        dir.y = 0.0;
        dir.normalize_or_zero()
    }

    /// Acceleration this belt applies to a resting body moving at `velocity`
    /// with the given linear damping.
    pub fn acceleration_for(&self, pose: &Pose, velocity: Vec3, linear_damping: f32) -> Vec3 {
        let direction = self.world_direction(pose);
        match self.drive {
            BeltDrive::VelocityMatch => {
                velocity_matching_acceleration(
                    velocity,
                    direction,
                    self.target_speed,
                    self.acceleration,
                ) + damping_compensation(velocity, linear_damping)
            }
            BeltDrive::ConstantAcceleration => direction * self.belt_force,
        }
    }
}

/// Acceleration that offsets the horizontal velocity lost to linear damping.
///
/// With it, the steady state of velocity matching is exactly the target
/// speed instead of `target * gain / (gain + damping)`.
pub fn damping_compensation(velocity: Vec3, linear_damping: f32) -> Vec3 {
    Vec3::new(velocity.x, 0.0, velocity.z) * linear_damping.max(0.0)
}

/// Corrective acceleration that drives the horizontal part of `velocity`
/// toward `direction * target_speed`.
///
/// `direction` must already be horizontal; the vertical error is discarded so
/// gravity and support are never fought.
pub fn velocity_matching_acceleration(
    velocity: Vec3,
    direction: Vec3,
    target_speed: f32,
    gain: f32,
) -> Vec3 {
    let mut error = direction * target_speed - velocity;
    error.y = 0.0;
    error * gain
}

/// Blend angular velocity toward zero by `rate * dt` (clamped to a full stop).
pub fn damp_spin(angular_velocity: Vec3, rate: f32, dt: f32) -> Vec3 {
    angular_velocity.lerp(Vec3::ZERO, (rate * dt).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    const EPSILON: f32 = 1e-5;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn new_belt_is_stopped() {
        let belt = ConveyorBelt::new();
        assert!(!belt.is_active());
    }

    #[test]
    fn start_stop_are_idempotent() {
        let mut belt = ConveyorBelt::new();
        belt.start();
        belt.start();
        assert!(belt.is_active());
        belt.stop();
        belt.stop();
        assert!(!belt.is_active());
    }

    #[test]
    fn world_direction_follows_rotation_and_drops_vertical() {
        let belt = ConveyorBelt::new();
        let pose = Pose::default().with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(vec_approx_eq(belt.world_direction(&pose), Vec3::X));

        let tilted = ConveyorBelt::new().with_direction(Vec3::new(0.0, 1.0, 1.0));
        let dir = tilted.world_direction(&Pose::default());
        assert!(vec_approx_eq(dir, Vec3::Z));
    }

    #[test]
    fn velocity_match_has_zero_vertical_component() {
        let accel = velocity_matching_acceleration(Vec3::new(0.3, -4.0, 0.1), Vec3::Z, 0.6, 8.0);
        assert_eq!(accel.y, 0.0);
        assert!(vec_approx_eq(accel, Vec3::new(-2.4, 0.0, 4.0)));
    }

    #[test]
    fn velocity_match_is_zero_at_target_speed() {
        let accel = velocity_matching_acceleration(Vec3::new(0.0, 1.0, 0.6), Vec3::Z, 0.6, 8.0);
        assert!(vec_approx_eq(accel, Vec3::ZERO));
    }

    #[test]
    fn constant_drive_ignores_velocity() {
        let belt = ConveyorBelt::new().with_drive(BeltDrive::ConstantAcceleration);
        let a = belt.acceleration_for(&Pose::default(), Vec3::new(0.0, 0.0, 50.0), 5.0);
        assert!(vec_approx_eq(a, Vec3::new(0.0, 0.0, DEFAULT_BELT_FORCE)));
    }

    #[test]
    fn damping_compensation_is_horizontal() {
        let c = damping_compensation(Vec3::new(0.2, -3.0, 0.6), 5.0);
        assert!(vec_approx_eq(c, Vec3::new(1.0, 0.0, 3.0)));
        assert!(vec_approx_eq(damping_compensation(Vec3::ONE, -1.0), Vec3::ZERO));
    }

    #[test]
    fn velocity_match_at_target_only_offsets_damping() {
        let belt = ConveyorBelt::new();
        let a = belt.acceleration_for(&Pose::default(), Vec3::new(0.0, 0.0, 0.6), 5.0);
        assert!(vec_approx_eq(a, Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn damp_spin_blends_toward_zero() {
        let w = damp_spin(Vec3::new(10.0, 0.0, 0.0), 10.0, 0.05);
        assert!(vec_approx_eq(w, Vec3::new(5.0, 0.0, 0.0)));
        assert!(vec_approx_eq(damp_spin(w, 10.0, 1.0), Vec3::ZERO));
    }

    #[test]
    fn drive_parse() {
        assert_eq!(BeltDrive::parse("Velocity_Match"), Some(BeltDrive::VelocityMatch));
        assert_eq!(BeltDrive::parse(" constant "), Some(BeltDrive::ConstantAcceleration));
        assert_eq!(BeltDrive::parse("warp"), None);
    }
}
