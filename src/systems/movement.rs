//! Rigid body integration.
//!
//! Semi-implicit Euler: forces update velocity, damping scales it, velocity
//! moves the pose. Frozen bodies (held by a hand) are skipped entirely.

use bevy_ecs::prelude::*;
use glam::Quat;

use crate::components::pose::Pose;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

/// Velocity multiplier for `damping` over `dt` seconds.
pub fn damping_factor(damping: f32, dt: f32) -> f32 {
    1.0 / (1.0 + damping.max(0.0) * dt)
}

pub fn movement_system(mut query: Query<(&mut Pose, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    for (mut pose, mut rb) in query.iter_mut() {
        if rb.frozen {
            continue;
        }
        let acceleration = rb.total_acceleration();
        rb.apply_acceleration(acceleration, dt);

        let linear = damping_factor(rb.linear_damping, dt);
        let angular = damping_factor(rb.angular_damping, dt);
        rb.velocity *= linear;
        rb.angular_velocity *= angular;

        pose.position += rb.velocity * dt;
        if rb.angular_velocity.length_squared() > 0.0 {
            let spin = Quat::from_scaled_axis(rb.angular_velocity * dt);
            pose.rotation = (spin * pose.rotation).normalize();
        }
    }
}
