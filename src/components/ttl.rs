//! Delayed destruction component.
//!
//! [`Ttl`] counts down simulation time and despawns its entity when it runs
//! out. The sorting classifier inserts one on a correctly sorted body so the
//! body lingers for [`CORRECT_SORT_DESPAWN_DELAY`] seconds before vanishing,
//! long enough for the positive cue to register.
//!
//! # Related
//!
//! - [`crate::systems::ttl::ttl_system`] – system that updates and despawns entities

use bevy_ecs::prelude::Component;

/// Seconds a correctly sorted body survives inside its receptacle.
pub const CORRECT_SORT_DESPAWN_DELAY: f32 = 0.5;

/// Time-to-live component that automatically despawns entities after a duration.
///
/// The countdown respects [`WorldTime::time_scale`](crate::resources::worldtime::WorldTime)
/// and continues regardless of whether the body is frozen or held.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }

    /// Count down by `dt`. Returns `true` once the entity should go.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}
