//! Time update.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick, before the schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance `WorldTime` by the unscaled tick delta `dt`.
///
/// Applies `time_scale`, then writes `elapsed`, `delta` and `frame_count`.
/// Negative deltas are treated as zero.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt.max(0.0) * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}
