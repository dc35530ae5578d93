//! TTL (Time-to-live) system.
//!
//! Counts down every [`Ttl`](crate::components::ttl::Ttl) and despawns the
//! entity once it runs out. Correctly sorted bodies get their `Ttl` from the
//! receptacle system.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::sortable::Label;
use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl, Option<&Label>)>,
    mut commands: Commands,
) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for (entity, mut ttl, label) in query.iter_mut() {
        if ttl.tick(dt) {
            debug!(
                "TTL expired for {:?} ({})",
                entity,
                label.map_or("unnamed", Label::as_str)
            );
            commands.entity(entity).try_despawn();
        }
    }
}
