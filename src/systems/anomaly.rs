//! Anomaly approach playback.
//!
//! Moves every anomaly with a running approach and triggers
//! [`PhaseSignal::ApproachComplete`] on the tick it arrives. The phase
//! controller ignores the signal outside the anomaly phase.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::anomaly::AnomalyApproach;
use crate::components::pose::Pose;
use crate::events::phase::PhaseSignal;
use crate::resources::worldtime::WorldTime;

pub fn anomaly_approach_system(
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut AnomalyApproach, &mut Pose)>,
    mut commands: Commands,
) {
    for (entity, mut approach, mut pose) in query.iter_mut() {
        if !approach.is_moving() {
            continue;
        }
        if approach.tick(time.delta, &mut pose) {
            info!("Anomaly {:?} reached the viewpoint", entity);
            commands.trigger(PhaseSignal::ApproachComplete);
        }
    }
}
