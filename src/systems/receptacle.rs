//! Receptacle entry detection and sorting.
//!
//! For every [`Receptacle`] the system collects the tangible rigid bodies
//! overlapping its trigger box, then classifies only the ones that were not
//! inside on the previous tick:
//!
//! - same category as the target: one correct sort, positive cue, and the
//!   body is despawned [`CORRECT_SORT_DESPAWN_DELAY`] seconds later;
//! - other category: one error, negative cue, and the body is permanently
//!   recoloured with [`Tint::REJECTED`] and marked [`Rejected`]. It is never
//!   despawned and never classified again.
//!
//! Bodies without [`Sortable`] are ignored, as are bodies already scheduled
//! for removal.

use bevy_ecs::prelude::*;
use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::components::boxcollider::BoxCollider;
use crate::components::pose::Pose;
use crate::components::presence::Presence;
use crate::components::receptacle::{Receptacle, SortOutcome};
use crate::components::rigidbody::RigidBody;
use crate::components::sortable::{Label, Rejected, Sortable};
use crate::components::tint::Tint;
use crate::components::ttl::{CORRECT_SORT_DESPAWN_DELAY, Ttl};
use crate::events::cue::CueCmd;
use crate::resources::scoreboard::ScoreBoard;

pub fn receptacle_trigger_system(
    mut commands: Commands,
    mut receptacles: Query<(Entity, &Pose, &BoxCollider, &mut Receptacle)>,
    bodies: Query<
        (Entity, &Pose, &BoxCollider, Option<&Presence>),
        (With<RigidBody>, Without<Receptacle>),
    >,
    sortables: Query<(&Sortable, Has<Ttl>, Has<Rejected>, Option<&Label>)>,
    mut tints: Query<&mut Tint>,
    mut score: Option<ResMut<ScoreBoard>>,
    mut cues: MessageWriter<CueCmd>,
) {
    for (receptacle_entity, volume_pose, volume, mut receptacle) in receptacles.iter_mut() {
        let present: FxHashSet<Entity> = bodies
            .iter()
            .filter(|(_, _, _, presence)| presence.is_none_or(|p| p.tangible))
            .filter(|(_, pose, collider, _)| {
                volume.overlaps(volume_pose.position, collider, pose.position)
            })
            .map(|(entity, ..)| entity)
            .collect();
        receptacle.retain_present(&present);

        for body in present {
            if !receptacle.enter(body) {
                continue;
            }
            let Ok((sortable, expiring, rejected, label)) = sortables.get(body) else {
                debug!("Non-sortable {:?} entered {:?}", body, receptacle_entity);
                continue;
            };
            if expiring || rejected {
                continue;
            }
            let name = label.map_or("unnamed", Label::as_str);
            match receptacle.classify(sortable.category) {
                SortOutcome::Correct => {
                    let total = score.as_mut().map(|s| s.on_correct_sort());
                    info!("Correct sort: {} ({:?}) total={:?}", name, body, total);
                    cues.write(CueCmd::PositiveChime {
                        receptacle: receptacle_entity,
                        body,
                    });
                    commands
                        .entity(body)
                        .insert(Ttl::new(CORRECT_SORT_DESPAWN_DELAY));
                }
                SortOutcome::Wrong => {
                    let total = score.as_mut().map(|s| s.on_wrong_sort());
                    info!("Wrong sort: {} ({:?}) errors={:?}", name, body, total);
                    cues.write(CueCmd::NegativeBuzzer {
                        receptacle: receptacle_entity,
                        body,
                    });
                    match tints.get_mut(body) {
                        Ok(mut tint) => {
                            *tint = Tint::REJECTED;
                            commands.entity(body).insert(Rejected);
                        }
                        Err(_) => {
                            commands.entity(body).insert((Tint::REJECTED, Rejected));
                        }
                    }
                }
            }
        }
    }
}
