//! Scripted stand-in for the participant.
//!
//! Picks bodies off the end of the belt and drops them into a receptacle:
//! usually the matching one, sometimes (with `mistake_rate`) the other. When
//! `activate_anomaly` is set, the first anomaly burst body that reaches the
//! end of the belt is picked up, which starts the anomaly phase.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::Vec3;
use log::debug;
use rustc_hash::FxHashSet;

use crate::components::anomaly::AnomalyTrigger;
use crate::components::grab::Grabbable;
use crate::components::pose::Pose;
use crate::components::sortable::{Category, Sortable};
use crate::events::grab::GrabEvent;
use crate::resources::phase::Phase;
use crate::scenario::{Scenario, layout};

/// Bodies past this z are within reach.
pub const REACH_Z: f32 = 0.5;

#[derive(Debug)]
pub struct ScriptedParticipant {
    pub mistake_rate: f32,
    pub activate_anomaly: bool,
    handled: FxHashSet<Entity>,
    rng: Rng,
}

enum Pick {
    Sort(Entity, Category),
    Activate(Entity),
}

impl ScriptedParticipant {
    pub fn new(mistake_rate: f32, activate_anomaly: bool, seed: Option<u64>) -> Self {
        Self {
            mistake_rate: mistake_rate.clamp(0.0, 1.0),
            activate_anomaly,
            handled: FxHashSet::default(),
            rng: seed.map(Rng::with_seed).unwrap_or_default(),
        }
    }

    /// Look at the belt and act on at most one body.
    pub fn act(&mut self, scenario: &mut Scenario) {
        if scenario.phase() != Phase::Working {
            return;
        }
        let Some(pick) = self.pick(scenario.world_mut()) else {
            return;
        };
        match pick {
            Pick::Sort(entity, category) => {
                let target = if self.rng.f32() < self.mistake_rate {
                    other(category)
                } else {
                    category
                };
                let receptacle = scenario.fixtures().receptacle_for(target);
                let Some(drop_at) = scenario.world().get::<Pose>(receptacle).map(|p| p.position)
                else {
                    return;
                };
                debug!("Sorting {:?} ({:?}) into {:?}", entity, category, target);
                scenario.grab(GrabEvent::select(entity));
                scenario.grab(GrabEvent::carry(entity, drop_at));
                scenario.grab(GrabEvent::release(entity, Vec3::ZERO));
            }
            Pick::Activate(entity) => {
                debug!("Picking up anomaly body {:?}", entity);
                scenario.grab(GrabEvent::select(entity));
            }
        }
    }

    fn pick(&mut self, world: &mut World) -> Option<Pick> {
        let belt_top = layout::BELT_CENTER.y;
        let mut query = world.query::<(
            Entity,
            &Pose,
            &Grabbable,
            Option<&Sortable>,
            Option<&AnomalyTrigger>,
        )>();
        let mut found = None;
        for (entity, pose, grab, sortable, anomaly) in query.iter(world) {
            if self.handled.contains(&entity) || !grab.enabled || grab.held {
                continue;
            }
            if pose.position.z > REACH_Z || pose.position.y < belt_top {
                continue;
            }
            found = match (sortable, anomaly) {
                (Some(s), _) => Some(Pick::Sort(entity, s.category)),
                (None, Some(_)) if self.activate_anomaly => Some(Pick::Activate(entity)),
                _ => None,
            };
            if found.is_some() {
                self.handled.insert(entity);
                break;
            }
        }
        found
    }
}

fn other(category: Category) -> Category {
    match category {
        Category::A => Category::B,
        Category::B => Category::A,
    }
}
