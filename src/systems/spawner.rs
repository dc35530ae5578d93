//! Body spawning.
//!
//! Turns the [`SpawnKind`]s due this tick into entities at the spawn point.
//! Each body gets gravity, the configured mass and damping, and a small drop
//! impulse along the spawn point's down axis.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::debug;

use crate::components::anomaly::AnomalyTrigger;
use crate::components::boxcollider::BoxCollider;
use crate::components::grab::Grabbable;
use crate::components::presence::Presence;
use crate::components::rigidbody::{GRAVITY, RigidBody};
use crate::components::sortable::{Label, Sortable, Spawned, Transient};
use crate::resources::spawner::{SpawnKind, SpawnScheduler, SpawnSettings};
use crate::resources::worldtime::WorldTime;

pub fn spawn_scheduler_system(
    time: Res<WorldTime>,
    scheduler: Option<ResMut<SpawnScheduler>>,
    settings: Option<Res<SpawnSettings>>,
    mut commands: Commands,
) {
    let Some(mut scheduler) = scheduler else {
        return;
    };
    let due = scheduler.tick(time.delta);
    if due.is_empty() {
        return;
    }
    let fallback;
    let settings = match settings.as_deref() {
        Some(s) => s,
        None => {
            fallback = SpawnSettings::default();
            &fallback
        }
    };
    for kind in due {
        spawn_body(&mut commands, kind, settings, scheduler.rng_mut());
    }
}

/// Spawn one body of `kind` and return its entity for further configuration.
pub fn spawn_body(
    commands: &mut Commands,
    kind: SpawnKind,
    settings: &SpawnSettings,
    rng: &mut Rng,
) -> Entity {
    let template = settings.prefabs.choose(kind, rng);
    let defaults = settings.body;

    let mut rb = RigidBody::with_mass(defaults.mass)
        .with_damping(defaults.linear_damping, defaults.angular_damping);
    rb.add_force("gravity", GRAVITY);
    rb.apply_impulse(settings.drop_impulse());

    let mut entity = commands.spawn((
        settings.spawn_point,
        rb,
        BoxCollider::cube(template.edge),
        template.tint,
        Presence::solid(),
        Grabbable::new(),
        Label::new(template.label.clone()),
        Spawned,
    ));
    match kind {
        SpawnKind::Normal(category) => {
            entity.insert(Sortable::new(category));
        }
        SpawnKind::Anomaly => {
            entity.insert((AnomalyTrigger::default(), Transient));
        }
    }
    let id = entity.id();
    debug!("Spawned {} {:?} as {:?}", template.label, kind, id);
    id
}
