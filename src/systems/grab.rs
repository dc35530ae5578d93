//! Grab interaction.
//!
//! [`observe_grab_event`] applies [`GrabEvent`]s from the interaction layer:
//! a selected body is frozen and follows `Carry` positions until it is
//! released with the hand's velocity. Selecting an anomaly burst body for the
//! first time also triggers [`PhaseSignal::AnomalyActivated`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};

use crate::components::anomaly::AnomalyTrigger;
use crate::components::grab::Grabbable;
use crate::components::pose::Pose;
use crate::components::rigidbody::RigidBody;
use crate::events::grab::{GrabAction, GrabEvent};
use crate::events::phase::PhaseSignal;

pub fn observe_grab_event(
    trigger: On<GrabEvent>,
    mut commands: Commands,
    mut bodies: Query<(
        &mut Grabbable,
        Option<&mut RigidBody>,
        Option<&mut Pose>,
        Option<&mut AnomalyTrigger>,
    )>,
) {
    let event = *trigger.event();
    let Ok((mut grab, rb, pose, anomaly)) = bodies.get_mut(event.entity) else {
        debug!("Grab on non-grabbable {:?}", event.entity);
        return;
    };
    match event.action {
        GrabAction::Select => {
            if !grab.enabled {
                debug!("Grab disabled for {:?}", event.entity);
                return;
            }
            grab.held = true;
            if let Some(mut rb) = rb {
                rb.freeze();
                rb.velocity = Vec3::ZERO;
                rb.angular_velocity = Vec3::ZERO;
            }
            if let Some(mut anomaly) = anomaly {
                if anomaly.try_trigger() {
                    info!("Anomaly body {:?} picked up", event.entity);
                    commands.trigger(PhaseSignal::AnomalyActivated);
                }
            }
        }
        GrabAction::Carry { position } => {
            if !grab.held {
                return;
            }
            if let Some(mut pose) = pose {
                pose.position = position;
            }
        }
        GrabAction::Release { velocity } => {
            if !grab.held {
                return;
            }
            grab.held = false;
            if let Some(mut rb) = rb {
                rb.unfreeze();
                rb.velocity = velocity;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Activations(u32);

    fn count_activation(trigger: On<PhaseSignal>, mut n: ResMut<Activations>) {
        if *trigger.event() == PhaseSignal::AnomalyActivated {
            n.0 += 1;
        }
    }

    fn setup() -> World {
        let mut world = World::new();
        world.init_resource::<Activations>();
        world.add_observer(observe_grab_event);
        world.add_observer(count_activation);
        world
    }

    #[test]
    fn select_carry_release() {
        let mut world = setup();
        let mut rb = RigidBody::new();
        rb.velocity = Vec3::new(0.0, -1.0, 0.0);
        let e = world.spawn((Grabbable::new(), rb, Pose::default())).id();

        world.trigger(GrabEvent::select(e));
        assert!(world.get::<Grabbable>(e).unwrap().held);
        assert!(world.get::<RigidBody>(e).unwrap().frozen);
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity, Vec3::ZERO);

        world.trigger(GrabEvent::carry(e, Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(world.get::<Pose>(e).unwrap().position, Vec3::new(1.0, 2.0, 3.0));

        world.trigger(GrabEvent::release(e, Vec3::X));
        assert!(!world.get::<Grabbable>(e).unwrap().held);
        let rb = world.get::<RigidBody>(e).unwrap();
        assert!(!rb.frozen);
        assert_eq!(rb.velocity, Vec3::X);
        assert_eq!(world.resource::<Activations>().0, 0);
    }

    #[test]
    fn carry_without_select_is_ignored() {
        let mut world = setup();
        let e = world.spawn((Grabbable::new(), Pose::default())).id();
        world.trigger(GrabEvent::carry(e, Vec3::ONE));
        assert_eq!(world.get::<Pose>(e).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn disabled_grab_is_ignored() {
        let mut world = setup();
        let e = world
            .spawn((Grabbable::disabled(), AnomalyTrigger::default()))
            .id();
        world.trigger(GrabEvent::select(e));
        assert!(!world.get::<Grabbable>(e).unwrap().held);
        assert_eq!(world.resource::<Activations>().0, 0);
    }

    #[test]
    fn anomaly_activates_once() {
        let mut world = setup();
        let e = world
            .spawn((Grabbable::new(), RigidBody::new(), AnomalyTrigger::default()))
            .id();
        world.trigger(GrabEvent::select(e));
        world.trigger(GrabEvent::release(e, Vec3::ZERO));
        world.trigger(GrabEvent::select(e));
        assert_eq!(world.resource::<Activations>().0, 1);
        assert!(world.get::<AnomalyTrigger>(e).unwrap().is_triggered());
    }
}
