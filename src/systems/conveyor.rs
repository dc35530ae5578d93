//! Belt transport.
//!
//! Every active [`ConveyorBelt`] drives the bodies listed in its
//! [`Contacts`] (filled by the support system earlier in the same tick).
//! Each body is handled independently, so contact order does not matter.

use bevy_ecs::prelude::*;

use crate::components::conveyor::{ConveyorBelt, damp_spin};
use crate::components::pose::Pose;
use crate::components::rigidbody::RigidBody;
use crate::components::surface::Contacts;
use crate::resources::worldtime::WorldTime;

pub fn conveyor_system(
    time: Res<WorldTime>,
    belts: Query<(&Pose, &ConveyorBelt, &Contacts)>,
    mut bodies: Query<&mut RigidBody>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    for (belt_pose, belt, contacts) in belts.iter() {
        if !belt.is_active() {
            continue;
        }
        for entity in contacts.iter() {
            let Ok(mut rb) = bodies.get_mut(entity) else {
                continue;
            };
            if rb.frozen {
                continue;
            }
            rb.angular_velocity = damp_spin(rb.angular_velocity, belt.angular_blend, dt);
            let acceleration = belt.acceleration_for(belt_pose, rb.velocity, rb.linear_damping);
            rb.apply_acceleration(acceleration, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn setup(active: bool, velocity: Vec3) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.02,
            ..Default::default()
        });
        let mut rb = RigidBody::new();
        rb.velocity = velocity;
        rb.angular_velocity = Vec3::new(1.0, 2.0, 3.0);
        let body = world.spawn((Pose::default(), rb)).id();
        let mut belt = ConveyorBelt::new();
        if active {
            belt.start();
        }
        let mut contacts = Contacts::default();
        contacts.push(body);
        world.spawn((Pose::default(), belt, contacts));
        (world, body)
    }

    fn run(world: &mut World, ticks: usize) {
        let mut schedule = Schedule::default();
        schedule.add_systems(conveyor_system);
        for _ in 0..ticks {
            schedule.run(world);
        }
    }

    #[test]
    fn active_belt_converges_to_target_speed() {
        let (mut world, body) = setup(true, Vec3::ZERO);
        run(&mut world, 200);
        let rb = world.get::<RigidBody>(body).unwrap();
        assert!((rb.velocity.z - 0.6).abs() < 1e-3, "v = {}", rb.velocity);
        assert!(rb.velocity.x.abs() < 1e-6);
        assert!(rb.angular_velocity.length() < 1e-3);
    }

    #[test]
    fn vertical_velocity_is_untouched() {
        let (mut world, body) = setup(true, Vec3::new(0.0, -1.0, 0.0));
        run(&mut world, 10);
        assert_eq!(world.get::<RigidBody>(body).unwrap().velocity.y, -1.0);
    }

    #[test]
    fn inactive_belt_does_nothing() {
        let (mut world, body) = setup(false, Vec3::new(0.3, 0.0, 0.0));
        run(&mut world, 10);
        let rb = world.get::<RigidBody>(body).unwrap();
        assert_eq!(rb.velocity, Vec3::new(0.3, 0.0, 0.0));
        assert_eq!(rb.angular_velocity, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn frozen_body_is_not_driven() {
        let (mut world, body) = setup(true, Vec3::ZERO);
        world.get_mut::<RigidBody>(body).unwrap().freeze();
        run(&mut world, 10);
        assert_eq!(world.get::<RigidBody>(body).unwrap().velocity, Vec3::ZERO);
    }

    fn spawn_pair_belt(world: &mut World, order: [usize; 2]) -> [Entity; 2] {
        world.insert_resource(WorldTime {
            delta: 0.02,
            ..Default::default()
        });
        let starts = [Vec3::new(0.4, 0.0, -0.3), Vec3::new(-0.2, 0.0, 1.5)];
        let bodies = starts.map(|v| {
            let mut rb = RigidBody::new();
            rb.velocity = v;
            world.spawn((Pose::default(), rb)).id()
        });
        let mut belt = ConveyorBelt::new();
        belt.start();
        let mut contacts = Contacts::default();
        for i in order {
            contacts.push(bodies[i]);
        }
        world.spawn((Pose::default(), belt, contacts));
        bodies
    }

    #[test]
    fn shared_belt_drives_each_body_independently_of_contact_order() {
        let mut forward = World::new();
        let a = spawn_pair_belt(&mut forward, [0, 1]);
        let mut reversed = World::new();
        let b = spawn_pair_belt(&mut reversed, [1, 0]);

        for ticks in [1, 5, 300] {
            run(&mut forward, ticks);
            run(&mut reversed, ticks);
            for i in 0..2 {
                assert_eq!(
                    forward.get::<RigidBody>(a[i]).unwrap().velocity,
                    reversed.get::<RigidBody>(b[i]).unwrap().velocity
                );
            }
        }

        let first = forward.get::<RigidBody>(a[0]).unwrap().velocity;
        let second = forward.get::<RigidBody>(a[1]).unwrap().velocity;
        for v in [first, second] {
            assert!((v.z - 0.6).abs() < 1e-3, "v = {v}");
            assert!(v.x.abs() < 1e-3, "v = {v}");
        }
    }
}
