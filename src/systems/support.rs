//! Resting contact with static surfaces.
//!
//! Runs right after movement. A descending body whose box bottom has reached
//! (or sunk slightly into) the top face of a [`Surface`] below its centre is
//! lifted back onto the face and loses its downward velocity. The highest
//! such surface wins. Each surface that carries [`Contacts`] gets the list of
//! bodies resting on it.
//!
//! Landing faster than [`IMPACT_CUE_MIN_SPEED`] emits a [`CueCmd::Impact`]
//! with volume `speed / 10` (clamped to 1) and a random pitch in
//! `[0.8, 1.2)`.

use bevy_ecs::prelude::*;
use fastrand::Rng;

use crate::components::boxcollider::BoxCollider;
use crate::components::pose::Pose;
use crate::components::presence::Presence;
use crate::components::rigidbody::RigidBody;
use crate::components::surface::{Contacts, Surface};
use crate::events::cue::CueCmd;

/// Slack above a surface that still counts as touching it.
pub const SUPPORT_TOLERANCE: f32 = 0.005;
pub const IMPACT_CUE_MIN_SPEED: f32 = 1.0;

pub fn impact_volume(speed: f32) -> f32 {
    (speed / 10.0).clamp(0.0, 1.0)
}

pub fn support_system(
    mut surfaces: Query<(Entity, &Pose, &Surface, Option<&mut Contacts>)>,
    mut bodies: Query<
        (Entity, &mut Pose, &mut RigidBody, &BoxCollider, Option<&Presence>),
        Without<Surface>,
    >,
    mut cues: MessageWriter<CueCmd>,
    mut rng: Local<Rng>,
) {
    let mut faces: Vec<(Entity, Pose, Surface)> = Vec::new();
    for (entity, pose, surface, contacts) in surfaces.iter_mut() {
        if let Some(mut contacts) = contacts {
            contacts.clear();
        }
        faces.push((entity, *pose, *surface));
    }

    let mut touching: Vec<(Entity, Entity)> = Vec::new();
    for (entity, mut pose, mut rb, collider, presence) in bodies.iter_mut() {
        if rb.frozen || !presence.is_none_or(|p| p.tangible) {
            continue;
        }
        if rb.velocity.y > 0.0 {
            continue;
        }
        let bottom = collider.bottom(pose.position);
        let depth = collider.half_extents.y * 2.0;
        let support = faces
            .iter()
            .filter(|(_, face_pose, surface)| surface.covers(face_pose.position, pose.position))
            .map(|(face, face_pose, surface)| (*face, surface.top(face_pose.position)))
            .filter(|(_, top)| bottom <= top + SUPPORT_TOLERANCE && bottom >= top - depth)
            .max_by(|a, b| a.1.total_cmp(&b.1));

        let Some((face, top)) = support else {
            continue;
        };
        let speed = -rb.velocity.y;
        if speed > IMPACT_CUE_MIN_SPEED {
            cues.write(CueCmd::Impact {
                body: entity,
                volume: impact_volume(speed),
                pitch: 0.8 + 0.4 * rng.f32(),
            });
        }
        if bottom < top {
            pose.position.y += top - bottom;
        }
        rb.velocity.y = 0.0;
        touching.push((face, entity));
    }

    for (face, body) in touching {
        if let Ok((_, _, _, Some(mut contacts))) = surfaces.get_mut(face) {
            contacts.push(body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::message::Messages;
    use glam::Vec3;

    fn world_with_floor() -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Messages<CueCmd>>();
        let floor = world
            .spawn((
                Pose::new(Vec3::new(0.0, -0.5, 0.0)),
                Surface::new(Vec3::new(4.0, 1.0, 4.0)),
                Contacts::default(),
            ))
            .id();
        (world, floor)
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(support_system);
        schedule.run(world);
    }

    fn drain(world: &mut World) -> Vec<CueCmd> {
        world.resource_mut::<Messages<CueCmd>>().drain().collect()
    }

    fn body(world: &mut World, y: f32, vy: f32) -> Entity {
        let mut rb = RigidBody::new();
        rb.velocity.y = vy;
        world
            .spawn((Pose::new(Vec3::new(0.0, y, 0.0)), rb, BoxCollider::cube(0.2)))
            .id()
    }

    #[test]
    fn sunk_body_is_lifted_and_stopped() {
        let (mut world, floor) = world_with_floor();
        let b = body(&mut world, 0.08, -0.5);
        run(&mut world);
        assert!((world.get::<Pose>(b).unwrap().position.y - 0.1).abs() < 1e-6);
        assert_eq!(world.get::<RigidBody>(b).unwrap().velocity.y, 0.0);
        assert!(world.get::<Contacts>(floor).unwrap().contains(b));
        assert!(drain(&mut world).is_empty());
    }

    #[test]
    fn airborne_body_is_left_alone() {
        let (mut world, floor) = world_with_floor();
        let b = body(&mut world, 1.0, -0.5);
        run(&mut world);
        assert_eq!(world.get::<RigidBody>(b).unwrap().velocity.y, -0.5);
        assert!(world.get::<Contacts>(floor).unwrap().is_empty());
    }

    #[test]
    fn rising_body_is_not_caught() {
        let (mut world, _) = world_with_floor();
        let b = body(&mut world, 0.09, 1.0);
        run(&mut world);
        assert_eq!(world.get::<RigidBody>(b).unwrap().velocity.y, 1.0);
    }

    #[test]
    fn hard_landing_emits_impact() {
        let (mut world, _) = world_with_floor();
        let b = body(&mut world, 0.05, -3.0);
        run(&mut world);
        let cues = drain(&mut world);
        assert_eq!(cues.len(), 1);
        match cues[0] {
            CueCmd::Impact { body, volume, pitch } => {
                assert_eq!(body, b);
                assert!((volume - 0.3).abs() < 1e-6);
                assert!((0.8..1.2).contains(&pitch));
            }
            other => panic!("unexpected cue {other:?}"),
        }
    }

    #[test]
    fn intangible_body_falls_through() {
        let (mut world, _) = world_with_floor();
        let b = body(&mut world, 0.05, -3.0);
        world.entity_mut(b).insert(Presence::hidden());
        run(&mut world);
        assert_eq!(world.get::<RigidBody>(b).unwrap().velocity.y, -3.0);
    }

    #[test]
    fn highest_surface_wins() {
        let (mut world, floor) = world_with_floor();
        let belt = world
            .spawn((
                Pose::new(Vec3::new(0.0, 0.75, 0.0)),
                Surface::new(Vec3::new(1.0, 0.1, 1.0)),
                Contacts::default(),
            ))
            .id();
        let b = body(&mut world, 0.89, -0.1);
        run(&mut world);
        assert!((world.get::<Pose>(b).unwrap().position.y - 0.9).abs() < 1e-6);
        assert!(world.get::<Contacts>(belt).unwrap().contains(b));
        assert!(!world.get::<Contacts>(floor).unwrap().contains(b));
    }

    #[test]
    fn impact_volume_is_clamped() {
        assert_eq!(impact_volume(25.0), 1.0);
        assert!((impact_volume(5.0) - 0.5).abs() < 1e-6);
    }
}
