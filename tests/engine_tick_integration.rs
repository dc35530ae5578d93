//! Tick pipeline integration tests: time, movement, support, belt transport,
//! receptacles and TTL working together without the full scenario.

use bevy_ecs::prelude::*;
use glam::Vec3;

use conveyorshift::components::boxcollider::BoxCollider;
use conveyorshift::components::conveyor::{BeltDrive, ConveyorBelt};
use conveyorshift::components::pose::Pose;
use conveyorshift::components::receptacle::Receptacle;
use conveyorshift::components::rigidbody::{GRAVITY, RigidBody};
use conveyorshift::components::sortable::{Category, Sortable};
use conveyorshift::components::surface::{Contacts, Surface};
use conveyorshift::components::tint::Tint;
use conveyorshift::components::ttl::Ttl;
use conveyorshift::events::cue::CueCmd;
use conveyorshift::resources::scoreboard::ScoreBoard;
use conveyorshift::resources::worldtime::WorldTime;
use conveyorshift::systems::conveyor::conveyor_system;
use conveyorshift::systems::movement::movement_system;
use conveyorshift::systems::receptacle::receptacle_trigger_system;
use conveyorshift::systems::support::support_system;
use conveyorshift::systems::time::update_world_time;
use conveyorshift::systems::ttl::ttl_system;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.init_resource::<Messages<CueCmd>>();
    world.insert_resource(ScoreBoard::new());
    world
}

fn pipeline() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            movement_system,
            support_system,
            conveyor_system,
            receptacle_trigger_system,
            ttl_system,
        )
            .chain(),
    );
    schedule
}

fn run_for(world: &mut World, schedule: &mut Schedule, seconds: f32) {
    let ticks = (seconds / DT).round() as usize;
    for _ in 0..ticks {
        update_world_time(world, DT);
        schedule.run(world);
    }
}

/// Belt centred at the origin, 4 m long along +Z, top face at y = 0.
fn spawn_belt(world: &mut World, drive: BeltDrive) -> Entity {
    let mut belt = ConveyorBelt::new().with_drive(drive);
    belt.start();
    world
        .spawn((
            Pose::new(Vec3::new(0.0, -0.05, 0.0)),
            Surface::new(Vec3::new(1.0, 0.1, 4.0)),
            Contacts::default(),
            belt,
        ))
        .id()
}

fn spawn_cube(world: &mut World, at: Vec3, linear_damping: f32) -> Entity {
    let mut rb = RigidBody::with_mass(0.5).with_damping(linear_damping, 5.0);
    rb.add_force("gravity", GRAVITY);
    world.spawn((Pose::new(at), rb, BoxCollider::cube(0.2))).id()
}

#[test]
fn update_world_time_scales_and_counts_frames() {
    let mut world = make_world(0.0);
    world.resource_mut::<WorldTime>().time_scale = 0.5;
    update_world_time(&mut world, 0.2);
    update_world_time(&mut world, 0.2);
    let time = world.resource::<WorldTime>();
    assert!(approx_eq(time.delta, 0.1));
    assert!(approx_eq(time.elapsed, 0.2));
    assert_eq!(time.frame_count, 2);
}

#[test]
fn dropped_cube_lands_on_the_belt_and_rides_it() {
    let mut world = make_world(0.0);
    let belt = spawn_belt(&mut world, BeltDrive::VelocityMatch);
    let cube = spawn_cube(&mut world, Vec3::new(0.0, 0.5, -1.5), 0.0);
    let mut schedule = pipeline();

    run_for(&mut world, &mut schedule, 2.0);

    let pose = world.get::<Pose>(cube).unwrap();
    let rb = world.get::<RigidBody>(cube).unwrap();
    assert!((pose.position.y - 0.1).abs() < 0.01, "y = {}", pose.position.y);
    assert!(pose.position.z > -1.5);
    assert!((rb.velocity.z - 0.6).abs() < 0.05, "vz = {}", rb.velocity.z);
    assert!(rb.velocity.x.abs() < EPSILON);
    assert!(world.get::<Contacts>(belt).unwrap().contains(cube));
}

#[test]
fn damped_cube_still_reaches_belt_speed() {
    let mut world = make_world(0.0);
    spawn_belt(&mut world, BeltDrive::VelocityMatch);
    let cube = spawn_cube(&mut world, Vec3::new(0.0, 0.1, -1.5), 5.0);
    let mut schedule = pipeline();

    run_for(&mut world, &mut schedule, 3.0);

    let rb = world.get::<RigidBody>(cube).unwrap();
    assert!((rb.velocity.z - 0.6).abs() < 0.01, "vz = {}", rb.velocity.z);
}

#[test]
fn cubes_sharing_a_belt_converge_regardless_of_spawn_order() {
    let starts = [
        (Vec3::new(0.3, 0.1, -1.8), Vec3::new(0.5, 0.0, 0.0)),
        (Vec3::new(-0.3, 0.1, -1.0), Vec3::new(0.0, 0.0, 1.2)),
        (Vec3::new(0.0, 0.1, -0.2), Vec3::new(-0.4, 0.0, -0.3)),
    ];
    let run = |reverse: bool| {
        let mut world = make_world(0.0);
        let belt = spawn_belt(&mut world, BeltDrive::VelocityMatch);
        let mut order: Vec<usize> = (0..starts.len()).collect();
        if reverse {
            order.reverse();
        }
        let mut cubes = vec![Entity::PLACEHOLDER; starts.len()];
        for i in order {
            let (at, velocity) = starts[i];
            let cube = spawn_cube(&mut world, at, 5.0);
            world.get_mut::<RigidBody>(cube).unwrap().velocity = velocity;
            cubes[i] = cube;
        }
        let mut schedule = pipeline();
        run_for(&mut world, &mut schedule, 0.1);
        assert_eq!(world.get::<Contacts>(belt).unwrap().len(), starts.len());
        run_for(&mut world, &mut schedule, 2.9);
        cubes
            .iter()
            .map(|&c| world.get::<RigidBody>(c).unwrap().velocity)
            .collect::<Vec<_>>()
    };

    let forward = run(false);
    let reversed = run(true);
    assert_eq!(forward, reversed);
    for v in forward {
        assert!((v.z - 0.6).abs() < 0.01, "v = {v}");
        assert!(v.x.abs() < 0.01, "v = {v}");
    }
}

#[test]
fn stopped_belt_lets_damped_cube_come_to_rest() {
    let mut world = make_world(0.0);
    let belt = spawn_belt(&mut world, BeltDrive::VelocityMatch);
    let cube = spawn_cube(&mut world, Vec3::new(0.0, 0.1, -1.5), 5.0);
    let mut schedule = pipeline();

    run_for(&mut world, &mut schedule, 1.0);
    assert!(world.get::<RigidBody>(cube).unwrap().velocity.z > 0.1);

    world.get_mut::<ConveyorBelt>(belt).unwrap().stop();
    run_for(&mut world, &mut schedule, 2.0);
    assert!(world.get::<RigidBody>(cube).unwrap().velocity.z.abs() < 1e-3);
}

#[test]
fn constant_drive_keeps_accelerating() {
    let mut world = make_world(0.0);
    spawn_belt(&mut world, BeltDrive::ConstantAcceleration);
    let cube = spawn_cube(&mut world, Vec3::new(0.0, 0.1, -1.9), 0.0);
    let mut schedule = pipeline();

    run_for(&mut world, &mut schedule, 0.5);
    let vz = world.get::<RigidBody>(cube).unwrap().velocity.z;
    assert!(vz > 3.5, "vz = {vz}");
}

#[test]
fn cube_carried_into_receptacle_is_sorted_then_despawned() {
    let mut world = make_world(0.0);
    world.spawn((
        Pose::new(Vec3::new(2.0, 0.25, 0.0)),
        BoxCollider::new(Vec3::new(0.4, 0.5, 0.4)),
        Receptacle::new(Category::B),
    ));
    world.spawn((
        Pose::new(Vec3::new(2.0, -0.05, 0.0)),
        Surface::new(Vec3::new(0.4, 0.1, 0.4)),
    ));
    let cube = spawn_cube(&mut world, Vec3::new(2.0, 0.4, 0.0), 5.0);
    world
        .entity_mut(cube)
        .insert((Sortable::new(Category::B), Tint::BLUE));
    let mut schedule = pipeline();

    run_for(&mut world, &mut schedule, 0.25);
    assert_eq!(world.resource::<ScoreBoard>().correct(), 1);
    assert!(world.get::<Ttl>(cube).is_some());

    run_for(&mut world, &mut schedule, 0.5);
    assert!(world.get_entity(cube).is_err());
    assert_eq!(world.resource::<ScoreBoard>().correct(), 1);
}

#[test]
fn wrong_receptacle_keeps_the_cube_and_tints_it() {
    let mut world = make_world(0.0);
    world.spawn((
        Pose::new(Vec3::new(2.0, 0.25, 0.0)),
        BoxCollider::new(Vec3::new(0.4, 0.5, 0.4)),
        Receptacle::new(Category::A),
    ));
    world.spawn((
        Pose::new(Vec3::new(2.0, -0.05, 0.0)),
        Surface::new(Vec3::new(0.4, 0.1, 0.4)),
    ));
    let cube = spawn_cube(&mut world, Vec3::new(2.0, 0.4, 0.0), 5.0);
    world
        .entity_mut(cube)
        .insert((Sortable::new(Category::B), Tint::BLUE));
    let mut schedule = pipeline();

    run_for(&mut world, &mut schedule, 3.0);
    assert_eq!(world.resource::<ScoreBoard>().errors(), 1);
    assert_eq!(world.resource::<ScoreBoard>().correct(), 0);
    assert_eq!(*world.get::<Tint>(cube).unwrap(), Tint::REJECTED);
    assert!(world.get::<Ttl>(cube).is_none());
}

#[test]
fn rejected_cube_is_never_rescored_or_removed() {
    let mut world = make_world(0.0);
    for (x, target) in [(2.0, Category::A), (-2.0, Category::B)] {
        world.spawn((
            Pose::new(Vec3::new(x, 0.25, 0.0)),
            BoxCollider::new(Vec3::new(0.4, 0.5, 0.4)),
            Receptacle::new(target),
        ));
        world.spawn((
            Pose::new(Vec3::new(x, -0.05, 0.0)),
            Surface::new(Vec3::new(0.4, 0.1, 0.4)),
        ));
    }
    let cube = spawn_cube(&mut world, Vec3::new(2.0, 0.4, 0.0), 5.0);
    world
        .entity_mut(cube)
        .insert((Sortable::new(Category::B), Tint::BLUE));
    let mut schedule = pipeline();

    run_for(&mut world, &mut schedule, 0.5);
    assert_eq!(world.resource::<ScoreBoard>().errors(), 1);

    {
        let mut entity = world.entity_mut(cube);
        entity.get_mut::<Pose>().unwrap().position = Vec3::new(-2.0, 0.4, 0.0);
        entity.get_mut::<RigidBody>().unwrap().velocity = Vec3::ZERO;
    }
    run_for(&mut world, &mut schedule, 1.0);

    assert!(world.get_entity(cube).is_ok());
    assert!(world.get::<Ttl>(cube).is_none());
    assert_eq!(*world.get::<Tint>(cube).unwrap(), Tint::REJECTED);
    let score = *world.resource::<ScoreBoard>();
    assert_eq!(score.correct(), 0);
    assert_eq!(score.errors(), 1);
}

#[test]
fn ttl_counts_down_with_world_time() {
    let mut world = make_world(0.25);
    let entity = world.spawn(Ttl::new(0.3)).id();
    let mut schedule = Schedule::default();
    schedule.add_systems(ttl_system);

    schedule.run(&mut world);
    assert!(world.get_entity(entity).is_ok());
    schedule.run(&mut world);
    assert!(world.get_entity(entity).is_err());
}
