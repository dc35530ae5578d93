//! Scenario assembly and the per-tick driver.
//!
//! [`Scenario`] owns the ECS [`World`] and the update [`Schedule`]. Building
//! it spawns the room (floor, belt, two receptacles, the hidden anomaly body),
//! inserts every resource and observer, and signals [`PhaseSignal::Begin`].
//!
//! Collaborators (cue sink, score display, scene loader, viewpoint, overlays)
//! are registered through [`ScenarioBuilder`]; each of them can be left out,
//! in which case the steps that need it are skipped.

use bevy_ecs::message::Messages;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;
use serde::Serialize;

use crate::components::anomaly::AnomalyApproach;
use crate::components::boxcollider::BoxCollider;
use crate::components::conveyor::ConveyorBelt;
use crate::components::grab::Grabbable;
use crate::components::pose::Pose;
use crate::components::presence::Presence;
use crate::components::receptacle::Receptacle;
use crate::components::sortable::{Category, Label};
use crate::components::surface::{Contacts, Surface};
use crate::components::tint::Tint;
use crate::events::cue::CueCmd;
use crate::events::grab::GrabEvent;
use crate::events::phase::PhaseSignal;
use crate::resources::cue::{CueOutput, CueSink, LogCueSink};
use crate::resources::display::{LogScoreDisplay, ScoreDisplay, ScoreDisplayOutput};
use crate::resources::overlay::Overlays;
use crate::resources::phase::{Phase, PhaseController, PhaseStage};
use crate::resources::scenarioconfig::ScenarioConfig;
use crate::resources::scene::{SceneLoader, SceneTransition, SimulatedSceneLoader};
use crate::resources::scoreboard::ScoreBoard;
use crate::resources::spawner::{BodyDefaults, PrefabTable, SpawnScheduler, SpawnSettings};
use crate::resources::viewpoint::Viewpoint;
use crate::resources::worldtime::WorldTime;
use crate::systems::anomaly::anomaly_approach_system;
use crate::systems::conveyor::conveyor_system;
use crate::systems::cue::{forward_cue_cmds, update_cue_cmds};
use crate::systems::grab::observe_grab_event;
use crate::systems::movement::movement_system;
use crate::systems::phase::{observe_phase_signal, phase_controller_system};
use crate::systems::receptacle::receptacle_trigger_system;
use crate::systems::scoreboard::score_display_system;
use crate::systems::spawner::spawn_scheduler_system;
use crate::systems::support::support_system;
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;

/// Room geometry, in metres.
pub mod layout {
    use glam::Vec3;

    pub const FLOOR_CENTER: Vec3 = Vec3::new(0.0, -0.05, 1.5);
    pub const FLOOR_SIZE: Vec3 = Vec3::new(6.0, 0.1, 8.0);
    pub const BELT_CENTER: Vec3 = Vec3::new(0.0, 0.8, 1.6);
    pub const BELT_SIZE: Vec3 = Vec3::new(0.6, 0.1, 3.2);
    /// Bodies run toward the participant.
    pub const BELT_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, -1.0);
    pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.1, 2.9);
    pub const RECEPTACLE_A: Vec3 = Vec3::new(-0.7, 0.35, 0.3);
    pub const RECEPTACLE_B: Vec3 = Vec3::new(0.7, 0.35, 0.3);
    pub const RECEPTACLE_SIZE: Vec3 = Vec3::new(0.4, 0.5, 0.4);
    pub const RECEPTACLE_FLOOR_SIZE: Vec3 = Vec3::new(0.4, 0.05, 0.4);
    pub const ANOMALY_HOME: Vec3 = Vec3::new(0.0, 1.2, 3.6);
    pub const ANOMALY_EDGE: f32 = 0.25;
    pub const VIEWPOINT: Vec3 = Vec3::new(0.0, 1.6, -0.5);
    pub const VIEW_FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);
}

/// Entities created when the room is built.
#[derive(Debug, Clone, Copy)]
pub struct Fixtures {
    pub floor: Entity,
    pub belt: Entity,
    pub receptacle_a: Entity,
    pub receptacle_b: Entity,
    pub anomaly: Entity,
}

impl Fixtures {
    pub fn receptacle_for(&self, category: Category) -> Entity {
        match category {
            Category::A => self.receptacle_a,
            Category::B => self.receptacle_b,
        }
    }
}

/// Summary of a run, written as JSON by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub phase: Phase,
    pub stage: PhaseStage,
    pub finished: bool,
    pub elapsed: f32,
    pub frames: u64,
    pub score: ScoreBoard,
    pub normal_spawned: u32,
    pub anomalies_spawned: u32,
    pub requested_scene: Option<String>,
}

/// Build the update schedule in tick order.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            phase_controller_system,
            spawn_scheduler_system,
            movement_system,
            support_system,
            conveyor_system,
            receptacle_trigger_system,
            anomaly_approach_system,
            ttl_system,
            score_display_system,
            update_cue_cmds,
            forward_cue_cmds,
        )
            .chain(),
    );
    update
}

pub struct ScenarioBuilder {
    config: ScenarioConfig,
    cue_output: Option<CueOutput>,
    score_display: Option<ScoreDisplayOutput>,
    scene: Option<SceneTransition>,
    viewpoint: Option<Viewpoint>,
    overlays: bool,
    prefabs: PrefabTable,
}

impl ScenarioBuilder {
    pub fn new(config: ScenarioConfig) -> Self {
        let load_time = config.load_time;
        Self {
            config,
            cue_output: Some(CueOutput::new(LogCueSink)),
            score_display: Some(ScoreDisplayOutput::new(LogScoreDisplay)),
            scene: Some(SceneTransition::new(SimulatedSceneLoader::new(load_time))),
            viewpoint: Some(Viewpoint::new(layout::VIEWPOINT, layout::VIEW_FORWARD)),
            overlays: true,
            prefabs: PrefabTable::default(),
        }
    }

    pub fn cue_sink(mut self, sink: impl CueSink + 'static) -> Self {
        self.cue_output = Some(CueOutput::new(sink));
        self
    }

    pub fn score_display(mut self, display: impl ScoreDisplay + 'static) -> Self {
        self.score_display = Some(ScoreDisplayOutput::new(display));
        self
    }

    pub fn scene_loader(mut self, loader: impl SceneLoader + 'static) -> Self {
        self.scene = Some(SceneTransition::new(loader));
        self
    }

    pub fn viewpoint(mut self, viewpoint: Viewpoint) -> Self {
        self.viewpoint = Some(viewpoint);
        self
    }

    pub fn prefabs(mut self, prefabs: PrefabTable) -> Self {
        self.prefabs = prefabs;
        self
    }

    pub fn without_cue_sink(mut self) -> Self {
        self.cue_output = None;
        self
    }

    pub fn without_score_display(mut self) -> Self {
        self.score_display = None;
        self
    }

    pub fn without_scene_loader(mut self) -> Self {
        self.scene = None;
        self
    }

    pub fn without_viewpoint(mut self) -> Self {
        self.viewpoint = None;
        self
    }

    pub fn without_overlays(mut self) -> Self {
        self.overlays = false;
        self
    }

    pub fn build(self) -> Scenario {
        let config = self.config;
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.init_resource::<Messages<CueCmd>>();
        world.insert_resource(ScoreBoard::new());
        world.insert_resource(
            PhaseController::new(config.next_scene.clone())
                .with_fades(config.glitch_fade, config.blackout_fade)
                .with_work_duration(config.work_duration),
        );
        world.insert_resource(SpawnScheduler::new(
            config.min_delay,
            config.max_delay,
            config.seed,
        ));
        world.insert_resource(
            SpawnSettings::new(Pose::new(layout::SPAWN_POINT))
                .with_body(BodyDefaults {
                    mass: config.body_mass,
                    linear_damping: config.linear_damping,
                    angular_damping: config.angular_damping,
                    drop_impulse: config.drop_impulse,
                })
                .with_prefabs(self.prefabs),
        );
        if let Some(output) = self.cue_output {
            world.insert_resource(output);
        }
        if let Some(display) = self.score_display {
            world.insert_resource(display);
        }
        if let Some(scene) = self.scene {
            world.insert_resource(scene);
        }
        if let Some(viewpoint) = self.viewpoint {
            world.insert_resource(viewpoint);
        }
        if self.overlays {
            world.insert_resource(Overlays::default());
        }

        world.spawn(Observer::new(observe_phase_signal));
        world.spawn(Observer::new(observe_grab_event));
        world.flush();

        let fixtures = build_room(&mut world, &config);
        world.insert_resource(config);
        world.flush();

        let mut scenario = Scenario {
            world,
            schedule: build_schedule(),
            fixtures,
        };
        scenario.begin();
        scenario
    }
}

fn build_room(world: &mut World, config: &ScenarioConfig) -> Fixtures {
    let floor = world
        .spawn((
            Label::new("Floor"),
            Pose::new(layout::FLOOR_CENTER),
            Surface::new(layout::FLOOR_SIZE),
        ))
        .id();

    let mut belt = ConveyorBelt::new()
        .with_direction(layout::BELT_DIRECTION)
        .with_drive(config.drive);
    belt.target_speed = config.target_speed;
    belt.acceleration = config.acceleration;
    belt.angular_blend = config.angular_blend;
    belt.belt_force = config.belt_force;
    let belt = world
        .spawn((
            Label::new("ConveyorBelt"),
            Pose::new(layout::BELT_CENTER),
            Surface::new(layout::BELT_SIZE),
            Contacts::default(),
            belt,
        ))
        .id();

    let receptacle_a = spawn_receptacle(world, Category::A, layout::RECEPTACLE_A);
    let receptacle_b = spawn_receptacle(world, Category::B, layout::RECEPTACLE_B);

    let home = Pose::new(layout::ANOMALY_HOME);
    let anomaly = world
        .spawn((
            Label::new("Anomaly"),
            home,
            AnomalyApproach::new(home).with_travel(config.travel_duration, config.stop_distance),
            BoxCollider::cube(layout::ANOMALY_EDGE),
            Presence::hidden(),
            Grabbable::disabled(),
            Tint::GREEN,
        ))
        .id();

    Fixtures {
        floor,
        belt,
        receptacle_a,
        receptacle_b,
        anomaly,
    }
}

fn spawn_receptacle(world: &mut World, target: Category, center: Vec3) -> Entity {
    let bottom = center.y - layout::RECEPTACLE_SIZE.y * 0.5;
    world.spawn((
        Label::new(format!("{}Floor", target.default_label())),
        Pose::new(Vec3::new(
            center.x,
            bottom - layout::RECEPTACLE_FLOOR_SIZE.y * 0.5,
            center.z,
        )),
        Surface::new(layout::RECEPTACLE_FLOOR_SIZE),
    ));
    world
        .spawn((
            Label::new(format!("{}Bin", target.default_label())),
            Pose::new(center),
            BoxCollider::new(layout::RECEPTACLE_SIZE),
            Receptacle::new(target),
            target.default_tint(),
        ))
        .id()
}

pub struct Scenario {
    world: World,
    schedule: Schedule,
    fixtures: Fixtures,
}

impl Scenario {
    /// Build with the default collaborators.
    pub fn new(config: ScenarioConfig) -> Self {
        ScenarioBuilder::new(config).build()
    }

    pub fn builder(config: ScenarioConfig) -> ScenarioBuilder {
        ScenarioBuilder::new(config)
    }

    /// Enter the working phase. Only the first call has an effect.
    pub fn begin(&mut self) {
        self.world.trigger(PhaseSignal::Begin);
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
    }

    pub fn grab(&mut self, event: GrabEvent) {
        self.world.trigger(event);
    }

    /// Force the cleared phase from wherever the run is.
    pub fn trigger_cleanup(&mut self) {
        info!("Cleanup requested");
        self.world.trigger(PhaseSignal::CleanupRequested);
    }

    pub fn start_spawning(&mut self) {
        self.world.resource_mut::<SpawnScheduler>().start();
    }

    pub fn stop_spawning(&mut self) {
        self.world.resource_mut::<SpawnScheduler>().stop();
    }

    pub fn start_belt(&mut self) {
        if let Some(mut belt) = self.world.get_mut::<ConveyorBelt>(self.fixtures.belt) {
            belt.start();
        }
    }

    pub fn stop_belt(&mut self) {
        if let Some(mut belt) = self.world.get_mut::<ConveyorBelt>(self.fixtures.belt) {
            belt.stop();
        }
    }

    pub fn phase(&self) -> Phase {
        self.world.resource::<PhaseController>().current()
    }

    pub fn stage(&self) -> PhaseStage {
        self.world.resource::<PhaseController>().stage()
    }

    pub fn is_finished(&self) -> bool {
        self.world.resource::<PhaseController>().is_finished()
    }

    pub fn score(&self) -> ScoreBoard {
        *self.world.resource::<ScoreBoard>()
    }

    pub fn fixtures(&self) -> Fixtures {
        self.fixtures
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn report(&self) -> RunReport {
        let controller = self.world.resource::<PhaseController>();
        let time = self.world.resource::<WorldTime>();
        let scheduler = self.world.resource::<SpawnScheduler>();
        RunReport {
            phase: controller.current(),
            stage: controller.stage(),
            finished: controller.is_finished(),
            elapsed: time.elapsed,
            frames: time.frame_count,
            score: self.score(),
            normal_spawned: scheduler.spawn_count(),
            anomalies_spawned: scheduler.anomaly_count(),
            requested_scene: self
                .world
                .get_resource::<SceneTransition>()
                .and_then(|s| s.requested().map(str::to_string)),
        }
    }
}
