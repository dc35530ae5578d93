//! Spawn scheduling.
//!
//! [`SpawnScheduler`] decides *when* and *what* to spawn; it never touches the
//! world. The spawner system turns the [`SpawnKind`]s it returns into bodies
//! using the [`SpawnSettings`] resource.
//!
//! # Timeline
//!
//! 1. While fewer than [`SPAWN_THRESHOLD`] normal bodies exist, spawn one
//!    normal body (category by fair coin) and wait a random delay in
//!    `[min_delay, max_delay)`.
//! 2. Then spawn [`ANOMALY_BURST_COUNT`] anomaly bodies, each followed by
//!    [`ANOMALY_BURST_SPACING`] seconds.
//! 3. Then stop. The scheduler cannot be restarted after that.
//!
//! The first spawn happens on the first tick after [`SpawnScheduler::start`].
//! Large ticks catch up: every step whose wait has elapsed fires in the same
//! tick, in order.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use glam::Vec3;
use log::{debug, info};

use crate::components::pose::Pose;
use crate::components::sortable::Category;
use crate::components::tint::Tint;

pub const SPAWN_THRESHOLD: u32 = 30;
pub const ANOMALY_BURST_COUNT: u32 = 3;
pub const ANOMALY_BURST_SPACING: f32 = 1.0;

/// Edge range of generated default bodies.
pub const DEFAULT_BODY_EDGE: (f32, f32) = (0.15, 0.20);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnKind {
    Normal(Category),
    Anomaly,
}

#[derive(Resource, Debug)]
pub struct SpawnScheduler {
    min_delay: f32,
    max_delay: f32,
    running: bool,
    exhausted: bool,
    wait: f32,
    spawn_count: u32,
    anomaly_count: u32,
    rng: Rng,
}

impl SpawnScheduler {
    /// Create a stopped scheduler. Delays are reordered if inverted and
    /// clamped at zero. With `seed` the sequence is reproducible.
    pub fn new(min_delay: f32, max_delay: f32, seed: Option<u64>) -> Self {
        let (lo, hi) = if min_delay <= max_delay {
            (min_delay, max_delay)
        } else {
            (max_delay, min_delay)
        };
        Self {
            min_delay: lo.max(0.0),
            max_delay: hi.max(0.0),
            running: false,
            exhausted: false,
            wait: 0.0,
            spawn_count: 0,
            anomaly_count: 0,
            rng: seed.map(Rng::with_seed).unwrap_or_default(),
        }
    }

    /// Start (or resume) the spawn loop. No effect while running or after the
    /// burst completed. Returns whether the loop was started.
    pub fn start(&mut self) -> bool {
        if self.running {
            debug!("Spawner already running");
            return false;
        }
        if self.exhausted {
            debug!("Spawner exhausted, ignoring start");
            return false;
        }
        self.running = true;
        self.wait = 0.0;
        true
    }

    /// Stop the spawn loop. No effect when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.wait = 0.0;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Normal bodies spawned so far. Never exceeds [`SPAWN_THRESHOLD`].
    pub fn spawn_count(&self) -> u32 {
        self.spawn_count
    }

    /// Anomaly bodies spawned so far. Never exceeds [`ANOMALY_BURST_COUNT`].
    pub fn anomaly_count(&self) -> u32 {
        self.anomaly_count
    }

    pub fn delay_range(&self) -> (f32, f32) {
        (self.min_delay, self.max_delay)
    }

    pub fn rng_mut(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// Advance by `dt` seconds, returning the spawns due in this tick.
    pub fn tick(&mut self, dt: f32) -> Vec<SpawnKind> {
        let mut due = Vec::new();
        if !self.running {
            return due;
        }
        self.wait -= dt.max(0.0);
        while self.running && self.wait <= 0.0 {
            if let Some(kind) = self.step() {
                due.push(kind);
            }
        }
        due
    }

    fn step(&mut self) -> Option<SpawnKind> {
        if self.spawn_count < SPAWN_THRESHOLD {
            let category = Category::from_coin(self.rng.bool());
            self.spawn_count += 1;
            self.wait += self.next_delay();
            return Some(SpawnKind::Normal(category));
        }
        if self.anomaly_count < ANOMALY_BURST_COUNT {
            if self.anomaly_count == 0 {
                info!("Spawn threshold reached, releasing anomalies");
            }
            self.anomaly_count += 1;
            self.wait += ANOMALY_BURST_SPACING;
            return Some(SpawnKind::Anomaly);
        }
        info!("Anomaly burst complete, spawner stopped");
        self.running = false;
        self.exhausted = true;
        None
    }

    fn next_delay(&mut self) -> f32 {
        self.min_delay + (self.max_delay - self.min_delay) * self.rng.f32()
    }
}

/// Visual template of a spawnable body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyTemplate {
    pub label: String,
    pub edge: f32,
    pub tint: Tint,
}

impl BodyTemplate {
    pub fn new(label: impl Into<String>, edge: f32, tint: Tint) -> Self {
        Self {
            label: label.into(),
            edge,
            tint,
        }
    }

    /// Plain cube used when no template was registered for a kind.
    pub fn generated(kind: SpawnKind, rng: &mut Rng) -> Self {
        let (lo, hi) = DEFAULT_BODY_EDGE;
        let edge = lo + (hi - lo) * rng.f32();
        match kind {
            SpawnKind::Normal(category) => {
                Self::new(category.default_label(), edge, category.default_tint())
            }
            SpawnKind::Anomaly => Self::new("GreenCube", edge, Tint::GREEN),
        }
    }
}

/// Registered templates per kind. Empty pools fall back to generated cubes.
#[derive(Clone, Debug, Default)]
pub struct PrefabTable {
    pub category_a: Vec<BodyTemplate>,
    pub category_b: Vec<BodyTemplate>,
    pub anomaly: Vec<BodyTemplate>,
}

impl PrefabTable {
    pub fn pool(&self, kind: SpawnKind) -> &[BodyTemplate] {
        match kind {
            SpawnKind::Normal(Category::A) => &self.category_a,
            SpawnKind::Normal(Category::B) => &self.category_b,
            SpawnKind::Anomaly => &self.anomaly,
        }
    }

    /// Pick a template for `kind`: uniform over its pool, or generated.
    pub fn choose(&self, kind: SpawnKind, rng: &mut Rng) -> BodyTemplate {
        let pool = self.pool(kind);
        if pool.is_empty() {
            BodyTemplate::generated(kind, rng)
        } else {
            pool[rng.usize(..pool.len())].clone()
        }
    }
}

/// Physical defaults applied to every spawned body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDefaults {
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Impulse applied along the spawn point's down axis.
    pub drop_impulse: f32,
}

impl Default for BodyDefaults {
    fn default() -> Self {
        Self {
            mass: 0.5,
            linear_damping: 5.0,
            angular_damping: 5.0,
            drop_impulse: 0.1,
        }
    }
}

#[derive(Resource, Clone, Debug)]
pub struct SpawnSettings {
    pub spawn_point: Pose,
    pub body: BodyDefaults,
    pub prefabs: PrefabTable,
}

impl SpawnSettings {
    pub fn new(spawn_point: Pose) -> Self {
        Self {
            spawn_point,
            body: BodyDefaults::default(),
            prefabs: PrefabTable::default(),
        }
    }

    pub fn with_body(mut self, body: BodyDefaults) -> Self {
        self.body = body;
        self
    }

    pub fn with_prefabs(mut self, prefabs: PrefabTable) -> Self {
        self.prefabs = prefabs;
        self
    }

    /// Initial impulse for a fresh body.
    pub fn drop_impulse(&self) -> Vec3 {
        -self.spawn_point.up() * self.body.drop_impulse
    }
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}
