//! Scenario configuration resource.
//!
//! Tunables loaded from an INI file. Every key is optional; a missing or
//! malformed value keeps its default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [spawner]
//! min_delay = 2.0
//! max_delay = 4.0
//! drop_impulse = 0.1
//! mass = 0.5
//! linear_damping = 5.0
//! angular_damping = 5.0
//! seed = 42
//!
//! [conveyor]
//! drive = velocity
//! target_speed = 0.6
//! acceleration = 8.0
//! angular_blend = 10.0
//! belt_force = 8.0
//!
//! [anomaly]
//! travel_duration = 5.0
//! stop_distance = 0.2
//!
//! [phase]
//! glitch_fade = 2.0
//! blackout_fade = 0.75
//! work_duration = 0
//! next_scene = Scene 2
//!
//! [scene]
//! load_time = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::conveyor::{
    BeltDrive, DEFAULT_ACCELERATION, DEFAULT_ANGULAR_BLEND, DEFAULT_BELT_FORCE,
    DEFAULT_TARGET_SPEED,
};
use crate::resources::scene::DEFAULT_LOAD_TIME;

const DEFAULT_MIN_DELAY: f32 = 2.0;
const DEFAULT_MAX_DELAY: f32 = 4.0;
const DEFAULT_DROP_IMPULSE: f32 = 0.1;
const DEFAULT_BODY_MASS: f32 = 0.5;
const DEFAULT_LINEAR_DAMPING: f32 = 5.0;
const DEFAULT_ANGULAR_DAMPING: f32 = 5.0;
const DEFAULT_TRAVEL_DURATION: f32 = 5.0;
const DEFAULT_STOP_DISTANCE: f32 = 0.2;
const DEFAULT_GLITCH_FADE: f32 = 2.0;
const DEFAULT_BLACKOUT_FADE: f32 = 0.75;
const DEFAULT_NEXT_SCENE: &str = "Scene 2";
const DEFAULT_CONFIG_PATH: &str = "./conveyorshift.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    /// Lower bound of the random delay between normal spawns, seconds.
    pub min_delay: f32,
    /// Upper bound of the random delay between normal spawns, seconds.
    pub max_delay: f32,
    pub drop_impulse: f32,
    pub body_mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    pub drive: BeltDrive,
    pub target_speed: f32,
    pub acceleration: f32,
    pub angular_blend: f32,
    pub belt_force: f32,

    pub travel_duration: f32,
    pub stop_distance: f32,

    pub glitch_fade: f32,
    pub blackout_fade: f32,
    /// Force the anomaly after this long in the working phase. Off when `None`.
    pub work_duration: Option<f32>,
    pub next_scene: String,

    /// Simulated scene load time, seconds.
    pub load_time: f32,

    pub config_path: PathBuf,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioConfig {
    pub fn new() -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            drop_impulse: DEFAULT_DROP_IMPULSE,
            body_mass: DEFAULT_BODY_MASS,
            linear_damping: DEFAULT_LINEAR_DAMPING,
            angular_damping: DEFAULT_ANGULAR_DAMPING,
            seed: None,
            drive: BeltDrive::VelocityMatch,
            target_speed: DEFAULT_TARGET_SPEED,
            acceleration: DEFAULT_ACCELERATION,
            angular_blend: DEFAULT_ANGULAR_BLEND,
            belt_force: DEFAULT_BELT_FORCE,
            travel_duration: DEFAULT_TRAVEL_DURATION,
            stop_distance: DEFAULT_STOP_DISTANCE,
            glitch_fade: DEFAULT_GLITCH_FADE,
            blackout_fade: DEFAULT_BLACKOUT_FADE,
            work_duration: None,
            next_scene: DEFAULT_NEXT_SCENE.to_string(),
            load_time: DEFAULT_LOAD_TIME,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Same as [`load_from_file`](Self::load_from_file) but from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [spawner] section
        if let Some(v) = float("spawner", "min_delay") {
            self.min_delay = v.max(0.0);
        }
        if let Some(v) = float("spawner", "max_delay") {
            self.max_delay = v.max(0.0);
        }
        if self.min_delay > self.max_delay {
            warn!(
                "spawner.min_delay {} > max_delay {}; swapping",
                self.min_delay, self.max_delay
            );
            std::mem::swap(&mut self.min_delay, &mut self.max_delay);
        }
        if let Some(v) = float("spawner", "drop_impulse") {
            self.drop_impulse = v;
        }
        if let Some(v) = float("spawner", "mass") {
            self.body_mass = v;
        }
        if let Some(v) = float("spawner", "linear_damping") {
            self.linear_damping = v.max(0.0);
        }
        if let Some(v) = float("spawner", "angular_damping") {
            self.angular_damping = v.max(0.0);
        }
        if let Some(seed) = config.getuint("spawner", "seed").ok().flatten() {
            self.seed = Some(seed);
        }

        // [conveyor] section
        if let Some(drive) = config.get("conveyor", "drive") {
            match BeltDrive::parse(&drive) {
                Some(d) => self.drive = d,
                None => warn!("Unknown conveyor.drive '{}', keeping {:?}", drive, self.drive),
            }
        }
        if let Some(v) = float("conveyor", "target_speed") {
            self.target_speed = v;
        }
        if let Some(v) = float("conveyor", "acceleration") {
            self.acceleration = v;
        }
        if let Some(v) = float("conveyor", "angular_blend") {
            self.angular_blend = v;
        }
        if let Some(v) = float("conveyor", "belt_force") {
            self.belt_force = v;
        }

        // [anomaly] section
        if let Some(v) = float("anomaly", "travel_duration") {
            self.travel_duration = v;
        }
        if let Some(v) = float("anomaly", "stop_distance") {
            self.stop_distance = v;
        }

        // [phase] section
        if let Some(v) = float("phase", "glitch_fade") {
            self.glitch_fade = v;
        }
        if let Some(v) = float("phase", "blackout_fade") {
            self.blackout_fade = v;
        }
        if let Some(v) = float("phase", "work_duration") {
            self.work_duration = (v > 0.0).then_some(v);
        }
        if let Some(name) = config.get("phase", "next_scene") {
            let name = name.trim();
            if !name.is_empty() {
                self.next_scene = name.to_string();
            }
        }

        // [scene] section
        if let Some(v) = float("scene", "load_time") {
            self.load_time = v.max(0.0);
        }
    }

    /// Save configuration to the INI file at `config_path`.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("spawner", "min_delay", Some(self.min_delay.to_string()));
        config.set("spawner", "max_delay", Some(self.max_delay.to_string()));
        config.set("spawner", "drop_impulse", Some(self.drop_impulse.to_string()));
        config.set("spawner", "mass", Some(self.body_mass.to_string()));
        config.set("spawner", "linear_damping", Some(self.linear_damping.to_string()));
        config.set("spawner", "angular_damping", Some(self.angular_damping.to_string()));
        if let Some(seed) = self.seed {
            config.set("spawner", "seed", Some(seed.to_string()));
        }

        config.set("conveyor", "drive", Some(self.drive.as_str().to_string()));
        config.set("conveyor", "target_speed", Some(self.target_speed.to_string()));
        config.set("conveyor", "acceleration", Some(self.acceleration.to_string()));
        config.set("conveyor", "angular_blend", Some(self.angular_blend.to_string()));
        config.set("conveyor", "belt_force", Some(self.belt_force.to_string()));

        config.set("anomaly", "travel_duration", Some(self.travel_duration.to_string()));
        config.set("anomaly", "stop_distance", Some(self.stop_distance.to_string()));

        config.set("phase", "glitch_fade", Some(self.glitch_fade.to_string()));
        config.set("phase", "blackout_fade", Some(self.blackout_fade.to_string()));
        config.set(
            "phase",
            "work_duration",
            Some(self.work_duration.unwrap_or(0.0).to_string()),
        );
        config.set("phase", "next_scene", Some(self.next_scene.clone()));

        config.set("scene", "load_time", Some(self.load_time.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
