//! Scene handoff collaborator.
//!
//! When the transition fade finishes, the phase controller asks the
//! [`SceneLoader`] for the next scene and polls it every tick until it
//! reports [`LoadStatus::Done`]. Loading is asynchronous from the core's
//! point of view; the loader decides how long it takes.

use bevy_ecs::prelude::Resource;
use log::info;

pub const DEFAULT_LOAD_TIME: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    Done,
}

pub trait SceneLoader: Send + Sync {
    /// Begin loading `name`. A second request replaces the first.
    fn request(&mut self, name: &str);
    /// Report progress; `dt` is the simulation delta since the last poll.
    fn poll(&mut self, dt: f32) -> LoadStatus;
}

/// Loader that "loads" for a fixed amount of simulated time.
#[derive(Debug, Clone)]
pub struct SimulatedSceneLoader {
    load_time: f32,
    remaining: Option<f32>,
    requested: Option<String>,
}

impl SimulatedSceneLoader {
    pub fn new(load_time: f32) -> Self {
        Self {
            load_time: load_time.max(0.0),
            remaining: None,
            requested: None,
        }
    }

    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }
}

impl Default for SimulatedSceneLoader {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_TIME)
    }
}

impl SceneLoader for SimulatedSceneLoader {
    fn request(&mut self, name: &str) {
        info!("Loading scene '{}'", name);
        self.requested = Some(name.to_string());
        self.remaining = Some(self.load_time);
    }

    fn poll(&mut self, dt: f32) -> LoadStatus {
        match self.remaining.as_mut() {
            None => LoadStatus::Idle,
            Some(remaining) => {
                *remaining -= dt.max(0.0);
                if *remaining <= 0.0 {
                    LoadStatus::Done
                } else {
                    LoadStatus::Loading
                }
            }
        }
    }
}

/// Holds the scene loader registered for this scenario.
#[derive(Resource)]
pub struct SceneTransition {
    loader: Box<dyn SceneLoader>,
    requested: Option<String>,
}

impl SceneTransition {
    pub fn new(loader: impl SceneLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            requested: None,
        }
    }

    pub fn request(&mut self, name: &str) {
        self.requested = Some(name.to_string());
        self.loader.request(name);
    }

    pub fn poll(&mut self, dt: f32) -> LoadStatus {
        self.loader.poll(dt)
    }

    /// Name of the last requested scene, if any.
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_requested() {
        let mut l = SimulatedSceneLoader::new(0.5);
        assert_eq!(l.poll(1.0), LoadStatus::Idle);
    }

    #[test]
    fn completes_after_load_time() {
        let mut t = SceneTransition::new(SimulatedSceneLoader::new(0.5));
        t.request("Scene 2");
        assert_eq!(t.requested(), Some("Scene 2"));
        assert_eq!(t.poll(0.25), LoadStatus::Loading);
        assert_eq!(t.poll(0.25), LoadStatus::Done);
        assert_eq!(t.poll(0.25), LoadStatus::Done);
    }

    #[test]
    fn zero_load_time_is_done_on_first_poll() {
        let mut l = SimulatedSceneLoader::new(0.0);
        l.request("Scene 2");
        assert_eq!(l.requested(), Some("Scene 2"));
        assert_eq!(l.poll(0.0), LoadStatus::Done);
    }
}
