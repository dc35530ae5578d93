//! Cue output collaborator.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use crate::events::cue::CueCmd;

/// Receives every cue the scenario emits.
pub trait CueSink: Send + Sync {
    fn play(&mut self, cue: &CueCmd);
}

/// Writes cues to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&mut self, cue: &CueCmd) {
        match cue {
            CueCmd::Impact { .. } => debug!("cue: {:?}", cue),
            _ => info!("cue: {:?}", cue),
        }
    }
}

/// Collects cues into a shared list that the owner can inspect.
#[derive(Debug, Default, Clone)]
pub struct RecordingCueSink {
    played: Arc<Mutex<Vec<CueCmd>>>,
}

impl RecordingCueSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything played so far.
    pub fn played(&self) -> Vec<CueCmd> {
        match self.played.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl CueSink for RecordingCueSink {
    fn play(&mut self, cue: &CueCmd) {
        match self.played.lock() {
            Ok(mut guard) => guard.push(*cue),
            Err(poisoned) => poisoned.into_inner().push(*cue),
        }
    }
}

#[derive(Resource)]
pub struct CueOutput {
    sink: Box<dyn CueSink>,
}

impl CueOutput {
    pub fn new(sink: impl CueSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    pub fn play(&mut self, cue: &CueCmd) {
        self.sink.play(cue);
    }
}
