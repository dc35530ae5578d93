//! Scoreboard display collaborator.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::Resource;
use log::info;

/// Shows the scoreboard text somewhere the participant can see it.
pub trait ScoreDisplay: Send + Sync {
    fn show(&mut self, text: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogScoreDisplay;

impl ScoreDisplay for LogScoreDisplay {
    fn show(&mut self, text: &str) {
        info!("scoreboard: {}", text.replace('\n', " | "));
    }
}

/// Keeps the last shown text in a shared slot.
#[derive(Debug, Default, Clone)]
pub struct SharedScoreDisplay {
    text: Arc<Mutex<String>>,
}

impl SharedScoreDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        match self.text.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ScoreDisplay for SharedScoreDisplay {
    fn show(&mut self, text: &str) {
        match self.text.lock() {
            Ok(mut guard) => *guard = text.to_string(),
            Err(poisoned) => *poisoned.into_inner() = text.to_string(),
        }
    }
}

#[derive(Resource)]
pub struct ScoreDisplayOutput {
    display: Box<dyn ScoreDisplay>,
}

impl ScoreDisplayOutput {
    pub fn new(display: impl ScoreDisplay + 'static) -> Self {
        Self {
            display: Box::new(display),
        }
    }

    pub fn show(&mut self, text: &str) {
        self.display.show(text);
    }
}
