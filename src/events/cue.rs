//! Feedback cues for the audio/visual collaborator.
//!
//! Systems write [`CueCmd`] messages; at the end of each tick the cue systems
//! forward them to the registered [`CueSink`](crate::resources::cue::CueSink).

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum CueCmd {
    /// A body landed in the receptacle of its category.
    PositiveChime { receptacle: Entity, body: Entity },
    /// A body landed in the wrong receptacle.
    NegativeBuzzer { receptacle: Entity, body: Entity },
    /// A body hit a surface hard enough to be heard.
    Impact { body: Entity, volume: f32, pitch: f32 },
    /// Particle burst at the anomaly reveal.
    GlitchParticles { body: Entity },
}
