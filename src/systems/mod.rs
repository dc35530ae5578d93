//! Scenario systems.
//!
//! Submodules overview
//! - [`anomaly`] – play the anomaly approach and report arrival
//! - [`conveyor`] – drive bodies resting on active belts
//! - [`cue`] – advance the cue queue and forward cues to the sink
//! - [`grab`] – apply grab/carry/release from the interaction layer
//! - [`movement`] – integrate rigid bodies
//! - [`phase`] – phase transitions and per-phase progress
//! - [`receptacle`] – detect receptacle entries and score them
//! - [`scoreboard`] – push score text to the display
//! - [`spawner`] – create bodies from the spawn schedule
//! - [`support`] – keep bodies on the surfaces below them
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn entities whose time ran out

pub mod anomaly;
pub mod conveyor;
pub mod cue;
pub mod grab;
pub mod movement;
pub mod phase;
pub mod receptacle;
pub mod scoreboard;
pub mod spawner;
pub mod support;
pub mod time;
pub mod ttl;
