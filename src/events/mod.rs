//! Event and message types exchanged across systems.
//!
//! Submodules:
//! - [`cue`] – feedback cues forwarded to the cue sink
//! - [`grab`] – hand interaction with grabbable bodies
//! - [`phase`] – phase transition requests and notifications
pub mod cue;
pub mod grab;
pub mod phase;
