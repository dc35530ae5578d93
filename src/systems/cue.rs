//! Cue message plumbing.
//!
//! [`update_cue_cmds`] advances the message queue and [`forward_cue_cmds`]
//! hands every cue written this tick to the registered sink. Without a
//! [`CueOutput`] the cues are dropped.

use bevy_ecs::prelude::*;

use crate::events::cue::CueCmd;
use crate::resources::cue::CueOutput;

pub fn update_cue_cmds(mut msgs: ResMut<Messages<CueCmd>>) {
    msgs.update();
}

pub fn forward_cue_cmds(mut reader: MessageReader<CueCmd>, output: Option<ResMut<CueOutput>>) {
    match output {
        Some(mut output) => {
            for cue in reader.read() {
                output.play(cue);
            }
        }
        None => {
            for _ in reader.read() {}
        }
    }
}
