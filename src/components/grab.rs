use bevy_ecs::prelude::Component;

/// Interactive grab capability.
///
/// `enabled == false` makes every grab request on the entity a no-op.
/// `held` is maintained by [`crate::systems::grab::observe_grab_event`].
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grabbable {
    pub enabled: bool,
    pub held: bool,
}

impl Grabbable {
    pub fn new() -> Self {
        Self {
            enabled: true,
            held: false,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            held: false,
        }
    }
}

impl Default for Grabbable {
    fn default() -> Self {
        Self::new()
    }
}
