use bevy_ecs::prelude::Component;

/// Whether a body is shown and whether it takes part in contact and trigger
/// evaluation.
///
/// An intangible body is skipped by [`crate::systems::support`] and by every
/// receptacle, so it can neither rest on a surface nor be sorted.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presence {
    pub visible: bool,
    pub tangible: bool,
}

impl Presence {
    /// Visible and collidable.
    pub fn solid() -> Self {
        Self {
            visible: true,
            tangible: true,
        }
    }

    /// Hidden and non-collidable.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            tangible: false,
        }
    }
}

impl Default for Presence {
    fn default() -> Self {
        Self::solid()
    }
}
