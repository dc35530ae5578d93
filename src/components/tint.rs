//! Surface colour of a body.
//!
//! The core never renders; [`Tint`] is state read by the visual collaborator.
//! The only colour change the core makes is the permanent recolour of a body
//! sorted into the wrong receptacle ([`Tint::REJECTED`]).

use bevy_ecs::prelude::Component;
use serde::Serialize;

#[derive(Component, Clone, Debug, Copy, PartialEq, Eq, Serialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const RED: Tint = Tint::new(230, 41, 55, 255);
    pub const BLUE: Tint = Tint::new(0, 121, 241, 255);
    pub const GREEN: Tint = Tint::new(0, 228, 48, 255);
    /// "Burnt" look of a mis-sorted body.
    pub const REJECTED: Tint = Tint::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_rejected(&self) -> bool {
        *self == Self::REJECTED
    }
}
