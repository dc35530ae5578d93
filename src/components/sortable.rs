//! Sorting categories and the components that tag spawned bodies.

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::components::tint::Tint;

/// The two sortable categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    A,
    B,
}

impl Category {
    /// Label given to generated default bodies of this category.
    pub fn default_label(self) -> &'static str {
        match self {
            Category::A => "RedCube",
            Category::B => "BlueCube",
        }
    }

    pub fn default_tint(self) -> Tint {
        match self {
            Category::A => Tint::RED,
            Category::B => Tint::BLUE,
        }
    }

    /// Unbiased coin flip between the two categories.
    pub fn from_coin(heads: bool) -> Self {
        if heads { Category::A } else { Category::B }
    }
}

/// Marks a body as sortable into a receptacle of the same category.
///
/// Bodies without this component are ignored by every receptacle.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sortable {
    pub category: Category,
}

impl Sortable {
    pub fn new(category: Category) -> Self {
        Self { category }
    }
}

/// Human-readable name of an entity, used in logs only.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Label(pub String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Label(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Set on a body that was dropped into the wrong receptacle.
///
/// Receptacles never classify a rejected body again, so it stays in the
/// scene as a recoloured, inert prop.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Rejected;

/// Set on every body created by the spawn scheduler.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Spawned;

/// Set on props that disappear when the working phase ends (the anomaly
/// burst bodies, plus anything the scene builder marks).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Transient;
