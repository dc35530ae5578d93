//! Conveyor Shift library.
//!
//! This module exposes the scenario's ECS components, resources, systems and
//! events, plus the [`scenario::Scenario`] driver, for use by the binary and
//! by integration tests.

pub mod components;
pub mod events;
pub mod participant;
pub mod resources;
pub mod scenario;
pub mod systems;
