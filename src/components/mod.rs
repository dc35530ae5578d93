//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the scenario world.
//!
//! Submodules overview:
//! - [`anomaly`] – one-shot anomaly trigger and the approach sequence
//! - [`boxcollider`] – axis-aligned box used for trigger volumes and bodies
//! - [`conveyor`] – belt transport drive and force model
//! - [`grab`] – whether a body can be, and currently is, held
//! - [`pose`] – world-space position and rotation
//! - [`presence`] – visibility and tangibility
//! - [`receptacle`] – sorting bin with a target category
//! - [`rigidbody`] – kinematic body with velocity, mass, damping and forces
//! - [`sortable`] – sorting category, labels and lifecycle markers
//! - [`surface`] – static faces bodies rest on, and their contact lists
//! - [`tint`] – surface colour read by the renderer
//! - [`ttl`] – delayed despawn
//! - [`tween`] – easing curves and a fixed-duration tween clock

pub mod anomaly;
pub mod boxcollider;
pub mod conveyor;
pub mod grab;
pub mod pose;
pub mod presence;
pub mod receptacle;
pub mod rigidbody;
pub mod sortable;
pub mod surface;
pub mod tint;
pub mod ttl;
pub mod tween;
