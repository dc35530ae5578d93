use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Axis-aligned box centred on the entity position (offset optional).
///
/// Entity rotation is not applied to the box.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl BoxCollider {
    /// Create a BoxCollider with the given full size.
    pub fn new(size: Vec3) -> Self {
        Self {
            half_extents: size.abs() * 0.5,
            offset: Vec3::ZERO,
        }
    }

    /// Cube collider with the given edge length.
    pub fn cube(edge: f32) -> Self {
        Self::new(Vec3::splat(edge))
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    pub fn aabb(&self, position: Vec3) -> (Vec3, Vec3) {
        let center = position + self.offset;
        (center - self.half_extents, center + self.half_extents)
    }

    /// AABB vs AABB overlap test against another collider at a different position.
    pub fn overlaps(&self, position: Vec3, other: &Self, other_position: Vec3) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.cmplt(max_b).all() && max_a.cmpgt(min_b).all()
    }

    /// Point containment in world space.
    pub fn contains_point(&self, position: Vec3, point: Vec3) -> bool {
        let (min, max) = self.aabb(position);
        point.cmpge(min).all() && point.cmple(max).all()
    }

    /// Lowest Y of the box at `position`.
    pub fn bottom(&self, position: Vec3) -> f32 {
        position.y + self.offset.y - self.half_extents.y
    }
}
