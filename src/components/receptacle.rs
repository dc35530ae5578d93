//! Sorting receptacle (bin) with a single target category.
//!
//! The receptacle entity carries a trigger [`BoxCollider`](super::boxcollider::BoxCollider).
//! [`crate::systems::receptacle::receptacle_trigger_system`] compares the
//! tangible bodies overlapping the volume against [`Receptacle`]'s occupant
//! set; only bodies that were not inside on the previous tick count as an
//! entry, so each entry is classified exactly once.

use bevy_ecs::prelude::{Component, Entity};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::components::sortable::Category;

/// Result of comparing a body's category with the receptacle target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SortOutcome {
    Correct,
    Wrong,
}

#[derive(Component, Clone, Debug)]
pub struct Receptacle {
    pub target: Category,
    occupants: FxHashSet<Entity>,
}

impl Receptacle {
    pub fn new(target: Category) -> Self {
        Self {
            target,
            occupants: FxHashSet::default(),
        }
    }

    pub fn classify(&self, category: Category) -> SortOutcome {
        if category == self.target {
            SortOutcome::Correct
        } else {
            SortOutcome::Wrong
        }
    }

    /// Record `entity` as inside. Returns `true` if it was not inside before.
    pub fn enter(&mut self, entity: Entity) -> bool {
        self.occupants.insert(entity)
    }

    /// Forget every occupant not in `present`, so leaving and re-entering the
    /// volume counts as a new entry.
    pub fn retain_present(&mut self, present: &FxHashSet<Entity>) {
        self.occupants.retain(|e| present.contains(e));
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.occupants.contains(&entity)
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bevy_ecs::world::World;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn classify_matches_target() {
        let r = Receptacle::new(Category::A);
        assert_eq!(r.classify(Category::A), SortOutcome::Correct);
        assert_eq!(r.classify(Category::B), SortOutcome::Wrong);
    }

    #[test]
    fn enter_reports_only_new_entries() {
        let e = entities(1);
        let mut r = Receptacle::new(Category::B);
        assert!(r.enter(e[0]));
        assert!(!r.enter(e[0]));
        assert_eq!(r.occupant_count(), 1);
    }

    #[test]
    fn leaving_allows_a_new_entry() {
        let e = entities(2);
        let mut r = Receptacle::new(Category::B);
        r.enter(e[0]);
        r.enter(e[1]);
        let present: FxHashSet<Entity> = [e[1]].into_iter().collect();
        r.retain_present(&present);
        assert!(!r.contains(e[0]));
        assert!(r.contains(e[1]));
        assert!(r.enter(e[0]));
    }
}
