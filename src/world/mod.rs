//! World objects and harvesting
//!
//! `World` is a plain object list. Queries scan it linearly in insertion
//! order, which is also the tie-break order for interaction targets.

pub mod object;
pub mod depletion;
pub mod session;
pub mod interaction;
pub mod layout;

pub use depletion::{DepletionState, HarvestOutcome, ResourceKind, ResourceTally, YieldTable, harvest};
pub use interaction::{Harvester, InteractionPrompt, InteractionRanges, ObjectQuery, find_target};
pub use object::{ObjectId, ObjectKind, WorldObject};
pub use session::{HarvestSession, SessionEvent, SessionState};

use glam::Vec2;

/// All objects placed in one world
#[derive(Debug, Clone, Default)]
pub struct World {
    pub width: f32,
    pub height: f32,
    objects: Vec<WorldObject>,
    next_id: u32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, objects: Vec::new(), next_id: 0 }
    }

    /// Place a new object and return its id
    pub fn spawn(&mut self, kind: ObjectKind, position: Vec2, variation: u32) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(WorldObject::new(id, kind, position, variation));
        id
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Objects of one kind, in list order
    pub fn of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter().filter(move |o| o.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectQuery for World {
    fn objects_in_range(&self, position: Vec2, radius: f32, kind: ObjectKind) -> Vec<&WorldObject> {
        self.of_kind(kind).filter(|o| o.distance_to(position) < radius).collect()
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_sequential_ids() {
        let mut world = World::new(100.0, 100.0);
        let a = world.spawn(ObjectKind::Rock, Vec2::ZERO, 0);
        let b = world.spawn(ObjectKind::Tree, Vec2::ONE, 1);
        assert_eq!((a, b), (ObjectId(0), ObjectId(1)));
        assert_eq!(world.get(b).unwrap().variation, 1);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_objects_in_range_filters_kind() {
        let mut world = World::new(100.0, 100.0);
        world.spawn(ObjectKind::Rock, Vec2::new(1.0, 0.0), 0);
        let bush = world.spawn(ObjectKind::Bush, Vec2::new(2.0, 0.0), 0);
        world.spawn(ObjectKind::Bush, Vec2::new(90.0, 0.0), 0);
        let found: Vec<ObjectId> = world.objects_in_range(Vec2::ZERO, 10.0, ObjectKind::Bush).iter().map(|o| o.id).collect();
        assert_eq!(found, [bush]);
    }
}
