//! HashMap-backed world registry
//!
//! Sufficient for tests and the sandbox. A real game binds its own object
//! store behind `WorldRegistry`.

use super::{ActorPlacement, ItemRef, ObjectId, WorldObject, WorldRegistry};
use crate::physics::SurfaceHandle;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct ObjectEntry {
    is_actor: bool,
    placement: Option<ActorPlacement>,
    ranged_weapon: Option<ItemRef>,
}

/// Simple in-memory world
#[derive(Debug, Default)]
pub struct SimpleWorld {
    objects: HashMap<ObjectId, ObjectEntry>,
    surfaces: HashMap<SurfaceHandle, ObjectId>,
    /// Keyed by lowercase record id
    item_models: HashMap<String, String>,
}

impl SimpleWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an actor that can cast and shoot
    pub fn add_actor(&mut self, id: ObjectId, placement: ActorPlacement) {
        self.objects.insert(id, ObjectEntry {
            is_actor: true,
            placement: Some(placement),
            ranged_weapon: None,
        });
    }

    /// Add a non-actor object
    pub fn add_object(&mut self, id: ObjectId) {
        self.objects.insert(id, ObjectEntry {
            is_actor: false,
            placement: None,
            ranged_weapon: None,
        });
    }

    /// Remove an object and every surface bound to it
    pub fn remove(&mut self, id: ObjectId) {
        self.objects.remove(&id);
        self.surfaces.retain(|_, owner| *owner != id);
    }

    /// Bind a collision surface to its owning object
    pub fn bind_surface(&mut self, surface: SurfaceHandle, owner: ObjectId) {
        self.surfaces.insert(surface, owner);
    }

    /// Register the model of an item record
    pub fn set_item_model(&mut self, record_id: &str, model: impl Into<String>) {
        self.item_models.insert(record_id.to_ascii_lowercase(), model.into());
    }

    /// Put an item in the actor's ranged weapon slot
    pub fn equip_ranged(&mut self, id: ObjectId, item: ItemRef) {
        if let Some(entry) = self.objects.get_mut(&id) {
            entry.ranged_weapon = Some(item);
        }
    }

    /// Empty the actor's ranged weapon slot
    pub fn unequip_ranged(&mut self, id: ObjectId) {
        if let Some(entry) = self.objects.get_mut(&id) {
            entry.ranged_weapon = None;
        }
    }

    /// Move or turn an actor
    pub fn set_placement(&mut self, id: ObjectId, placement: ActorPlacement) {
        if let Some(entry) = self.objects.get_mut(&id) {
            entry.placement = Some(placement);
        }
    }
}

impl WorldRegistry for SimpleWorld {
    fn search_actor(&self, id: ObjectId) -> Option<WorldObject> {
        self.objects
            .get(&id)
            .filter(|entry| entry.is_actor)
            .map(|_| WorldObject::actor(id))
    }

    fn search_surface(&self, surface: SurfaceHandle) -> Option<WorldObject> {
        let owner = *self.surfaces.get(&surface)?;
        self.objects.get(&owner).map(|entry| WorldObject {
            id: owner,
            is_actor: entry.is_actor,
        })
    }

    fn actor_placement(&self, id: ObjectId) -> Option<ActorPlacement> {
        self.objects
            .get(&id)
            .filter(|entry| entry.is_actor)
            .and_then(|entry| entry.placement)
    }

    fn item_model(&self, record_id: &str) -> Option<String> {
        self.item_models.get(&record_id.to_ascii_lowercase()).cloned()
    }

    fn equipped_ranged_weapon(&self, id: ObjectId) -> Option<ItemRef> {
        self.objects.get(&id)?.ranged_weapon.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn placement() -> ActorPlacement {
        ActorPlacement {
            position: Vec3::zeros(),
            yaw: 0.0,
            pitch: 0.0,
            half_height: 64.0,
        }
    }

    #[test]
    fn test_surface_resolves_to_owner() {
        let mut world = SimpleWorld::new();
        world.add_actor(ObjectId(1), placement());
        world.bind_surface(SurfaceHandle(10), ObjectId(1));

        assert_eq!(
            world.search_surface(SurfaceHandle(10)),
            Some(WorldObject::actor(ObjectId(1)))
        );
        assert_eq!(world.search_surface(SurfaceHandle(11)), None);
    }

    #[test]
    fn test_removed_actor_is_not_found() {
        let mut world = SimpleWorld::new();
        world.add_actor(ObjectId(1), placement());
        world.bind_surface(SurfaceHandle(10), ObjectId(1));
        world.remove(ObjectId(1));

        assert_eq!(world.search_actor(ObjectId(1)), None);
        assert_eq!(world.search_surface(SurfaceHandle(10)), None);
    }

    #[test]
    fn test_objects_are_not_actors() {
        let mut world = SimpleWorld::new();
        world.add_object(ObjectId(2));

        assert_eq!(world.search_actor(ObjectId(2)), None);
        assert_eq!(world.actor_placement(ObjectId(2)), None);
    }

    #[test]
    fn test_item_models_ignore_case() {
        let mut world = SimpleWorld::new();
        world.set_item_model("Iron Arrow", "w/w_arrow01.nif");
        assert_eq!(world.item_model("iron arrow").as_deref(), Some("w/w_arrow01.nif"));
    }
}
