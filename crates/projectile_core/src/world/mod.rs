//! World and actor registry
//!
//! Lookups are answered fresh every frame. Any object may have been removed
//! since the last query, so every lookup returns an `Option` and callers pick
//! a fallback instead of failing.

mod simple_world;

pub use simple_world::SimpleWorld;

use crate::foundation::math::Vec3;
use crate::physics::SurfaceHandle;

/// Stable identifier of a world object (actors included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// A live world object resolved from an id or a collision surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldObject {
    /// Stable identifier
    pub id: ObjectId,
    /// Whether the object is a living actor (NPC, creature, player)
    pub is_actor: bool,
}

impl WorldObject {
    /// An actor
    pub fn actor(id: ObjectId) -> Self {
        Self { id, is_actor: true }
    }

    /// A non-actor object (door, container, static prop)
    pub fn object(id: ObjectId) -> Self {
        Self { id, is_actor: false }
    }
}

/// Where an actor stands and how it is turned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPlacement {
    /// Position of the actor's feet
    pub position: Vec3,
    /// Heading in radians
    pub yaw: f32,
    /// Look pitch in radians
    pub pitch: f32,
    /// Half of the collision capsule's height
    pub half_height: f32,
}

impl ActorPlacement {
    /// Full height of the collision capsule
    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }
}

/// Reference to an item, either a template record or a live inventory instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemRef {
    /// Record identifier (e.g. `"iron arrow"`)
    pub record_id: String,
    /// Live instance, `None` for a throwaway template reference
    pub instance: Option<u64>,
}

impl ItemRef {
    /// Throwaway reference built from a record id
    pub fn template(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            instance: None,
        }
    }

    /// Reference to a live inventory instance
    pub fn instance(record_id: impl Into<String>, instance: u64) -> Self {
        Self {
            record_id: record_id.into(),
            instance: Some(instance),
        }
    }

    /// Record ids compare case-insensitively
    pub fn is_record(&self, record_id: &str) -> bool {
        self.record_id.eq_ignore_ascii_case(record_id)
    }
}

/// World lookups used by the tracker
pub trait WorldRegistry {
    /// Resolve an actor by its stable id
    fn search_actor(&self, id: ObjectId) -> Option<WorldObject>;

    /// Resolve the object owning a collision surface
    ///
    /// `None` means terrain or static geometry.
    fn search_surface(&self, surface: SurfaceHandle) -> Option<WorldObject>;

    /// Placement of an actor able to cast, `None` if it lacks position or stats
    fn actor_placement(&self, id: ObjectId) -> Option<ActorPlacement>;

    /// Model path of an item record, without placing the item in the world
    fn item_model(&self, record_id: &str) -> Option<String>;

    /// Item held in the actor's ranged weapon slot
    fn equipped_ranged_weapon(&self, id: ObjectId) -> Option<ItemRef>;
}
