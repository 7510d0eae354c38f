//! # Projectile Core
//!
//! Simulation of everything in flight in the game world: ballistic projectiles
//! (arrows, thrown weapons) and magic bolts (targeted spell effects).
//!
//! ## Features
//!
//! - **Ballistic Integration**: Gravity-affected arrows that turn to face their velocity
//! - **Magic Bolts**: Constant-speed spell carriers with a looping positional sound
//! - **Segment Collision**: Frame displacement tested against a pluggable ray caster
//! - **Scoped Attachments**: Visual nodes and sounds released on every exit path
//! - **Explicit Collaborators**: World lookups, combat and spell resolution behind traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use projectile_core::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let world = Rc::new(RefCell::new(SimpleWorld::new()));
//! let services = TrackerServices {
//!     world: world.clone(),
//!     physics: Rc::new(RefCell::new(SphereRayCaster::new())),
//!     scene: Rc::new(RefCell::new(SceneNodes::new())),
//!     sound: Rc::new(RefCell::new(SoundVoices::new())),
//!     combat: Rc::new(RefCell::new(LoggingResolver::new())),
//! };
//! let mut tracker = ProjectileTracker::new(ProjectileConfig::default(), services);
//!
//! // Once per simulation tick
//! let report = tracker.advance(1.0 / 60.0);
//! assert_eq!(report.total_hits(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod world;
pub mod physics;
pub mod scene;
pub mod audio;
pub mod combat;
pub mod tracker;

pub use tracker::{FrameReport, ProjectileTracker, SpawnError, TrackerServices};

/// Common imports for tracker users
pub mod prelude {
    pub use crate::{
        FrameReport, ProjectileTracker, SpawnError, TrackerServices,
        foundation::math::{Vec3, Quat, Transform},
        config::{Config, ConfigError, ProjectileConfig, SelfContactPolicy},
        world::{WorldRegistry, SimpleWorld, ObjectId, WorldObject, ActorPlacement, ItemRef},
        physics::{RayCaster, RayContact, SphereRayCaster, SurfaceHandle},
        scene::{SceneService, SceneNodes, NodeId, VisualAttachment},
        audio::{SoundService, SoundVoices, SoundHandle, SoundParams, LoopingSound},
        combat::{
            CombatResolver, LoggingResolver, EffectEntry, EffectList, EffectRange,
            ProjectileImpact, SpellInfliction, SpellExplosion,
        },
        tracker::{BoltLaunch, ProjectileLaunch},
    };
}
