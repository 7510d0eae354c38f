//! Projectile tracker
//!
//! Owns every projectile and magic bolt in flight. Once per simulation tick
//! `advance` moves them, sweeps each frame's displacement through the ray
//! caster and resolves the first relevant contact. A hit entity is removed in
//! the same frame; dropping it releases its scene node and sound.
//!
//! Single-threaded and frame-stepped: spawn, advance and clear are called from
//! the game loop and finish before the next tick.

mod bolt;
mod projectile;


pub use bolt::{BoltLaunch, MagicBoltState};
pub use projectile::{ProjectileLaunch, ProjectileState};

use crate::audio::SharedSound;
use crate::combat::CombatResolver;
use crate::config::{ConfigError, ProjectileConfig};
use crate::physics::RayCaster;
use crate::scene::SharedScene;
use crate::world::{ObjectId, WorldRegistry};
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;

/// World registry shared with the tracker
pub type SharedWorld = Rc<RefCell<dyn WorldRegistry>>;

/// Ray caster shared with the tracker
pub type SharedPhysics = Rc<RefCell<dyn RayCaster>>;

/// Combat resolver shared with the tracker
pub type SharedCombat = Rc<RefCell<dyn CombatResolver>>;

/// Collaborators the tracker calls into
///
/// Handed over at construction; nothing is looked up through global state.
#[derive(Clone)]
pub struct TrackerServices {
    /// Actor, object and item lookups
    pub world: SharedWorld,
    /// Segment collision queries
    pub physics: SharedPhysics,
    /// Scene nodes for visuals
    pub scene: SharedScene,
    /// Positional sound
    pub sound: SharedSound,
    /// Damage and spell resolution
    pub combat: SharedCombat,
}

/// Spawn precondition failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    /// The launching actor does not exist or is not an actor
    #[error("Unknown caster: {0:?}")]
    UnknownCaster(ObjectId),

    /// The caster has no position or stats to launch from
    #[error("Caster {0:?} has no placement")]
    NoPlacement(ObjectId),

    /// The item record has no model to display
    #[error("No model for item record '{0}'")]
    MissingModel(String),
}

/// Hits resolved during one `advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Projectiles removed after a hit
    pub projectile_hits: usize,
    /// Bolts removed after a hit
    pub bolt_hits: usize,
}

impl FrameReport {
    /// Hits across both collections
    pub fn total_hits(&self) -> usize {
        self.projectile_hits + self.bolt_hits
    }
}

/// Tracker of in-flight projectiles and magic bolts
pub struct ProjectileTracker {
    config: ProjectileConfig,
    services: TrackerServices,
    projectiles: Vec<ProjectileState>,
    bolts: Vec<MagicBoltState>,
}

impl ProjectileTracker {
    /// Create an empty tracker
    pub fn new(config: ProjectileConfig, services: TrackerServices) -> Self {
        Self {
            config,
            services,
            projectiles: Vec::new(),
            bolts: Vec::new(),
        }
    }

    /// Create an empty tracker after validating `config`
    pub fn with_config(
        config: ProjectileConfig,
        services: TrackerServices,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, services))
    }

    /// Active configuration
    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    /// Launch a magic bolt from its caster
    ///
    /// The bolt starts at a fraction of the caster's capsule height above its
    /// feet, faces the caster's yaw and pitch, keeps only the target-range
    /// effects and plays its sound on a loop.
    pub fn spawn_magic_bolt(&mut self, launch: BoltLaunch) -> Result<(), SpawnError> {
        let bolt = MagicBoltState::launch(launch, &self.services, &self.config)?;
        debug!(
            "Magic bolt '{}' launched by {:?} at ({:.1}, {:.1}, {:.1})",
            bolt.spell_id(),
            bolt.caster_id(),
            bolt.position().x,
            bolt.position().y,
            bolt.position().z,
        );
        self.bolts.push(bolt);
        Ok(())
    }

    /// Launch a ballistic projectile
    ///
    /// Initial velocity is the forward axis of `launch.rotation` scaled by
    /// `launch.speed`.
    pub fn spawn_projectile(&mut self, launch: ProjectileLaunch) -> Result<(), SpawnError> {
        let projectile = ProjectileState::launch(launch, &self.services)?;
        debug!(
            "Projectile '{}' launched by {:?} at ({:.1}, {:.1}, {:.1})",
            projectile.projectile_id(),
            projectile.caster_id(),
            projectile.position().x,
            projectile.position().y,
            projectile.position().z,
        );
        self.projectiles.push(projectile);
        Ok(())
    }

    /// Advance every tracked entity by `dt` seconds
    ///
    /// Projectiles move before bolts. Each entity is visited once, in launch
    /// order; a hit entity is removed and never touched again.
    pub fn advance(&mut self, dt: f32) -> FrameReport {
        let projectile_hits =
            projectile::move_projectiles(&mut self.projectiles, &self.services, &self.config, dt);
        let bolt_hits = bolt::move_magic_bolts(&mut self.bolts, &self.services, &self.config, dt);
        let report = FrameReport {
            projectile_hits,
            bolt_hits,
        };

        trace!(
            "Frame dt={dt:.4}: {} projectiles, {} bolts in flight, {} hits",
            self.projectiles.len(),
            self.bolts.len(),
            report.total_hits(),
        );
        report
    }

    /// Drop everything in flight, releasing every node and sound
    ///
    /// Used on world teardown and area transitions. Safe to repeat.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }

        debug!(
            "Clearing {} projectiles and {} bolts",
            self.projectiles.len(),
            self.bolts.len()
        );
        self.projectiles.clear();
        self.bolts.clear();
    }

    /// Projectiles in flight
    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Bolts in flight
    pub fn bolt_count(&self) -> usize {
        self.bolts.len()
    }

    /// Whether nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.bolts.is_empty()
    }

    /// Projectiles in launch order
    pub fn projectiles(&self) -> impl Iterator<Item = &ProjectileState> {
        self.projectiles.iter()
    }

    /// Bolts in launch order
    pub fn bolts(&self) -> impl Iterator<Item = &MagicBoltState> {
        self.bolts.iter()
    }
}
