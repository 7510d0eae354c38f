//! Headless firing range
//!
//! Wires the in-memory collaborators into a projectile tracker, fires an
//! arrow and a magic bolt at a target actor and logs every frame until both
//! have landed or the frame limit runs out.
//!
//! Usage: `projectile_sandbox [config.toml|config.ron]`

use projectile_core::audio::SoundVoices;
use projectile_core::combat::{EffectEntry, EffectList, EffectRange, LoggingResolver};
use projectile_core::config::{Config, ProjectileConfig};
use projectile_core::foundation::logging;
use projectile_core::foundation::math::{orientation_from_yaw_pitch, utils::deg_to_rad, Vec3};
use projectile_core::physics::{BoundingSphere, GroundPlane, SphereRayCaster, SurfaceHandle};
use projectile_core::scene::SceneNodes;
use projectile_core::tracker::{BoltLaunch, ProjectileLaunch};
use projectile_core::world::{ActorPlacement, ItemRef, ObjectId, SimpleWorld};
use projectile_core::{ProjectileTracker, TrackerServices};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

const ARCHER: ObjectId = ObjectId(1);
const TARGET: ObjectId = ObjectId(2);
const ARCHER_SURFACE: SurfaceHandle = SurfaceHandle(1);
const TARGET_SURFACE: SurfaceHandle = SurfaceHandle(2);
const GROUND_SURFACE: SurfaceHandle = SurfaceHandle(1000);

/// Firing range settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RangeConfig {
    /// Frames to simulate at most
    frames: u32,
    /// Seconds per frame
    dt: f32,
    /// Distance from the archer to the target along +Y
    target_distance: f32,
    /// Arrow launch speed
    arrow_speed: f32,
    /// Arrow elevation in degrees
    arrow_elevation: f32,
    /// Bolt speed multiplier
    bolt_speed: f32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            dt: 1.0 / 60.0,
            target_distance: 400.0,
            arrow_speed: 800.0,
            arrow_elevation: 2.0,
            bolt_speed: 1.0,
        }
    }
}

/// Sandbox configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SandboxConfig {
    projectiles: ProjectileConfig,
    range: RangeConfig,
}

impl Config for SandboxConfig {}

fn load_config() -> Result<SandboxConfig, Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            SandboxConfig::load_from_file(&path)?
        }
        None => {
            log::info!("No configuration file given, using defaults");
            SandboxConfig::default()
        }
    };
    Ok(config)
}

fn build_world(range: &RangeConfig) -> SimpleWorld {
    let mut world = SimpleWorld::new();
    world.add_actor(
        ARCHER,
        ActorPlacement {
            position: Vec3::zeros(),
            yaw: 0.0,
            pitch: 0.0,
            half_height: 64.0,
        },
    );
    world.add_actor(
        TARGET,
        ActorPlacement {
            position: Vec3::new(0.0, range.target_distance, 0.0),
            yaw: std::f32::consts::PI,
            pitch: 0.0,
            half_height: 64.0,
        },
    );
    world.bind_surface(ARCHER_SURFACE, ARCHER);
    world.bind_surface(TARGET_SURFACE, TARGET);
    world.set_item_model("iron arrow", "meshes/w/w_arrow_iron.nif");
    world.set_item_model("VFX_DestructBolt", "meshes/e/magic_bolt_fire.nif");
    world.equip_ranged(ARCHER, ItemRef::instance("long bow", 1));
    world
}

fn build_physics(range: &RangeConfig) -> SphereRayCaster {
    let mut physics = SphereRayCaster::new();
    physics.insert(ARCHER_SURFACE, BoundingSphere::new(Vec3::new(0.0, 0.0, 64.0), 30.0));
    physics.insert(
        TARGET_SURFACE,
        BoundingSphere::new(Vec3::new(0.0, range.target_distance, 64.0), 48.0),
    );
    physics.set_ground(GroundPlane {
        height: 0.0,
        surface: GROUND_SURFACE,
    });
    physics
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    let config = load_config()?;
    let range = config.range.clone();
    log::info!("Firing range: {range:?}");

    let world = Rc::new(RefCell::new(build_world(&range)));
    let scene = Rc::new(RefCell::new(SceneNodes::new()));
    let sound = Rc::new(RefCell::new(SoundVoices::new()));
    let combat = Rc::new(RefCell::new(LoggingResolver::new()));
    let services = TrackerServices {
        world,
        physics: Rc::new(RefCell::new(build_physics(&range))),
        scene: scene.clone(),
        sound: sound.clone(),
        combat: combat.clone(),
    };

    let mut tracker = ProjectileTracker::with_config(config.projectiles, services)?;

    tracker.spawn_projectile(ProjectileLaunch {
        caster: ARCHER,
        ammunition: ItemRef::instance("iron arrow", 2),
        position: Vec3::new(0.0, 0.0, 96.0),
        rotation: orientation_from_yaw_pitch(0.0, -deg_to_rad(range.arrow_elevation)),
        launcher: ItemRef::instance("long bow", 1),
        speed: range.arrow_speed,
    })?;

    tracker.spawn_magic_bolt(BoltLaunch {
        model: "VFX_DestructBolt".to_string(),
        sound: "destruction bolt".to_string(),
        spell_id: "fireball".to_string(),
        speed: range.bolt_speed,
        stack: false,
        effects: EffectList(vec![
            EffectEntry::new(14, EffectRange::Target, 25),
            EffectEntry::new(3, EffectRange::Caster, 10),
        ]),
        caster: ARCHER,
        source_name: "Fireball".to_string(),
    })?;

    for frame in 1..=range.frames {
        let report = tracker.advance(range.dt);
        if report.total_hits() > 0 {
            log::info!(
                "Frame {frame}: {} projectile hits, {} bolt hits",
                report.projectile_hits,
                report.bolt_hits
            );
        }
        if tracker.is_empty() {
            log::info!("Everything landed after {frame} frames");
            break;
        }
    }

    if !tracker.is_empty() {
        log::warn!(
            "Frame limit reached with {} projectiles and {} bolts in flight",
            tracker.projectile_count(),
            tracker.bolt_count()
        );
    }
    tracker.clear();

    let combat = combat.borrow();
    log::info!(
        "Combat calls: {} impacts, {} inflictions, {} explosions",
        combat.impacts.len(),
        combat.inflictions.len(),
        combat.explosions.len()
    );
    log::info!(
        "Scene nodes alive: {}, voices alive: {}",
        scene.borrow().len(),
        sound.borrow().len()
    );
    Ok(())
}
