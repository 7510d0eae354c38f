//! Ballistic projectiles (arrows, thrown weapons)

use super::{SpawnError, TrackerServices};
use crate::combat::ProjectileImpact;
use crate::config::{ProjectileConfig, SelfContactPolicy};
use crate::foundation::math::{
    forward_of, rotation_to, segment_point, Quat, Transform, Vec3, REFERENCE_FORWARD,
};
use crate::physics::RayContact;
use crate::scene::{NodeId, VisualAttachment};
use crate::world::{ItemRef, ObjectId, WorldObject, WorldRegistry};
use log::{debug, trace, warn};

/// Inputs for launching a projectile
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileLaunch {
    /// Actor firing the projectile
    pub caster: ObjectId,
    /// Ammunition or thrown item
    pub ammunition: ItemRef,
    /// Launch position
    pub position: Vec3,
    /// Launch orientation; its forward axis is the flight direction
    pub rotation: Quat,
    /// Launching weapon (bow, crossbow, or the thrown item itself)
    pub launcher: ItemRef,
    /// Launch speed
    pub speed: f32,
}

/// A projectile in flight
#[derive(Debug)]
pub struct ProjectileState {
    caster_id: ObjectId,
    /// Recorded by value; the launcher may be unequipped or destroyed mid-flight
    launcher_id: String,
    projectile_id: String,
    velocity: Vec3,
    transform: Transform,
    visual: VisualAttachment,
}

/// What the first relevant contact of a frame turned out to be
enum Strike {
    Terrain,
    Object(ObjectId),
    Actor(ProjectileImpact),
}

impl ProjectileState {
    pub(super) fn launch(
        launch: ProjectileLaunch,
        services: &TrackerServices,
    ) -> Result<Self, SpawnError> {
        let model = {
            let world = services.world.borrow();
            if world.search_actor(launch.caster).is_none() {
                return Err(SpawnError::UnknownCaster(launch.caster));
            }
            world
                .item_model(&launch.ammunition.record_id)
                .ok_or_else(|| SpawnError::MissingModel(launch.ammunition.record_id.clone()))?
        };

        let transform = Transform::from_position_rotation(launch.position, launch.rotation);
        let visual = VisualAttachment::spawn(&services.scene, transform, &model);

        Ok(Self {
            caster_id: launch.caster,
            launcher_id: launch.launcher.record_id,
            projectile_id: launch.ammunition.record_id,
            velocity: forward_of(&launch.rotation) * launch.speed,
            transform,
            visual,
        })
    }

    /// Actor that fired the projectile
    pub fn caster_id(&self) -> ObjectId {
        self.caster_id
    }

    /// Record id of the launching weapon
    pub fn launcher_id(&self) -> &str {
        &self.launcher_id
    }

    /// Record id of the ammunition
    pub fn projectile_id(&self) -> &str {
        &self.projectile_id
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Current orientation, facing the velocity
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    /// Scene node of the visual
    pub fn node(&self) -> NodeId {
        self.visual.node()
    }

    /// Integrate one frame and resolve its contacts; `true` when it hit something
    fn step(&mut self, services: &TrackerServices, config: &ProjectileConfig, dt: f32) -> bool {
        self.velocity.z -= config.projectile_gravity * dt;

        let from = self.transform.position;
        let to = from + self.velocity * dt;

        if let Some(rotation) = rotation_to(&REFERENCE_FORWARD, &self.velocity) {
            self.transform.rotation = rotation;
        }
        self.transform.position = to;
        self.visual.set_pose(to, self.transform.rotation);
        self.visual.advance_effects(dt);

        trace!("Projectile '{}' {:?} -> {:?}", self.projectile_id, from, to);

        let contacts = services.physics.borrow().ray_test(from, to);
        if contacts.is_empty() {
            return false;
        }

        let strike = {
            let world = services.world.borrow();
            self.first_strike(&*world, &contacts, config.self_contact_policy, from, to)
        };

        match strike {
            None => false,
            Some(Strike::Terrain) => {
                debug!("Projectile '{}' struck terrain", self.projectile_id);
                true
            }
            Some(Strike::Object(id)) => {
                debug!("Projectile '{}' struck non-actor {:?}", self.projectile_id, id);
                true
            }
            Some(Strike::Actor(impact)) => {
                services.combat.borrow_mut().projectile_hit(impact);
                true
            }
        }
    }

    /// Pick the first contact that is not the caster itself and resolve it
    fn first_strike(
        &self,
        world: &dyn WorldRegistry,
        contacts: &[RayContact],
        policy: SelfContactPolicy,
        from: Vec3,
        to: Vec3,
    ) -> Option<Strike> {
        for contact in contacts {
            let struck = world.search_surface(contact.surface);
            let caster = world.search_actor(self.caster_id);

            // Right after launch the segment still starts inside the caster.
            if let (Some(struck), Some(caster)) = (struck, caster) {
                if struck.id == caster.id {
                    match policy {
                        SelfContactPolicy::NextContact => continue,
                        SelfContactPolicy::PassThrough => return None,
                    }
                }
            }

            return Some(match struck {
                None => Strike::Terrain,
                Some(object) if !object.is_actor => Strike::Object(object.id),
                Some(victim) => {
                    let hit_point = segment_point(&from, &to, contact.fraction);
                    Strike::Actor(self.impact(world, victim, caster, hit_point))
                }
            });
        }

        None
    }

    fn impact(
        &self,
        world: &dyn WorldRegistry,
        victim: WorldObject,
        caster: Option<WorldObject>,
        hit_point: Vec3,
    ) -> ProjectileImpact {
        // Prefer the live weapon if the caster still holds it.
        let weapon = caster
            .and_then(|caster| world.equipped_ranged_weapon(caster.id))
            .filter(|equipped| equipped.is_record(&self.launcher_id))
            .unwrap_or_else(|| ItemRef::template(self.launcher_id.as_str()));

        let attacker = caster.map_or_else(
            || {
                warn!(
                    "Caster {:?} of '{}' is gone; crediting {:?}",
                    self.caster_id, self.projectile_id, victim.id
                );
                victim.id
            },
            |caster| caster.id,
        );

        ProjectileImpact {
            attacker,
            victim: victim.id,
            weapon,
            ammunition: ItemRef::template(self.projectile_id.as_str()),
            hit_point,
        }
    }
}

/// Ballistic pass: move every projectile and drop the ones that hit
pub(super) fn move_projectiles(
    projectiles: &mut Vec<ProjectileState>,
    services: &TrackerServices,
    config: &ProjectileConfig,
    dt: f32,
) -> usize {
    let mut hits = 0;
    projectiles.retain_mut(|projectile| {
        let hit = projectile.step(services, config, dt);
        if hit {
            hits += 1;
        }
        !hit
    });
    hits
}
