//! Magic bolts (targeted spell effects in flight)

use super::{SpawnError, TrackerServices};
use crate::audio::{LoopingSound, SoundHandle, SoundParams};
use crate::combat::{EffectList, EffectRange, SpellExplosion, SpellInfliction};
use crate::config::ProjectileConfig;
use crate::foundation::math::{
    forward_of, orientation_from_yaw_pitch, segment_point, Quat, Transform, Vec3,
};
use crate::physics::SurfaceHandle;
use crate::scene::{NodeId, VisualAttachment};
use crate::world::ObjectId;
use log::{debug, trace};

/// Inputs for launching a magic bolt
#[derive(Debug, Clone, PartialEq)]
pub struct BoltLaunch {
    /// Item record whose model is the bolt's visual
    pub model: String,
    /// Looping sound cue
    pub sound: String,
    /// Spell or enchantment identifier
    pub spell_id: String,
    /// Multiplier on the base bolt speed
    pub speed: f32,
    /// Whether repeated applications stack
    pub stack: bool,
    /// Full effect list of the spell
    pub effects: EffectList,
    /// Casting actor
    pub caster: ObjectId,
    /// Display name of the source
    pub source_name: String,
}

/// A magic bolt in flight
#[derive(Debug)]
pub struct MagicBoltState {
    caster_id: ObjectId,
    spell_id: String,
    source_name: String,
    speed_multiplier: f32,
    stack: bool,
    /// Target-range effects only
    effects: EffectList,
    transform: Transform,
    sound: LoopingSound,
    visual: VisualAttachment,
}

/// Resolved first contact of a bolt's frame
struct BoltStrike {
    infliction: Option<SpellInfliction>,
    explosion: SpellExplosion,
}

impl MagicBoltState {
    pub(super) fn launch(
        launch: BoltLaunch,
        services: &TrackerServices,
        config: &ProjectileConfig,
    ) -> Result<Self, SpawnError> {
        let (placement, model) = {
            let world = services.world.borrow();
            if world.search_actor(launch.caster).is_none() {
                return Err(SpawnError::UnknownCaster(launch.caster));
            }
            let placement = world
                .actor_placement(launch.caster)
                .ok_or(SpawnError::NoPlacement(launch.caster))?;
            let model = world
                .item_model(&launch.model)
                .ok_or_else(|| SpawnError::MissingModel(launch.model.clone()))?;
            (placement, model)
        };

        let mut position = placement.position;
        position.z += placement.height() * config.bolt_spawn_height_fraction;
        let transform = Transform::from_position_rotation(
            position,
            orientation_from_yaw_pitch(placement.yaw, placement.pitch),
        );

        let visual = VisualAttachment::spawn(&services.scene, transform, &model);
        let sound = LoopingSound::play(
            &services.sound,
            position,
            &launch.sound,
            SoundParams {
                volume: config.bolt_sound_volume,
                pitch: config.bolt_sound_pitch,
            },
        );

        Ok(Self {
            caster_id: launch.caster,
            spell_id: launch.spell_id,
            source_name: launch.source_name,
            speed_multiplier: launch.speed,
            stack: launch.stack,
            effects: launch.effects.only_range(EffectRange::Target),
            transform,
            sound,
            visual,
        })
    }

    /// Casting actor
    pub fn caster_id(&self) -> ObjectId {
        self.caster_id
    }

    /// Spell or enchantment identifier
    pub fn spell_id(&self) -> &str {
        &self.spell_id
    }

    /// Display name of the source
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Multiplier on the base bolt speed
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Whether repeated applications stack
    pub fn stacks(&self) -> bool {
        self.stack
    }

    /// Effects carried by the bolt (target range only)
    pub fn effects(&self) -> &EffectList {
        &self.effects
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Orientation, fixed for the whole flight
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    /// Handle of the looping sound
    pub fn sound_handle(&self) -> SoundHandle {
        self.sound.handle()
    }

    /// Scene node of the visual
    pub fn node(&self) -> NodeId {
        self.visual.node()
    }

    /// Travel speed in units per second
    pub fn speed(&self, config: &ProjectileConfig) -> f32 {
        config.target_spell_max_speed * self.speed_multiplier
    }

    /// Move one frame in a straight line; `true` when it hit something
    fn step(&mut self, services: &TrackerServices, config: &ProjectileConfig, dt: f32) -> bool {
        let direction = forward_of(&self.transform.rotation);
        let from = self.transform.position;
        let to = from + direction * self.speed(config) * dt;

        self.transform.position = to;
        self.sound.set_position(to);
        self.visual.set_position(to);
        self.visual.advance_effects(dt);

        trace!("Bolt '{}' {:?} -> {:?}", self.spell_id, from, to);

        // Only the nearest contact counts; a bolt may strike its own caster.
        let contacts = services.physics.borrow().ray_test(from, to);
        let Some(contact) = contacts.first().copied() else {
            return false;
        };

        let hit_position = segment_point(&from, &to, contact.fraction);
        let strike = self.resolve(services, hit_position, contact.surface);

        let mut combat = services.combat.borrow_mut();
        match strike.infliction {
            Some(infliction) => {
                debug!("Bolt '{}' struck {:?}", self.spell_id, infliction.target);
                combat.inflict(infliction);
            }
            None => debug!("Bolt '{}' struck terrain", self.spell_id),
        }
        combat.explode_spell(strike.explosion);
        true
    }

    fn resolve(
        &self,
        services: &TrackerServices,
        hit_position: Vec3,
        surface: SurfaceHandle,
    ) -> BoltStrike {
        let world = services.world.borrow();
        let struck = world.search_surface(surface);
        let caster = world.search_actor(self.caster_id);

        let infliction = struck.map(|target| SpellInfliction {
            // With the caster gone the struck object is credited with its own cast.
            caster: caster.map_or(target.id, |caster| caster.id),
            target: target.id,
            hit_position,
            spell_id: self.spell_id.clone(),
            source_name: self.source_name.clone(),
            effects: self.effects.clone(),
            range: EffectRange::Target,
            stack: self.stack,
            simultaneous: false,
            skip_duration_check: false,
        });

        BoltStrike {
            infliction,
            explosion: SpellExplosion {
                position: hit_position,
                effects: self.effects.clone(),
                caster: caster.map(|caster| caster.id),
                spell_id: self.spell_id.clone(),
                source_name: self.source_name.clone(),
            },
        }
    }
}

/// Bolt pass: move every bolt and drop the ones that hit
pub(super) fn move_magic_bolts(
    bolts: &mut Vec<MagicBoltState>,
    services: &TrackerServices,
    config: &ProjectileConfig,
    dt: f32,
) -> usize {
    let mut hits = 0;
    bolts.retain_mut(|bolt| {
        let hit = bolt.step(services, config, dt);
        if hit {
            hits += 1;
        }
        !hit
    });
    hits
}
