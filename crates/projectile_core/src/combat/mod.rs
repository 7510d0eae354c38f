//! Combat and spell resolution seam
//!
//! The tracker decides *that* something was hit and by what. Damage rolls,
//! resistances and effect application live behind `CombatResolver`.

mod effects;
mod logging_resolver;

pub use effects::{EffectEntry, EffectList, EffectRange};
pub use logging_resolver::LoggingResolver;

use crate::foundation::math::Vec3;
use crate::world::{ItemRef, ObjectId};

/// A projectile striking an actor
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileImpact {
    /// Actor credited with the shot
    pub attacker: ObjectId,
    /// Actor that was struck
    pub victim: ObjectId,
    /// Launching weapon, live instance when it could be recovered
    pub weapon: ItemRef,
    /// Ammunition or thrown item
    pub ammunition: ItemRef,
    /// Exact impact point on the frame's segment
    pub hit_point: Vec3,
}

/// A bolt applying its effects to the object it struck
#[derive(Debug, Clone, PartialEq)]
pub struct SpellInfliction {
    /// Actor credited with the cast
    pub caster: ObjectId,
    /// Object that was struck
    pub target: ObjectId,
    /// Impact position
    pub hit_position: Vec3,
    /// Spell or enchantment identifier
    pub spell_id: String,
    /// Display name of the source (spell, scroll, wand)
    pub source_name: String,
    /// Effects to apply
    pub effects: EffectList,
    /// Only effects of this range are applied
    pub range: EffectRange,
    /// Whether repeated applications from the same source stack
    pub stack: bool,
    /// Whether this is one of several simultaneous applications
    pub simultaneous: bool,
    /// Whether duration checks are skipped
    pub skip_duration_check: bool,
}

/// Area visuals of a bolt bursting
#[derive(Debug, Clone, PartialEq)]
pub struct SpellExplosion {
    /// Burst position
    pub position: Vec3,
    /// Effects whose visuals play
    pub effects: EffectList,
    /// Caster, if it still exists
    pub caster: Option<ObjectId>,
    /// Spell or enchantment identifier
    pub spell_id: String,
    /// Display name of the source
    pub source_name: String,
}

/// Gameplay consequences of hits
pub trait CombatResolver {
    /// Apply weapon-impact damage from a projectile
    fn projectile_hit(&mut self, impact: ProjectileImpact);

    /// Apply a bolt's effects to the struck object
    fn inflict(&mut self, infliction: SpellInfliction);

    /// Trigger the area spell-explosion visuals
    fn explode_spell(&mut self, explosion: SpellExplosion);
}
