//! Resolver that records and logs every call

use super::{CombatResolver, ProjectileImpact, SpellExplosion, SpellInfliction};
use log::info;

/// Records hits instead of resolving them
///
/// Used by the sandbox and handy as a stand-in while the combat rules are
/// being wired up.
#[derive(Debug, Default)]
pub struct LoggingResolver {
    /// Projectile impacts in call order
    pub impacts: Vec<ProjectileImpact>,
    /// Spell inflictions in call order
    pub inflictions: Vec<SpellInfliction>,
    /// Spell explosions in call order
    pub explosions: Vec<SpellExplosion>,
}

impl LoggingResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Total calls received
    pub fn call_count(&self) -> usize {
        self.impacts.len() + self.inflictions.len() + self.explosions.len()
    }
}

impl CombatResolver for LoggingResolver {
    fn projectile_hit(&mut self, impact: ProjectileImpact) {
        info!(
            "{:?} hit {:?} with '{}' from '{}' at ({:.1}, {:.1}, {:.1})",
            impact.attacker,
            impact.victim,
            impact.ammunition.record_id,
            impact.weapon.record_id,
            impact.hit_point.x,
            impact.hit_point.y,
            impact.hit_point.z,
        );
        self.impacts.push(impact);
    }

    fn inflict(&mut self, infliction: SpellInfliction) {
        info!(
            "{:?} inflicted '{}' ({} effects) on {:?}",
            infliction.caster,
            infliction.spell_id,
            infliction.effects.len(),
            infliction.target,
        );
        self.inflictions.push(infliction);
    }

    fn explode_spell(&mut self, explosion: SpellExplosion) {
        info!(
            "'{}' burst at ({:.1}, {:.1}, {:.1})",
            explosion.spell_id,
            explosion.position.x,
            explosion.position.y,
            explosion.position.z,
        );
        self.explosions.push(explosion);
    }
}
