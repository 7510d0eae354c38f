//! Configuration system
//!
//! Tuning values for in-flight simulation, loadable from TOML or RON.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Value out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What a ballistic projectile does with a contact against its own caster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelfContactPolicy {
    /// Ignore the caster's contact and keep scanning the later contacts of the segment
    #[default]
    NextContact,
    /// Treat the whole frame as a miss once the caster's contact is reached
    PassThrough,
}

/// # Projectile Configuration
///
/// Constants driving ballistic and magic-bolt motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Downward acceleration applied to projectiles (units/s²)
    ///
    /// Kept well below actor gravity since drag is not simulated.
    pub projectile_gravity: f32,
    /// Base travel speed of magic bolts (`fTargetSpellMaxSpeed`)
    pub target_spell_max_speed: f32,
    /// Bolt spawn height as a fraction of the caster's full capsule height
    pub bolt_spawn_height_fraction: f32,
    /// Volume of the looping bolt sound
    pub bolt_sound_volume: f32,
    /// Pitch of the looping bolt sound
    pub bolt_sound_pitch: f32,
    /// Handling of projectile contacts with the projectile's own caster
    pub self_contact_policy: SelfContactPolicy,
}

impl ProjectileConfig {
    /// Actor gravity the projectile gravity is derived from
    pub const ACTOR_GRAVITY: f32 = 627.2;

    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            projectile_gravity: Self::ACTOR_GRAVITY * 0.1,
            target_spell_max_speed: 1000.0,
            bolt_spawn_height_fraction: 0.75,
            bolt_sound_volume: 1.0,
            bolt_sound_pitch: 1.0,
            self_contact_policy: SelfContactPolicy::default(),
        }
    }

    /// Set projectile gravity
    pub fn with_projectile_gravity(mut self, gravity: f32) -> Self {
        self.projectile_gravity = gravity;
        self
    }

    /// Set the base bolt speed
    pub fn with_target_spell_max_speed(mut self, speed: f32) -> Self {
        self.target_spell_max_speed = speed;
        self
    }

    /// Set the self-contact policy
    pub fn with_self_contact_policy(mut self, policy: SelfContactPolicy) -> Self {
        self.self_contact_policy = policy;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.projectile_gravity.is_finite() || self.projectile_gravity < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "projectile_gravity must be finite and non-negative, got {}",
                self.projectile_gravity
            )));
        }

        if !self.target_spell_max_speed.is_finite() || self.target_spell_max_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "target_spell_max_speed must be finite and positive, got {}",
                self.target_spell_max_speed
            )));
        }

        if !(0.0..=1.0).contains(&self.bolt_spawn_height_fraction) {
            return Err(ConfigError::Invalid(format!(
                "bolt_spawn_height_fraction must lie in [0, 1], got {}",
                self.bolt_spawn_height_fraction
            )));
        }

        let sound_ok = |value: f32| value.is_finite() && value >= 0.0;
        if !sound_ok(self.bolt_sound_volume) || !sound_ok(self.bolt_sound_pitch) {
            return Err(ConfigError::Invalid(format!(
                "bolt sound volume and pitch must be finite and non-negative, got {} / {}",
                self.bolt_sound_volume, self.bolt_sound_pitch
            )));
        }

        Ok(())
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ProjectileConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_gravity_is_tenth_of_actor_gravity() {
        let config = ProjectileConfig::default();
        assert_relative_eq!(config.projectile_gravity, 62.72, epsilon = 1e-4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_bolt_speed() {
        let config = ProjectileConfig::default().with_target_spell_max_speed(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_spawn_fraction_out_of_range() {
        let config = ProjectileConfig {
            bolt_spawn_height_fraction: 1.5,
            ..ProjectileConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_bolt_sound() {
        let config = ProjectileConfig {
            bolt_sound_volume: f32::NAN,
            ..ProjectileConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ProjectileConfig {
            bolt_sound_pitch: f32::INFINITY,
            ..ProjectileConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: ProjectileConfig = toml::from_str(
            "target_spell_max_speed = 500.0\nself_contact_policy = \"PassThrough\"\n",
        )
        .unwrap();
        assert_relative_eq!(config.target_spell_max_speed, 500.0);
        assert_eq!(config.self_contact_policy, SelfContactPolicy::PassThrough);
        assert_relative_eq!(config.bolt_spawn_height_fraction, 0.75);
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = std::env::temp_dir().join(format!(
            "projectile_config_{}.ron",
            std::process::id()
        ));
        let path = path.to_string_lossy().into_owned();

        let config = ProjectileConfig::default().with_projectile_gravity(10.0);
        config.save_to_file(&path).unwrap();
        let loaded = ProjectileConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ProjectileConfig::load_from_file("projectiles.json");
        // Missing file reports IO before the extension is looked at.
        assert!(matches!(result, Err(ConfigError::Io(_))));

        let save = ProjectileConfig::default().save_to_file("projectiles.json");
        assert!(matches!(save, Err(ConfigError::UnsupportedFormat(_))));
    }
}
