//! Positional sound for in-flight bolts
//!
//! A bolt carries one looping 3D sound for its whole flight. `LoopingSound`
//! stops it when the bolt goes away.

mod looping;
mod voices;

pub use looping::{LoopingSound, SharedSound};
pub use voices::{ActiveVoice, SoundVoices};

use crate::foundation::math::Vec3;

slotmap::new_key_type! {
    /// Handle to a playing sound
    pub struct SoundHandle;
}

/// Playback parameters of a positional sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundParams {
    /// Volume multiplier
    pub volume: f32,
    /// Pitch multiplier
    pub pitch: f32,
}

impl Default for SoundParams {
    fn default() -> Self {
        Self { volume: 1.0, pitch: 1.0 }
    }
}

/// Sound playback used by bolts
pub trait SoundService {
    /// Start a looping sound effect at a world position
    fn play_looping_3d(&mut self, position: Vec3, cue: &str, params: SoundParams) -> SoundHandle;

    /// Move a playing sound
    fn set_position(&mut self, handle: SoundHandle, position: Vec3);

    /// Stop and release a sound
    fn stop(&mut self, handle: SoundHandle);
}
