//! Scoped ownership of a looping sound

use super::{SoundHandle, SoundParams, SoundService};
use crate::foundation::math::Vec3;
use log::warn;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Sound service shared between the tracker and its bolts
pub type SharedSound = Rc<RefCell<dyn SoundService>>;

/// Exclusively owned looping sound, stopped on drop
pub struct LoopingSound {
    handle: SoundHandle,
    sound: SharedSound,
}

impl LoopingSound {
    /// Start `cue` looping at `position`
    pub fn play(sound: &SharedSound, position: Vec3, cue: &str, params: SoundParams) -> Self {
        let handle = sound.borrow_mut().play_looping_3d(position, cue, params);
        Self {
            handle,
            sound: Rc::clone(sound),
        }
    }

    /// Handle of the playing sound
    pub fn handle(&self) -> SoundHandle {
        self.handle
    }

    /// Move the sound
    pub fn set_position(&self, position: Vec3) {
        self.sound.borrow_mut().set_position(self.handle, position);
    }
}

impl Drop for LoopingSound {
    fn drop(&mut self) {
        match self.sound.try_borrow_mut() {
            Ok(mut sound) => sound.stop(self.handle),
            Err(_) => warn!("Sound service busy while stopping {:?}; voice leaked", self.handle),
        }
    }
}

impl fmt::Debug for LoopingSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopingSound")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundVoices;

    #[test]
    fn test_drop_stops_voice() {
        let voices = Rc::new(RefCell::new(SoundVoices::new()));
        let shared: SharedSound = voices.clone();

        let sound =
            LoopingSound::play(&shared, Vec3::zeros(), "destruction bolt", SoundParams::default());
        sound.set_position(Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(
            voices.borrow().voice(sound.handle()).map(|v| v.position),
            Some(Vec3::new(0.0, 10.0, 0.0))
        );

        drop(sound);
        assert!(voices.borrow().is_empty());
        assert_eq!(voices.borrow().stopped_count(), 1);
    }
}
