//! Voice pool for headless runs
//!
//! Tracks which looping voices are active and where they are. No audio is
//! produced.

use super::{SoundHandle, SoundParams, SoundService};
use crate::foundation::math::Vec3;
use log::trace;
use slotmap::SlotMap;

/// Information about an active voice
#[derive(Debug, Clone)]
pub struct ActiveVoice {
    /// Sound cue identifier
    pub cue: String,
    /// Current world position
    pub position: Vec3,
    /// Playback parameters
    pub params: SoundParams,
}

/// Simple in-memory voice pool
#[derive(Debug, Default)]
pub struct SoundVoices {
    voices: SlotMap<SoundHandle, ActiveVoice>,
    stopped: usize,
}

impl SoundVoices {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an active voice
    pub fn voice(&self, handle: SoundHandle) -> Option<&ActiveVoice> {
        self.voices.get(handle)
    }

    /// Number of active voices
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Whether nothing is playing
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Voices stopped since construction
    pub fn stopped_count(&self) -> usize {
        self.stopped
    }
}

impl SoundService for SoundVoices {
    fn play_looping_3d(&mut self, position: Vec3, cue: &str, params: SoundParams) -> SoundHandle {
        self.voices.insert(ActiveVoice {
            cue: cue.to_string(),
            position,
            params,
        })
    }

    fn set_position(&mut self, handle: SoundHandle, position: Vec3) {
        if let Some(voice) = self.voices.get_mut(handle) {
            voice.position = position;
        }
    }

    fn stop(&mut self, handle: SoundHandle) {
        if self.voices.remove(handle).is_some() {
            self.stopped += 1;
        } else {
            trace!("stop on released voice {handle:?}");
        }
    }
}
