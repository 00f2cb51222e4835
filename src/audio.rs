//! Audio system
//!
//! The game only decides what to play and how loud. Actual playback belongs
//! to an [`AudioSink`], so the loop runs the same with real speakers, a log
//! or nothing at all.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Cookie jumps
    Jump,
    /// Background music, looped for the life of the game
    Music,
}

impl SoundEffect {
    /// Whether this sound is mixed on the music channel
    pub fn is_music(self) -> bool {
        matches!(self, SoundEffect::Music)
    }
}

/// Fire-and-forget playback
pub trait AudioSink {
    /// Play once at `volume` (0.0 - 1.0)
    fn play(&mut self, sound: SoundEffect, volume: f32);
    /// Play forever at `volume` (0.0 - 1.0)
    fn play_looped(&mut self, sound: SoundEffect, volume: f32);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: SoundEffect, _volume: f32) {}
    fn play_looped(&mut self, _sound: SoundEffect, _volume: f32) {}
}

/// Logs each request at debug level; used by the headless binary
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, sound: SoundEffect, volume: f32) {
        log::debug!("play {:?} at {:.2}", sound, volume);
    }

    fn play_looped(&mut self, sound: SoundEffect, volume: f32) {
        log::debug!("loop {:?} at {:.2}", sound, volume);
    }
}

/// One request seen by a [`RecordingAudio`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Played {
    pub sound: SoundEffect,
    pub volume: f32,
    pub looped: bool,
}

/// Keeps every request for later inspection
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<Played>,
}

impl RecordingAudio {
    pub fn count(&self, sound: SoundEffect) -> usize {
        self.played.iter().filter(|p| p.sound == sound).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: SoundEffect, volume: f32) {
        self.played.push(Played {
            sound,
            volume,
            looped: false,
        });
    }

    fn play_looped(&mut self, sound: SoundEffect, volume: f32) {
        self.played.push(Played {
            sound,
            volume,
            looped: true,
        });
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Take volumes and mute state from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume for a sound's channel
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else if effect.is_music() {
            self.master_volume * self.music_volume
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect once, scaled by `gain` (the sound's own volume)
    pub fn play(&self, sink: &mut dyn AudioSink, effect: SoundEffect, gain: f32) {
        let vol = self.effective_volume(effect) * gain.clamp(0.0, 1.0);
        if vol <= 0.0 {
            return;
        }
        sink.play(effect, vol);
    }

    /// Start a looped sound, scaled by `gain`
    pub fn play_looped(&self, sink: &mut dyn AudioSink, effect: SoundEffect, gain: f32) {
        let vol = self.effective_volume(effect) * gain.clamp(0.0, 1.0);
        if vol <= 0.0 {
            return;
        }
        sink.play_looped(effect, vol);
    }
}
