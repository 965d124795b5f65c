//! Sound cues: the ticking loop and the completion bell.

mod cues;
mod mixer;
mod player;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::SoundConfig;

pub use cues::Cue;
pub use player::SoundPool;

/// Handle of a loaded sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

/// Handle of one playback of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(pub u32);

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No output device found")]
    NoDevice,

    #[error("Output config unavailable: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("Failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("Failed to read {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("{0} contains no samples")]
    Empty(PathBuf),

    #[error("Audio resources already released")]
    Released,
}

/// Playback port used by the timer controller.
pub trait CuePlayer {
    /// Start a voice. `None` when the sound is unknown or audio was released.
    fn play(&mut self, sound: SoundId, looping: bool) -> Option<StreamId>;
    fn stop(&mut self, stream: StreamId);
    fn pause_all(&mut self);
    fn resume_all(&mut self);
    /// Free every sample and the output device.
    fn release(&mut self);
}

/// Where a cue's samples come from.
#[derive(Debug, Clone, PartialEq)]
pub enum CueSource {
    Builtin(Cue),
    Wav(PathBuf),
}

impl CueSource {
    fn configured(cue: Cue, path: Option<&PathBuf>) -> Self {
        match path {
            Some(path) => Self::Wav(path.clone()),
            None => Self::Builtin(cue),
        }
    }
}

/// The two sounds the timer uses. A missing one plays as silence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueSounds {
    pub ticking: Option<SoundId>,
    pub bell: Option<SoundId>,
}

/// Load the ticking and bell cues into the pool.
pub fn load_cue_sounds(pool: &mut SoundPool, config: &SoundConfig) -> CueSounds {
    let mut load = |cue: Cue, path: Option<&PathBuf>| {
        let source = CueSource::configured(cue, path);
        match pool.load(&source) {
            Ok(id) => {
                log::debug!("Loaded {cue:?} cue from {source:?} at {}Hz", pool.sample_rate());
                Some(id)
            }
            Err(e) => {
                log::warn!("{cue:?} cue unavailable, it will be silent: {e}");
                None
            }
        }
    };

    CueSounds {
        ticking: load(Cue::Ticking, config.ticking.as_ref()),
        bell: load(Cue::Bell, config.bell.as_ref()),
    }
}
