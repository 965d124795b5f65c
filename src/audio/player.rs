use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::cues::{load_wav, synthesize};
use super::mixer::Mixer;
use super::{AudioError, CuePlayer, CueSource, SoundId, StreamId};

/// Rate used to decode cues when no output device could be opened.
const FALLBACK_SAMPLE_RATE: u32 = 44_100;

/// Preloaded samples played through one shared output stream.
pub struct SoundPool {
    sounds: Vec<Arc<Vec<f32>>>,
    mixer: Arc<Mutex<Mixer>>,
    stream: Option<cpal::Stream>,
    sample_rate: u32,
    released: bool,
}

impl SoundPool {
    /// Open the default output device. Without one the pool is silent but usable.
    pub fn open(volume: f32) -> Self {
        let mut pool = Self::detached(volume);
        match open_output_stream(pool.mixer.clone()) {
            Ok((stream, sample_rate)) => {
                log::info!("Audio output running at {sample_rate}Hz");
                pool.stream = Some(stream);
                pool.sample_rate = sample_rate;
            }
            Err(e) => log::warn!("Audio output unavailable, cues will be silent: {e}"),
        }
        pool
    }

    /// A pool with no output stream.
    pub fn detached(volume: f32) -> Self {
        Self {
            sounds: Vec::new(),
            mixer: Arc::new(Mutex::new(Mixer::new(volume))),
            stream: None,
            sample_rate: FALLBACK_SAMPLE_RATE,
            released: false,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn load(&mut self, source: &CueSource) -> Result<SoundId, AudioError> {
        if self.released {
            return Err(AudioError::Released);
        }

        let samples = match source {
            CueSource::Builtin(cue) => synthesize(*cue, self.sample_rate),
            CueSource::Wav(path) => load_wav(path, self.sample_rate)?,
        };

        let id = SoundId(self.sounds.len() as u32);
        self.sounds.push(Arc::new(samples));
        Ok(id)
    }

    fn with_mixer<R>(&self, f: impl FnOnce(&mut Mixer) -> R) -> Option<R> {
        match self.mixer.lock() {
            Ok(mut mixer) => Some(f(&mut mixer)),
            Err(e) => {
                log::error!("Mixer lock poisoned: {e}");
                None
            }
        }
    }
}

impl CuePlayer for SoundPool {
    fn play(&mut self, sound: SoundId, looping: bool) -> Option<StreamId> {
        if self.released {
            log::debug!("Ignoring play of {sound:?} after release");
            return None;
        }
        let samples = self.sounds.get(sound.0 as usize)?.clone();
        let stream = self.with_mixer(|mixer| mixer.start(samples, looping))?;
        log::debug!("Playing {sound:?} as {stream:?} (looping={looping})");
        Some(stream)
    }

    fn stop(&mut self, stream: StreamId) {
        if self.with_mixer(|mixer| mixer.stop(stream)) == Some(true) {
            log::debug!("Stopped {stream:?}");
        }
    }

    fn pause_all(&mut self) {
        let paused = self.with_mixer(|mixer| {
            let playing = mixer.playing_count();
            mixer.pause_all();
            playing
        });
        if let Some(count) = paused.filter(|&n| n > 0) {
            log::debug!("Paused {count} voice(s)");
        }
    }

    fn resume_all(&mut self) {
        self.with_mixer(Mixer::resume_all);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.with_mixer(Mixer::clear);
        self.stream = None;
        self.sounds.clear();
        self.released = true;
        log::info!("Audio resources released");
    }
}

fn open_output_stream(mixer: Arc<Mutex<Mixer>>) -> Result<(cpal::Stream, u32), AudioError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
    let config = device.default_output_config()?;
    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match mixer.lock() {
            Ok(mut mixer) => mixer.render(data, channels),
            Err(_) => data.fill(0.0),
        },
        |err| log::error!("Audio output error: {err}"),
        None,
    )?;

    stream.play()?;
    Ok((stream, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Cue;

    #[test]
    fn builtin_cues_load_at_pool_rate() {
        let mut pool = SoundPool::detached(1.0);
        let ticking = pool.load(&CueSource::Builtin(Cue::Ticking)).unwrap();
        let bell = pool.load(&CueSource::Builtin(Cue::Bell)).unwrap();

        assert_ne!(ticking, bell);
        assert_eq!(pool.sounds[ticking.0 as usize].len(), pool.sample_rate() as usize);
    }

    #[test]
    fn play_stop_and_pause_reach_the_mixer() {
        let mut pool = SoundPool::detached(1.0);
        let ticking = pool.load(&CueSource::Builtin(Cue::Ticking)).unwrap();

        let stream = pool.play(ticking, true).unwrap();
        assert_eq!(pool.mixer.lock().unwrap().playing_count(), 1);

        pool.pause_all();
        assert_eq!(pool.mixer.lock().unwrap().playing_count(), 0);
        pool.resume_all();
        assert_eq!(pool.mixer.lock().unwrap().playing_count(), 1);

        pool.stop(stream);
        assert!(!pool.mixer.lock().unwrap().is_known(stream));
    }

    #[test]
    fn unknown_sound_does_not_play() {
        let mut pool = SoundPool::detached(1.0);
        assert_eq!(pool.play(SoundId(7), false), None);
    }

    #[test]
    fn release_frees_everything_and_blocks_reuse() {
        let mut pool = SoundPool::detached(1.0);
        let bell = pool.load(&CueSource::Builtin(Cue::Bell)).unwrap();
        pool.play(bell, false).unwrap();

        pool.release();
        assert!(pool.sounds.is_empty());
        assert_eq!(pool.mixer.lock().unwrap().playing_count(), 0);
        assert_eq!(pool.play(bell, false), None);
        assert!(matches!(
            pool.load(&CueSource::Builtin(Cue::Bell)),
            Err(AudioError::Released)
        ));

        pool.release();
    }
}
