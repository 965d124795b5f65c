use std::sync::Arc;

use super::StreamId;

#[derive(Debug)]
struct Voice {
    id: StreamId,
    samples: Arc<Vec<f32>>,
    position: usize,
    looping: bool,
    paused: bool,
    finished: bool,
}

/// Sums active voices into the output buffer. Shared with the audio callback.
#[derive(Debug)]
pub struct Mixer {
    voices: Vec<Voice>,
    next_stream: u32,
    volume: f32,
}

impl Mixer {
    pub fn new(volume: f32) -> Self {
        Self {
            voices: Vec::new(),
            next_stream: 0,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn start(&mut self, samples: Arc<Vec<f32>>, looping: bool) -> StreamId {
        self.next_stream = self.next_stream.wrapping_add(1);
        let id = StreamId(self.next_stream);
        let finished = samples.is_empty();
        self.voices.push(Voice {
            id,
            samples,
            position: 0,
            looping,
            paused: false,
            finished,
        });
        id
    }

    /// Returns whether the voice was still known.
    pub fn stop(&mut self, id: StreamId) -> bool {
        let before = self.voices.len();
        self.voices.retain(|v| v.id != id);
        self.voices.len() != before
    }

    pub fn pause_all(&mut self) {
        for voice in &mut self.voices {
            voice.paused = true;
        }
    }

    pub fn resume_all(&mut self) {
        for voice in &mut self.voices {
            voice.paused = false;
        }
    }

    pub fn clear(&mut self) {
        self.voices.clear();
    }

    /// Voices that are neither paused nor finished.
    pub fn playing_count(&self) -> usize {
        self.voices.iter().filter(|v| !v.paused && !v.finished).count()
    }

    #[cfg(test)]
    pub fn is_known(&self, id: StreamId) -> bool {
        self.voices.iter().any(|v| v.id == id)
    }

    /// Fill an interleaved buffer with `channels` channels.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let mut value = 0.0_f32;
            for voice in self.voices.iter_mut().filter(|v| !v.paused && !v.finished) {
                value += voice.samples[voice.position];
                voice.position += 1;
                if voice.position >= voice.samples.len() {
                    if voice.looping {
                        voice.position = 0;
                    } else {
                        voice.finished = true;
                    }
                }
            }
            frame.fill((value * self.volume).clamp(-1.0, 1.0));
        }
        self.voices.retain(|v| !v.finished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(values: &[f32]) -> Arc<Vec<f32>> {
        Arc::new(values.to_vec())
    }

    #[test]
    fn one_shot_plays_once_then_is_dropped() {
        let mut mixer = Mixer::new(1.0);
        let id = mixer.start(samples(&[0.1, 0.2]), false);

        let mut out = [9.0_f32; 4];
        mixer.render(&mut out, 1);
        assert_eq!(out, [0.1, 0.2, 0.0, 0.0]);
        assert!(!mixer.is_known(id));
        assert_eq!(mixer.playing_count(), 0);
    }

    #[test]
    fn looping_voice_wraps_around() {
        let mut mixer = Mixer::new(1.0);
        mixer.start(samples(&[0.1, 0.2, 0.3]), true);

        let mut out = [0.0_f32; 7];
        mixer.render(&mut out, 1);
        assert_eq!(out, [0.1, 0.2, 0.3, 0.1, 0.2, 0.3, 0.1]);
        assert_eq!(mixer.playing_count(), 1);
    }

    #[test]
    fn frames_are_duplicated_across_channels() {
        let mut mixer = Mixer::new(0.5);
        mixer.start(samples(&[0.4, 0.8]), false);

        let mut out = [0.0_f32; 4];
        mixer.render(&mut out, 2);
        assert_eq!(out, [0.2, 0.2, 0.4, 0.4]);
    }

    #[test]
    fn mix_is_clamped() {
        let mut mixer = Mixer::new(1.0);
        mixer.start(samples(&[0.9]), true);
        mixer.start(samples(&[0.9]), true);
        mixer.start(samples(&[-0.1]), true);

        let mut out = [0.0_f32; 2];
        mixer.render(&mut out, 1);
        assert_eq!(out, [1.0, 1.0]);
    }

    #[test]
    fn paused_voices_are_silent_and_resume_in_place() {
        let mut mixer = Mixer::new(1.0);
        mixer.start(samples(&[0.1, 0.2, 0.3, 0.4]), false);

        let mut out = [0.0_f32; 2];
        mixer.render(&mut out, 1);
        assert_eq!(out, [0.1, 0.2]);

        mixer.pause_all();
        mixer.render(&mut out, 1);
        assert_eq!(out, [0.0, 0.0]);
        assert_eq!(mixer.playing_count(), 0);

        mixer.resume_all();
        mixer.render(&mut out, 1);
        assert_eq!(out, [0.3, 0.4]);
    }

    #[test]
    fn stop_removes_only_the_given_voice() {
        let mut mixer = Mixer::new(1.0);
        let ticking = mixer.start(samples(&[0.1]), true);
        let bell = mixer.start(samples(&[0.2]), true);

        assert!(mixer.stop(ticking));
        assert!(!mixer.stop(ticking));
        assert!(mixer.is_known(bell));

        let mut out = [0.0_f32; 1];
        mixer.render(&mut out, 1);
        assert_eq!(out, [0.2]);
    }

    #[test]
    fn empty_sample_never_plays() {
        let mut mixer = Mixer::new(1.0);
        mixer.start(samples(&[]), true);
        assert_eq!(mixer.playing_count(), 0);

        let mut out = [0.5_f32; 2];
        mixer.render(&mut out, 1);
        assert_eq!(out, [0.0, 0.0]);
    }
}
