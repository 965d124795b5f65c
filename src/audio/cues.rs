use std::f32::consts::PI;
use std::path::Path;

use super::AudioError;

/// The two cues the timer plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// One second of clock "tick ... tock", meant to be looped
    Ticking,
    /// Two seconds of a struck bell fading out
    Bell,
}

/// Render a built-in cue as mono samples at `sample_rate`.
pub fn synthesize(cue: Cue, sample_rate: u32) -> Vec<f32> {
    match cue {
        Cue::Ticking => ticking_loop(sample_rate as f32),
        Cue::Bell => bell(sample_rate as f32),
    }
}

fn ticking_loop(sample_rate: f32) -> Vec<f32> {
    let total_samples = sample_rate as usize;
    let mut samples = vec![0.0_f32; total_samples];

    // (offset in seconds, pitch, amplitude)
    let clicks = [(0.0_f32, 2_000.0_f32, 0.5_f32), (0.5, 1_400.0, 0.35)];
    let click_len = (sample_rate * 0.012) as usize;

    for (offset, freq, amplitude) in clicks {
        let start = (sample_rate * offset) as usize;
        for i in 0..click_len {
            let Some(slot) = samples.get_mut(start + i) else {
                break;
            };
            let t = i as f32 / sample_rate;
            // Sharp exponential decay gives the percussive edge
            let envelope = (-t * 400.0).exp();
            *slot = (2.0 * PI * freq * t).sin() * envelope * amplitude;
        }
    }
    samples
}

fn bell(sample_rate: f32) -> Vec<f32> {
    let duration_secs = 2.0_f32;
    let total_samples = (sample_rate * duration_secs) as usize;

    // Inharmonic partials of a small bell: (ratio, amplitude, decay per second)
    let fundamental = 880.0_f32;
    let partials = [
        (1.0_f32, 0.45_f32, 2.0_f32),
        (2.0, 0.25, 3.0),
        (2.76, 0.15, 4.5),
        (5.4, 0.08, 7.0),
    ];

    (0..total_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let attack = (t / 0.005).min(1.0);
            let value: f32 = partials
                .iter()
                .map(|&(ratio, amplitude, decay)| {
                    (2.0 * PI * fundamental * ratio * t).sin() * amplitude * (-t * decay).exp()
                })
                .sum();
            (value * attack * 0.6).clamp(-1.0, 1.0)
        })
        .collect()
}

/// Decode a WAV file to mono f32 samples at `target_rate`.
pub fn load_wav(path: &Path, target_rate: u32) -> Result<Vec<f32>, AudioError> {
    let wav_error = |source| AudioError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(wav_error)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(wav_error)?,
        hound::SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(wav_error)?
        }
    };

    let mono: Vec<f32> = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    if mono.is_empty() {
        return Err(AudioError::Empty(path.to_path_buf()));
    }

    log::debug!(
        "Decoded {} ({} frames, {}Hz, {} channel(s))",
        path.display(),
        mono.len(),
        spec.sample_rate,
        channels
    );

    Ok(resample(&mono, spec.sample_rate, target_rate))
}

/// Linear-interpolation resampler.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || from_rate == 0 || to_rate == 0 || samples.len() < 2 {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = ((samples.len() as f64) / ratio).round().max(1.0) as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = (pos.floor() as usize).min(last);
            let next = (idx + 1).min(last);
            let frac = (pos - idx as f64) as f32;
            samples[idx] + (samples[next] - samples[idx]) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_wav(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pomodoro-cues-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn builtin_cues_have_expected_length_and_stay_in_range() {
        let ticking = synthesize(Cue::Ticking, 48_000);
        assert_eq!(ticking.len(), 48_000);

        let bell = synthesize(Cue::Bell, 48_000);
        assert_eq!(bell.len(), 96_000);

        for samples in [&ticking, &bell] {
            assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
            assert!(samples.iter().any(|s| s.abs() > 0.1));
        }
    }

    #[test]
    fn ticking_loop_is_mostly_silence_between_clicks() {
        let ticking = synthesize(Cue::Ticking, 44_100);
        let quarter = 44_100 / 4;
        assert!(ticking[quarter..quarter + 100].iter().all(|s| *s == 0.0));
        assert!(ticking[22_050..22_100].iter().any(|s| *s != 0.0));
    }

    #[test]
    fn bell_fades_out() {
        let bell = synthesize(Cue::Bell, 44_100);
        let peak = |range: &[f32]| range.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
        assert!(peak(&bell[..4_410]) > 4.0 * peak(&bell[bell.len() - 4_410..]));
    }

    #[test]
    fn resample_scales_length() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        assert_eq!(resample(&samples, 22_050, 44_100).len(), 200);
        assert_eq!(resample(&samples, 48_000, 24_000).len(), 50);
        assert_eq!(resample(&samples, 44_100, 44_100), samples);
    }

    #[test]
    fn stereo_int_wav_is_downmixed_and_resampled() {
        let path = temp_wav("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..1_000 {
            writer.write_sample(i16::MAX / 2).unwrap();
            writer.write_sample(0_i16).unwrap();
        }
        writer.finalize().unwrap();

        let samples = load_wav(&path, 44_100).unwrap();
        assert_eq!(samples.len(), 2_000);
        assert!(samples.iter().all(|s| (s - 0.25).abs() < 0.01));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn float_wav_keeps_values() {
        let path = temp_wav("float.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..480 {
            writer.write_sample(if i % 2 == 0 { 0.5_f32 } else { -0.5 }).unwrap();
        }
        writer.finalize().unwrap();

        let samples = load_wav(&path, 48_000).unwrap();
        assert_eq!(samples.len(), 480);
        assert_eq!(samples[0], 0.5);
        assert_eq!(samples[1], -0.5);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_and_missing_files_are_errors() {
        let path = temp_wav("empty.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        hound::WavWriter::create(&path, spec).unwrap().finalize().unwrap();

        assert!(matches!(load_wav(&path, 44_100), Err(AudioError::Empty(_))));
        assert!(matches!(
            load_wav(Path::new("/nonexistent/pomodoro.wav"), 44_100),
            Err(AudioError::Wav { .. })
        ));

        std::fs::remove_file(&path).unwrap();
    }
}
