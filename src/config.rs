use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound accepted for the slider range.
pub const MAX_SELECTABLE_MINUTES: u32 = 180;

/// Sound settings. Paths left empty use the built-in cues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// WAV file looped while the countdown runs
    pub ticking: Option<PathBuf>,
    /// WAV file played once when the countdown finishes
    pub bell: Option<PathBuf>,
    /// Master gain, 0.0..=1.0
    pub volume: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            ticking: None,
            bell: None,
            volume: 0.8,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Slider upper bound in minutes
    pub max_minutes: u32,
    /// Duration started by the "Start Pomodoro" action
    pub preset_minutes: u32,
    /// Stop ticking while the window is suspended instead of only muting
    pub pause_countdown_in_background: bool,
    pub sounds: SoundConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_minutes: 60,
            preset_minutes: 25,
            pause_countdown_in_background: false,
            sounds: SoundConfig::default(),
        }
    }
}

impl Config {
    /// Directory: ~/.config/pomodoro/
    fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("pomodoro");
        p
    }

    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from disk, returning defaults if file doesn't exist or is invalid.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let config: Self = match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        config.sanitized()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Clamp every value into the range the UI can represent.
    pub fn sanitized(mut self) -> Self {
        self.max_minutes = self.max_minutes.clamp(1, MAX_SELECTABLE_MINUTES);
        self.preset_minutes = self.preset_minutes.clamp(1, self.max_minutes);
        self.sounds.volume = if self.sounds.volume.is_finite() {
            self.sounds.volume.clamp(0.0, 1.0)
        } else {
            SoundConfig::default().volume
        };
        self
    }
}
