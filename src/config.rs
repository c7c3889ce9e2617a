//! Typed configuration for form controllers
//!
//! Every timing and wording knob the controller uses lives here with a
//! documented default. A config is validated once when a form is attached.

use crate::animation::Easing;
use crate::error::ConfigError;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration of one multi-step form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Step change animation
    pub transition: TransitionConfig,
    /// Feedback played on a step that failed validation
    pub shake: ShakeConfig,
    /// Error, success and progress animations
    pub feedback: FeedbackConfig,
    /// User-facing texts
    pub messages: Messages,
    /// Name of the anti-spam field; an empty name disables the check
    pub honeypot_field: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            shake: ShakeConfig::default(),
            feedback: FeedbackConfig::default(),
            messages: Messages::default(),
            honeypot_field: "_gotcha".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Outgoing step fade-out, 200 ms
    pub exit_ms: u64,
    /// Incoming step fade-in, 300 ms
    pub enter_ms: u64,
    /// Horizontal slide distance in pixels, 20
    pub offset_px: f32,
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            exit_ms: 200,
            enter_ms: 300,
            offset_px: 20.0,
            easing: Easing::QuadOut,
        }
    }
}

impl TransitionConfig {
    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }

    pub fn enter(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Peak horizontal displacement in pixels, 10
    pub amplitude_px: f32,
    /// Left/right swings, 2
    pub cycles: u32,
    /// Total duration, 400 ms
    pub duration_ms: u64,
    pub easing: Easing,
}

/// Upper bound on `shake.cycles`
pub const MAX_SHAKE_CYCLES: u32 = 16;

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            amplitude_px: 10.0,
            cycles: 2,
            duration_ms: 400,
            easing: Easing::CubicInOut,
        }
    }
}

impl ShakeConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Keyframes of the horizontal shake, ending at rest
    pub fn keyframes(&self) -> Vec<f32> {
        let a = self.amplitude_px;
        let mut frames: Vec<f32> = (0..self.cycles).flat_map(|_| [-a, a]).collect();
        frames.push(0.0);
        frames
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Field error fade-in, 300 ms
    pub error_fade_ms: u64,
    /// Field error drop-in distance in pixels, 5
    pub error_offset_px: f32,
    /// Success view entrance, 500 ms
    pub success_enter_ms: u64,
    /// Success view rise distance in pixels, 20
    pub success_offset_px: f32,
    /// Progress indicator fade when it comes back after a reset, 300 ms
    pub progress_fade_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            error_fade_ms: 300,
            error_offset_px: 5.0,
            success_enter_ms: 500,
            success_offset_px: 20.0,
            progress_fade_ms: 300,
        }
    }
}

impl FeedbackConfig {
    pub fn error_fade(&self) -> Duration {
        Duration::from_millis(self.error_fade_ms)
    }

    pub fn success_enter(&self) -> Duration {
        Duration::from_millis(self.success_enter_ms)
    }

    pub fn progress_fade(&self) -> Duration {
        Duration::from_millis(self.progress_fade_ms)
    }
}

/// Texts shown to the person filling the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub required: String,
    pub invalid_email: String,
    pub invalid_phone: String,
    pub must_accept: String,
    /// `{min}` is replaced by the declared minimum length
    pub min_length: String,
    pub select_option: String,
    pub submission_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "field required".to_string(),
            invalid_email: "invalid email".to_string(),
            invalid_phone: "invalid phone".to_string(),
            must_accept: "must accept to continue".to_string(),
            min_length: "minimum {min} characters".to_string(),
            select_option: "please select an option".to_string(),
            submission_failed: "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "stepform", "stepform")
            .map(|dirs| dirs.config_dir().join("form.json"))
    }

    /// Load configuration from the user config dir, defaults when absent
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: FormConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the user config dir
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let numbers = [
            ("transition.offset_px", self.transition.offset_px),
            ("shake.amplitude_px", self.shake.amplitude_px),
            ("feedback.error_offset_px", self.feedback.error_offset_px),
            ("feedback.success_offset_px", self.feedback.success_offset_px),
        ];
        for (field, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidNumber { field, value });
            }
        }
        if self.shake.cycles == 0 {
            return Err(ConfigError::NoShakeCycles);
        }
        if self.shake.cycles > MAX_SHAKE_CYCLES {
            return Err(ConfigError::TooManyShakeCycles {
                cycles: self.shake.cycles,
                max: MAX_SHAKE_CYCLES,
            });
        }

        let m = &self.messages;
        let texts = [
            ("required", &m.required),
            ("invalid_email", &m.invalid_email),
            ("invalid_phone", &m.invalid_phone),
            ("must_accept", &m.must_accept),
            ("min_length", &m.min_length),
            ("select_option", &m.select_option),
            ("submission_failed", &m.submission_failed),
        ];
        for (name, text) in texts {
            if text.trim().is_empty() {
                return Err(ConfigError::EmptyMessage(name));
            }
        }
        if !m.min_length.contains("{min}") {
            return Err(ConfigError::MissingMinPlaceholder);
        }
        Ok(())
    }
}
