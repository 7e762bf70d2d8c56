//! # Scene Configuration
//!
//! Loaded once at startup from TOML. Every section is optional and every
//! field defaults to the stock scene:
//!
//! ```toml
//! seed = 42
//!
//! [foliage]
//! count = 15000
//!
//! [ornaments]
//! ease_rate = 3.0
//!
//! [gesture]
//! open_threshold = 0.3
//!
//! [frame]
//! max_frame_delta = 0.1
//! ```

use std::path::Path;

use arbor_gesture::{ControllerConfig, GestureClassifier, OPEN_THRESHOLD};
use arbor_rendering::{CameraParams, FoliageParams, OrnamentParams, PolaroidParams};
use arbor_shared::HAND_SMOOTHING;
use serde::{Deserialize, Serialize};

use crate::error::{ArborError, ArborResult};

/// Gesture input settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Weight of each new hand position sample.
    pub hand_smoothing: f32,
    /// Openness above which a hand counts as open.
    pub open_threshold: f32,
    /// Tracker poll interval, milliseconds.
    pub poll_interval_ms: u64,
    /// Buffered status messages.
    pub status_capacity: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        let controller = ControllerConfig::default();
        Self {
            hand_smoothing: HAND_SMOOTHING,
            open_threshold: OPEN_THRESHOLD,
            poll_interval_ms: controller.poll_interval_ms,
            status_capacity: controller.status_capacity,
        }
    }
}

impl GestureConfig {
    /// Controller settings for this config.
    #[must_use]
    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            poll_interval_ms: self.poll_interval_ms,
            classifier: GestureClassifier::new(self.open_threshold),
            status_capacity: self.status_capacity,
        }
    }
}

/// Frame driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Longest frame delta fed to the animators, seconds.
    pub max_frame_delta: f32,
    /// Frame rate the budget is measured against.
    pub target_fps: u32,
    /// Warn about frames over budget.
    pub enable_timing_logs: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_delta: 0.1,
            target_fps: 60,
            enable_timing_logs: false,
        }
    }
}

/// Full scene configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborConfig {
    /// Seed for population builds. `None` picks one from the clock.
    pub seed: Option<u64>,
    /// Foliage population.
    pub foliage: FoliageParams,
    /// Ornament population.
    pub ornaments: OrnamentParams,
    /// Photo panel population.
    pub polaroids: PolaroidParams,
    /// Camera rig and assembly spin.
    pub camera: CameraParams,
    /// Gesture input.
    pub gesture: GestureConfig,
    /// Frame driver.
    pub frame: FrameConfig,
}

impl ArborConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or the
    /// result fails validation.
    pub fn from_toml_str(text: &str) -> ArborResult<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> ArborResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ArborError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn parse(text: &str, path: &Path) -> ArborResult<Self> {
        let config: Self = toml::from_str(text).map_err(|source| ArborError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects structurally unusable values.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> ArborResult<()> {
        nonzero("foliage.count", self.foliage.count)?;
        nonzero("ornaments.count", self.ornaments.count)?;
        nonzero("polaroids.count", self.polaroids.count)?;

        positive("foliage.ease_rate", self.foliage.ease_rate)?;
        positive("ornaments.ease_rate", self.ornaments.ease_rate)?;
        positive("polaroids.ease_rate", self.polaroids.ease_rate)?;
        positive("camera.ease_rate", self.camera.ease_rate)?;
        positive("frame.max_frame_delta", self.frame.max_frame_delta)?;

        if !(0.0..=1.0).contains(&self.ornaments.gold_share) {
            return Err(invalid("ornaments.gold_share", "must be within [0, 1]"));
        }
        if !(self.gesture.hand_smoothing > 0.0 && self.gesture.hand_smoothing <= 1.0) {
            return Err(invalid("gesture.hand_smoothing", "must be within (0, 1]"));
        }
        if self.gesture.poll_interval_ms == 0 {
            return Err(invalid("gesture.poll_interval_ms", "must be at least 1"));
        }
        if self.frame.target_fps == 0 {
            return Err(invalid("frame.target_fps", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ArborError {
    ArborError::InvalidConfig(format!("{field} {reason}"))
}

fn nonzero(field: &str, value: usize) -> ArborResult<()> {
    if value == 0 {
        return Err(invalid(field, "must be at least 1"));
    }
    Ok(())
}

fn positive(field: &str, value: f32) -> ArborResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}
