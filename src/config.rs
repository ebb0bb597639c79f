//! Configuration management for the tracking controller

use crate::constants::{
    DEFAULT_BETA, DEFAULT_D_CUTOFF, DEFAULT_EYE_DEADZONE_DEG, DEFAULT_EYE_MAX_PITCH_DOWN_DEG,
    DEFAULT_EYE_MAX_PITCH_UP_DEG, DEFAULT_EYE_MAX_YAW_DEG, DEFAULT_EYE_SMOOTH_SPEED,
    DEFAULT_GAZE_SPHERE_RADIUS, DEFAULT_HEAD_DEADZONE_DEG, DEFAULT_HEAD_MAX_PITCH_DOWN_DEG,
    DEFAULT_HEAD_MAX_PITCH_UP_DEG, DEFAULT_HEAD_MAX_YAW_DEG, DEFAULT_HEAD_SMOOTH_SPEED,
    DEFAULT_LOOK_AT_DISTANCE, DEFAULT_MIN_CUTOFF, DEFAULT_WEIGHT_TRANSITION_SECS,
    HEAD_CONTRIBUTION, NECK_CONTRIBUTION,
};
use crate::performance::PerformanceLevel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tracking controller configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrackingConfig {
    /// Adaptive filter configuration
    pub filter: FilterConfig,

    /// Eye channel configuration
    pub eye: ChannelConfig,

    /// Head channel configuration
    pub head: ChannelConfig,

    /// Tracking weight configuration
    pub weight: WeightConfig,

    /// Gaze geometry configuration
    pub gaze: GazeConfig,

    /// Initial performance level
    pub performance: PerformanceConfig,
}

/// One-euro filter parameters shared by all four angle filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum cutoff frequency in Hz (lower = smoother at rest)
    pub min_cutoff: f32,

    /// Speed coefficient (higher = less lag during fast motion)
    pub beta: f32,

    /// Derivative cutoff frequency in Hz
    pub d_cutoff: f32,
}

/// Per-channel smoothing and clamp parameters (angles in degrees)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Exponential smoothing speed (1/s)
    pub smooth_speed: f32,

    /// Maximum yaw magnitude in degrees
    pub max_yaw_deg: f32,

    /// Maximum upward pitch in degrees
    pub max_pitch_up_deg: f32,

    /// Maximum downward pitch in degrees
    pub max_pitch_down_deg: f32,

    /// Center dead-zone half-width in degrees
    pub deadzone_deg: f32,
}

/// Tracking weight parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Weight transition duration in seconds
    pub transition_secs: f32,
}

/// Gaze geometry parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazeConfig {
    /// Radius of the gaze sphere centered on the head (world units)
    pub sphere_radius: f32,

    /// Distance from the head at which the eye gaze point sits
    pub look_at_distance: f32,

    /// Neck share of the head turn (0..1)
    pub neck_contribution: f32,

    /// Head share of the head turn (0..1)
    pub head_contribution: f32,
}

/// Performance preset selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Level name: off, low, medium, high
    pub level: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_cutoff: DEFAULT_MIN_CUTOFF,
            beta: DEFAULT_BETA,
            d_cutoff: DEFAULT_D_CUTOFF,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        // Eye defaults; `head_defaults` narrows them
        Self {
            smooth_speed: DEFAULT_EYE_SMOOTH_SPEED,
            max_yaw_deg: DEFAULT_EYE_MAX_YAW_DEG,
            max_pitch_up_deg: DEFAULT_EYE_MAX_PITCH_UP_DEG,
            max_pitch_down_deg: DEFAULT_EYE_MAX_PITCH_DOWN_DEG,
            deadzone_deg: DEFAULT_EYE_DEADZONE_DEG,
        }
    }
}

impl ChannelConfig {
    /// Default head channel: slower and narrower than the eyes
    #[must_use]
    pub fn head_defaults() -> Self {
        Self {
            smooth_speed: DEFAULT_HEAD_SMOOTH_SPEED,
            max_yaw_deg: DEFAULT_HEAD_MAX_YAW_DEG,
            max_pitch_up_deg: DEFAULT_HEAD_MAX_PITCH_UP_DEG,
            max_pitch_down_deg: DEFAULT_HEAD_MAX_PITCH_DOWN_DEG,
            deadzone_deg: DEFAULT_HEAD_DEADZONE_DEG,
        }
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            transition_secs: DEFAULT_WEIGHT_TRANSITION_SECS,
        }
    }
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            sphere_radius: DEFAULT_GAZE_SPHERE_RADIUS,
            look_at_distance: DEFAULT_LOOK_AT_DISTANCE,
            neck_contribution: NECK_CONTRIBUTION,
            head_contribution: HEAD_CONTRIBUTION,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            level: "high".to_string(),
        }
    }
}

impl TrackingConfig {
    /// A config with eye defaults on the eye channel and head defaults on
    /// the head channel
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            head: ChannelConfig::head_defaults(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Parse the configured performance level
    pub fn performance_level(&self) -> Result<PerformanceLevel> {
        match self.performance.level.to_lowercase().as_str() {
            "off" => Ok(PerformanceLevel::Off),
            "low" => Ok(PerformanceLevel::Low),
            "medium" => Ok(PerformanceLevel::Medium),
            "high" => Ok(PerformanceLevel::High),
            other => Err(Error::Config(format!("Unknown performance level: {other}"))),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.filter.min_cutoff <= 0.0 {
            return Err(Error::Config("Filter min_cutoff must be positive".to_string()));
        }
        if self.filter.beta < 0.0 {
            return Err(Error::Config("Filter beta must be non-negative".to_string()));
        }
        if self.filter.d_cutoff <= 0.0 {
            return Err(Error::Config("Filter d_cutoff must be positive".to_string()));
        }

        for (name, channel) in [("eye", &self.eye), ("head", &self.head)] {
            if channel.smooth_speed <= 0.0 {
                return Err(Error::Config(format!("{name} smooth_speed must be positive")));
            }
            if channel.max_yaw_deg <= 0.0 || channel.max_yaw_deg > 90.0 {
                return Err(Error::Config(format!(
                    "{name} max_yaw_deg must be in (0, 90]"
                )));
            }
            if channel.max_pitch_up_deg <= 0.0 || channel.max_pitch_up_deg > 90.0 {
                return Err(Error::Config(format!(
                    "{name} max_pitch_up_deg must be in (0, 90]"
                )));
            }
            if channel.max_pitch_down_deg <= 0.0 || channel.max_pitch_down_deg > 90.0 {
                return Err(Error::Config(format!(
                    "{name} max_pitch_down_deg must be in (0, 90]"
                )));
            }
            if channel.deadzone_deg < 0.0 || channel.deadzone_deg >= channel.max_yaw_deg {
                return Err(Error::Config(format!(
                    "{name} deadzone_deg must be non-negative and below max_yaw_deg"
                )));
            }
        }

        if self.weight.transition_secs <= 0.0 {
            return Err(Error::Config(
                "Weight transition_secs must be positive".to_string(),
            ));
        }
        if self.gaze.sphere_radius <= 0.0 {
            return Err(Error::Config("Gaze sphere_radius must be positive".to_string()));
        }
        if self.gaze.look_at_distance <= 0.0 {
            return Err(Error::Config(
                "Gaze look_at_distance must be positive".to_string(),
            ));
        }
        if self.gaze.neck_contribution < 0.0 || self.gaze.head_contribution < 0.0 {
            return Err(Error::Config(
                "Joint contributions must be non-negative".to_string(),
            ));
        }
        if self.gaze.neck_contribution + self.gaze.head_contribution <= 0.0 {
            return Err(Error::Config(
                "Joint contributions must not both be zero".to_string(),
            ));
        }

        self.performance_level().map(|_| ())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Cursor-follow tracking configuration

# Adaptive filter (shared by all four angle filters)
filter:
  min_cutoff: 1.0
  beta: 0.3
  d_cutoff: 1.0

# Eye channel
eye:
  smooth_speed: 18.0
  max_yaw_deg: 35.0
  max_pitch_up_deg: 25.0
  max_pitch_down_deg: 25.0
  deadzone_deg: 1.5

# Head channel
head:
  smooth_speed: 6.0
  max_yaw_deg: 30.0
  max_pitch_up_deg: 15.0
  max_pitch_down_deg: 20.0
  deadzone_deg: 3.0

# Tracking weight
weight:
  transition_secs: 0.2

# Gaze geometry
gaze:
  sphere_radius: 0.6
  look_at_distance: 0.6
  neck_contribution: 0.6
  head_contribution: 0.4

# Performance level: off, low, medium, high
performance:
  level: "high"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrackingConfig::with_defaults().validate().is_ok());
    }

    #[test]
    fn test_example_config_parses_and_validates() {
        let config: TrackingConfig = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.head.smooth_speed, 6.0);
    }

    #[test]
    fn test_invalid_deadzone_rejected() {
        let mut config = TrackingConfig::with_defaults();
        config.eye.deadzone_deg = config.eye.max_yaw_deg + 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_performance_level_rejected() {
        let mut config = TrackingConfig::with_defaults();
        config.performance.level = "turbo".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join("cursor_follow_config_round_trip.yaml");
        let mut config = TrackingConfig::with_defaults();
        config.gaze.sphere_radius = 0.9;
        config.to_file(&path).unwrap();

        let loaded = TrackingConfig::from_file(&path).unwrap();
        assert_eq!(loaded.gaze.sphere_radius, 0.9);
        assert_eq!(loaded.head.max_yaw_deg, config.head.max_yaw_deg);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(TrackingConfig::from_file("/nonexistent/config.yaml").is_err());
    }

    #[test]
    fn test_performance_level_parsing() {
        let mut config = TrackingConfig::with_defaults();
        config.performance.level = "Low".to_string();
        assert_eq!(config.performance_level().unwrap(), PerformanceLevel::Low);
    }
}
