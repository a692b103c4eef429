/*
 * Configuration Module
 *
 * This module defines FieldConfig, the tunable constants of the particle
 * field. Every field has a default, so a TOML file only needs to name the
 * values it overrides.
 */

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// An sRGB colour with a floating point alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    // Multiply the alpha channel, used to apply per-particle opacity
    pub fn fade(self, opacity: f32) -> Self {
        Self { a: self.a * opacity, ..self }
    }
}

/// One colour stop of a follower's radial glow. `offset` runs from 0 at the
/// centre to 1 at the rim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: RgbaColor,
}

// A soft glow that eases toward the pointer every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerConfig {
    pub smoothing: f32,
    pub radius: f32,
    pub opacity: f32,
    pub gradient: Vec<GradientStop>,
}

impl FollowerConfig {
    // Large follower: slower, more lag
    pub fn primary() -> Self {
        Self {
            smoothing: 0.08,
            radius: 192.0,
            opacity: 0.4,
            gradient: vec![
                GradientStop { offset: 0.0, color: RgbaColor::new(99, 102, 241, 0.5) },
                GradientStop { offset: 0.4, color: RgbaColor::new(168, 85, 247, 0.4) },
                GradientStop { offset: 0.6, color: RgbaColor::new(236, 72, 153, 0.2) },
                GradientStop { offset: 0.8, color: RgbaColor::new(236, 72, 153, 0.0) },
            ],
        }
    }

    // Small follower: faster movement
    pub fn secondary() -> Self {
        Self {
            smoothing: 0.15,
            radius: 128.0,
            opacity: 0.3,
            gradient: vec![
                GradientStop { offset: 0.0, color: RgbaColor::new(236, 72, 153, 0.5) },
                GradientStop { offset: 0.5, color: RgbaColor::new(249, 115, 22, 0.4) },
                GradientStop { offset: 0.7, color: RgbaColor::new(249, 115, 22, 0.0) },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub max_particles: usize,
    pub area_per_particle: f32,
    pub attraction_radius: f32,
    pub attraction_strength: f32,
    pub damping: f32,
    pub wrap_margin: f32,
    pub connection_distance: f32,
    pub connection_opacity: f32,
    pub connection_width: f32,
    pub connection_color: RgbaColor,
    pub stroke_width: f32,
    pub palette: Vec<RgbaColor>,
    pub followers: Vec<FollowerConfig>,
    // Fixed seed for reproducible fields; entropy when absent
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: 80,
            area_per_particle: 15_000.0,
            attraction_radius: 150.0,
            attraction_strength: 0.02,
            damping: 0.99,
            wrap_margin: 20.0,
            connection_distance: 120.0,
            connection_opacity: 0.15,
            connection_width: 0.5,
            connection_color: RgbaColor::new(20, 184, 166, 1.0),
            stroke_width: 1.0,
            palette: vec![
                RgbaColor::new(20, 184, 166, 0.6),  // Teal
                RgbaColor::new(59, 130, 246, 0.6),  // Blue
                RgbaColor::new(99, 102, 241, 0.5),  // Indigo
                RgbaColor::new(45, 212, 191, 0.4),  // Teal light
                RgbaColor::new(96, 165, 250, 0.4),  // Blue light
            ],
            followers: vec![FollowerConfig::primary(), FollowerConfig::secondary()],
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("Loaded field config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("area_per_particle", self.area_per_particle),
            ("attraction_radius", self.attraction_radius),
            ("connection_distance", self.connection_distance),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }

        let non_negative = [
            ("wrap_margin", self.wrap_margin),
            ("connection_opacity", self.connection_opacity),
            ("connection_width", self.connection_width),
            ("stroke_width", self.stroke_width),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must contain at least one colour".into()));
        }

        for follower in &self.followers {
            if !(follower.smoothing > 0.0 && follower.smoothing <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "follower smoothing must be in (0, 1], got {}",
                    follower.smoothing
                )));
            }
            if !(follower.radius > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "follower radius must be positive, got {}",
                    follower.radius
                )));
            }
            // Sampling walks the stops in order
            if follower.gradient.windows(2).any(|pair| !(pair[0].offset <= pair[1].offset)) {
                return Err(ConfigError::Invalid(
                    "follower gradient offsets must be ascending".into(),
                ));
            }
        }

        Ok(())
    }
}
