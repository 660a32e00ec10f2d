use serde::Deserialize;
use thiserror::Error;

use crate::Rgb;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` range {min}..{max} is empty, inverted or out of bounds")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("`{0}` must be a positive finite number")]
    NotPositive(&'static str),
    #[error("`spawnBand` must lie within 0..=1, got {0}")]
    SpawnBand(f64),
    #[error("`hueCycleFrames` must be at least 1")]
    HueCycle,
    #[error("unsupported color `{0}`")]
    InvalidColor(String),
}

/// Half-open interval sampled uniformly for per-particle attributes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Range {
        Range { min, max }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub background_count: usize,
    pub tail_length: f64,
    /// Distance outside the top or left edge where background particles start.
    pub spawn_margin: f64,
    /// Fraction of the canvas height used for left-edge spawns.
    pub spawn_band: f64,
    pub spawn_interval_ms: f64,
    pub hue_cycle_frames: u32,
    pub size: Range,
    pub speed: Range,
    pub opacity: Range,
    pub color: Rgb,
    /// CSS background of the canvas element, passed through untouched.
    pub background: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            background_count: 20,
            tail_length: 20.0,
            spawn_margin: 20.0,
            spawn_band: 0.8,
            spawn_interval_ms: 50.0,
            hue_cycle_frames: 60,
            size: Range::new(0.5, 1.5),
            speed: Range::new(0.4, 1.0),
            opacity: Range::new(0.5, 1.0),
            color: Rgb::WHITE,
            background: "rgb(17 24 39)".to_string(),
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f64, field: &'static str| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NotPositive(field))
            }
        };

        positive(self.tail_length, "tailLength")?;
        positive(self.spawn_interval_ms, "spawnIntervalMs")?;

        if !self.spawn_margin.is_finite() || self.spawn_margin < 0.0 {
            return Err(ConfigError::NotPositive("spawnMargin"));
        }

        if !(0.0..=1.0).contains(&self.spawn_band) {
            return Err(ConfigError::SpawnBand(self.spawn_band));
        }

        if self.hue_cycle_frames == 0 {
            return Err(ConfigError::HueCycle);
        }

        self.size.validate("size")?;
        self.speed.validate("speed")?;
        self.opacity.validate("opacity")?;

        // Head radius must stay non-negative and motion must keep heading down-right.
        let bounds = [
            (self.size, "size", self.size.min >= 0.0),
            (self.speed, "speed", self.speed.min > 0.0),
            (self.opacity, "opacity", self.opacity.min >= 0.0 && self.opacity.max <= 1.0),
        ];

        for (range, field, within) in bounds {
            if !within {
                return Err(ConfigError::InvalidRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        Ok(())
    }

    /// Hue reached after `frame` frames, on a cycle of `hue_cycle_frames`.
    pub fn hue_at(&self, frame: u32) -> f64 {
        let cycle = self.hue_cycle_frames.max(1);

        (frame % cycle) as f64 * 360.0 / cycle as f64
    }
}
