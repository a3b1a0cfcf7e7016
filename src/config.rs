//! Animation Configuration
//!
//! Construction-time options with the reference defaults. Validation is
//! fatal: nothing is built from a configuration that fails `validate`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::render::{MarkerStyle, TrackStyle};
use crate::{Result, RunmapError};

/// Options controlling the clock rate and the drawing styles
///
/// JSON keys are camelCase (`ticksPerSecond`, `resampleIntervalSeconds`,
/// `trackStrokeWidth`, `trackStroke`, `markerStrokeWidth`, `markerStroke`,
/// `markerRadius`). Missing keys fall back to the defaults; unrecognized
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    /// Scheduled fires per second
    pub ticks_per_second: u32,
    /// Recorded seconds each tick represents; display conversion only,
    /// never used for scheduling
    pub resample_interval_seconds: u32,
    /// Trail stroke width
    pub track_stroke_width: f32,
    /// Trail stroke color
    pub track_stroke: String,
    /// Marker stroke width
    pub marker_stroke_width: f32,
    /// Marker stroke color
    pub marker_stroke: String,
    /// Marker radius
    pub marker_radius: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            ticks_per_second: 15,
            resample_interval_seconds: 30,
            track_stroke_width: 2.0,
            track_stroke: "rgba(74,20,134,0.2)".to_string(),
            marker_stroke_width: 1.0,
            marker_stroke: "black".to_string(),
            marker_radius: 2.0,
        }
    }
}

impl AnimationConfig {
    /// Check every option, failing with `ConfigError` on the first bad one
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_second == 0 {
            return Err(RunmapError::ConfigError(
                "ticksPerSecond must be positive".to_string(),
            ));
        }
        if !self.track_stroke_width.is_finite() || self.track_stroke_width < 0.0 {
            return Err(RunmapError::ConfigError(format!(
                "trackStrokeWidth must be non-negative, got {}",
                self.track_stroke_width
            )));
        }
        if !self.marker_stroke_width.is_finite() || self.marker_stroke_width < 0.0 {
            return Err(RunmapError::ConfigError(format!(
                "markerStrokeWidth must be non-negative, got {}",
                self.marker_stroke_width
            )));
        }
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return Err(RunmapError::ConfigError(format!(
                "markerRadius must be non-negative, got {}",
                self.marker_radius
            )));
        }
        Ok(())
    }

    /// Trail style derived from this configuration
    pub fn track_style(&self) -> TrackStyle {
        TrackStyle {
            stroke: self.track_stroke.clone(),
            width: self.track_stroke_width,
        }
    }

    /// Marker style derived from this configuration
    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle {
            stroke: self.marker_stroke.clone(),
            width: self.marker_stroke_width,
            radius: self.marker_radius,
        }
    }

    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| RunmapError::ConfigError(format!("invalid configuration: {}", e)))
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| {
            RunmapError::ConfigError(format!(
                "failed to read configuration '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&text)
    }
}
