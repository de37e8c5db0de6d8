//! Host-facing board configuration.

use serde::{Deserialize, Serialize};

fn default_background_color() -> String {
    "#ffffff".to_owned()
}

fn default_background_gap() -> f64 {
    20.0
}

fn default_width() -> String {
    "100%".to_owned()
}

fn default_height() -> String {
    "500px".to_owned()
}

/// Style parameters the host passes alongside the flow payload.
///
/// Width and height are CSS length strings because the host sizes the
/// container; the engine never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardConfig {
    /// Canvas background color.
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Background grid spacing in pixels.
    #[serde(default = "default_background_gap")]
    pub background_gap: f64,
    /// Container width as a CSS length.
    #[serde(default = "default_width")]
    pub width: String,
    /// Container height as a CSS length.
    #[serde(default = "default_height")]
    pub height: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            background_gap: default_background_gap(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl BoardConfig {
    /// Set the background color.
    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Set the grid spacing.
    #[must_use]
    pub fn with_background_gap(mut self, gap: f64) -> Self {
        self.background_gap = gap;
        self
    }

    /// Set the container width.
    #[must_use]
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = width.into();
        self
    }

    /// Set the container height.
    #[must_use]
    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = height.into();
        self
    }

    /// Copy of this config with the grid gap clamped to 10..=100 and
    /// snapped to the nearest multiple of 5, the range the host editor
    /// offers.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let gap = (self.background_gap.clamp(10.0, 100.0) / 5.0).round() * 5.0;
        Self {
            background_gap: gap,
            ..self.clone()
        }
    }
}
