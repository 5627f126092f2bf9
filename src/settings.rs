//! Grid settings
//!
//! Play field size and the presentation cell size, loaded from JSON.

use std::path::Path;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating grid settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("grid dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("cell size must be finite and positive (got {0})")]
    InvalidCellSize(f32),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Play field configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Field width in cells
    pub width: u32,
    /// Field height in cells
    pub height: u32,
    /// Size of one cell in presentation units (pixels)
    pub cell_size: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GridSettings {
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Check that the field is usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SettingsError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default grid settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!(
                    "Loaded grid settings from {}: {}x{} cells",
                    path.display(),
                    settings.width,
                    settings.height
                );
                settings
            }
            Err(e) => {
                log::warn!("{} - using default grid settings", e);
                Self::default()
            }
        }
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Top-left corner of a cell in presentation units
    #[inline]
    pub fn cell_to_pixels(&self, cell: IVec2) -> Vec2 {
        cell.as_vec2() * self.cell_size
    }

    /// Presentation-space point to (fractional) grid-cell units
    #[inline]
    pub fn pixels_to_cell(&self, pixels: Vec2) -> Vec2 {
        pixels / self.cell_size
    }
}
