//! Editor configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::voxel::voxel::Voxel;
use super::brush::BrushShape;

/// Tunable parameters for an editing session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Largest allowed brush edge length in cells
    pub max_brush_size: u32,
    /// Brush edge length a new session starts with
    pub default_brush_size: u32,
    /// Brush shape a new session starts with
    pub default_brush_shape: BrushShape,
    /// Voxel selected when the session starts
    pub default_voxel: Voxel,
    /// Maximum retained history entries; older gestures are evicted
    pub history_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_brush_size: 10,
            default_brush_size: 1,
            default_brush_shape: BrushShape::Cube,
            default_voxel: Voxel::new(1),
            history_capacity: 64,
        }
    }
}

impl EditorConfig {
    /// Load a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| Error::Config(e.to_string()))
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }
}
