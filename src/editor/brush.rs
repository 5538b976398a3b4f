//! Brush shapes and cell enumeration

use serde::{Deserialize, Serialize};

use crate::voxel::cell::CellCoord;

/// Brush footprint shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushShape {
    #[default]
    Cube,
    Sphere,
}

/// Brush parameters: an edge length in cells and a footprint shape.
///
/// Odd sizes are centered on the target cell. Even sizes have no true
/// center cell; the extra slot on each axis goes to the negative side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    /// Edge length in cells, >= 1
    pub size: u32,
    pub shape: BrushShape,
}

impl Brush {
    /// Create a brush; sizes below 1 are raised to 1
    pub fn new(size: u32, shape: BrushShape) -> Self {
        Self {
            size: size.max(1),
            shape,
        }
    }

    /// Enumerate the cells this brush touches around a center cell.
    ///
    /// Iteration is x-major and deterministic. Cube brushes fill the whole
    /// offset box (`size^3` cells); sphere brushes keep offsets whose
    /// center-to-center Euclidean distance is within `(size - 1) / 2`.
    pub fn cells(&self, center: CellCoord) -> Vec<CellCoord> {
        let size = self.size as i32;
        let lo = -(size / 2);
        let hi = (size - 1) / 2;
        let radius = (size - 1) as f32 / 2.0;
        let radius_sq = radius * radius;

        let mut cells = Vec::new();
        for dx in lo..=hi {
            for dy in lo..=hi {
                for dz in lo..=hi {
                    let keep = match self.shape {
                        BrushShape::Cube => true,
                        BrushShape::Sphere => {
                            (dx * dx + dy * dy + dz * dz) as f32 <= radius_sq
                        }
                    };
                    if keep {
                        cells.push(center.offset(dx, dy, dz));
                    }
                }
            }
        }
        cells
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            size: 1,
            shape: BrushShape::Cube,
        }
    }
}
