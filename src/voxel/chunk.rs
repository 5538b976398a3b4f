//! Chunk grid for grouping cells into meshable regions

use crate::core::types::Vec3;
use crate::math::Aabb;
use super::cell::CellCoord;

/// Number of cells along each chunk axis
pub const CHUNK_SIZE: i32 = 16;

/// Integer coordinate identifying a chunk in the world grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk containing the given cell (floor division)
    pub fn from_cell(cell: CellCoord) -> Self {
        Self {
            x: cell.x.div_euclid(CHUNK_SIZE),
            y: cell.y.div_euclid(CHUNK_SIZE),
            z: cell.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// World-space bounds of this chunk
    pub fn bounds(&self) -> Aabb {
        let min = Vec3::new(
            (self.x * CHUNK_SIZE) as f32,
            (self.y * CHUNK_SIZE) as f32,
            (self.z * CHUNK_SIZE) as f32,
        );
        Aabb::new(min, min + Vec3::splat(CHUNK_SIZE as f32))
    }
}
