//! Integer cell coordinates

use crate::core::types::Vec3;

/// Integer coordinate identifying one voxel slot in the grid.
///
/// Cells are unit cubes: cell (x, y, z) spans the world-space box
/// [x, x+1) x [y, y+1) x [z, z+1). Equality is exact integer equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    /// Create a new cell coordinate
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell containing a world-space point (component-wise floor)
    pub fn from_world(p: Vec3) -> Self {
        Self {
            x: p.x.floor() as i32,
            y: p.y.floor() as i32,
            z: p.z.floor() as i32,
        }
    }

    /// Cell shifted by the given offset
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// World-space minimum corner of this cell
    pub fn min_corner(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// World-space center of this cell
    pub fn center(self) -> Vec3 {
        self.min_corner() + Vec3::splat(0.5)
    }
}
