//! Voxel value type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A single voxel value - an opaque material id, exactly 2 bytes.
///
/// Id 0 is the empty/air voxel; any other id means the cell is occupied
/// with that material. The engine never interprets ids beyond that.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Voxel(u16);

impl Voxel {
    /// Empty/air voxel
    pub const EMPTY: Voxel = Voxel(0);

    /// Create a voxel with the given material id
    pub fn new(id: u16) -> Self {
        Self(id)
    }

    /// Raw material id
    pub fn id(self) -> u16 {
        self.0
    }

    /// Check if voxel is empty (air)
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
