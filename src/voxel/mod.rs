//! Voxel data structures and operations

pub mod voxel;
pub mod cell;
pub mod chunk;
pub mod volume;
pub mod mesh;

pub use cell::CellCoord;
pub use chunk::{ChunkCoord, CHUNK_SIZE};
pub use mesh::{ChunkMesh, FaceHit, FaceNormal, VoxelFace};
pub use volume::{MapVolume, VoxelVolume};
pub use voxel::Voxel;
