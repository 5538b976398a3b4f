//! Per-chunk face geometry used for ray intersection

use std::collections::HashMap;

use crate::core::types::Vec3;
use crate::math::{Aabb, Ray};
use super::cell::CellCoord;
use super::chunk::ChunkCoord;
use super::volume::{MapVolume, VoxelVolume};

/// Outward normal of an axis-aligned voxel face.
///
/// Voxel faces are grid-aligned, so every surface normal is one of the six
/// axis directions. The closed enum keeps cell derivation exhaustive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceNormal {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl FaceNormal {
    /// All six face directions
    pub const ALL: [FaceNormal; 6] = [
        FaceNormal::PosX,
        FaceNormal::NegX,
        FaceNormal::PosY,
        FaceNormal::NegY,
        FaceNormal::PosZ,
        FaceNormal::NegZ,
    ];

    /// Unit vector pointing out of the face
    pub fn to_vec3(self) -> Vec3 {
        match self {
            FaceNormal::PosX => Vec3::X,
            FaceNormal::NegX => -Vec3::X,
            FaceNormal::PosY => Vec3::Y,
            FaceNormal::NegY => -Vec3::Y,
            FaceNormal::PosZ => Vec3::Z,
            FaceNormal::NegZ => -Vec3::Z,
        }
    }

    /// Integer step to the neighboring cell across this face
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            FaceNormal::PosX => (1, 0, 0),
            FaceNormal::NegX => (-1, 0, 0),
            FaceNormal::PosY => (0, 1, 0),
            FaceNormal::NegY => (0, -1, 0),
            FaceNormal::PosZ => (0, 0, 1),
            FaceNormal::NegZ => (0, 0, -1),
        }
    }

    /// Index of the axis the face is perpendicular to (0 = x, 1 = y, 2 = z)
    fn axis(self) -> usize {
        match self {
            FaceNormal::PosX | FaceNormal::NegX => 0,
            FaceNormal::PosY | FaceNormal::NegY => 1,
            FaceNormal::PosZ | FaceNormal::NegZ => 2,
        }
    }

    fn is_positive(self) -> bool {
        matches!(self, FaceNormal::PosX | FaceNormal::PosY | FaceNormal::PosZ)
    }
}

/// One exposed voxel face: the owning cell plus the outward normal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelFace {
    pub cell: CellCoord,
    pub normal: FaceNormal,
}

impl VoxelFace {
    /// Intersect a ray with this unit quad.
    ///
    /// Front faces only: a ray approaching from behind the face (or running
    /// parallel to it) misses. Returns the distance along the ray.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let facing = ray.direction.dot(self.normal.to_vec3());
        if facing >= -1e-6 {
            return None;
        }

        let axis = self.normal.axis();
        let min = self.cell.min_corner().to_array();
        let origin = ray.origin.to_array();
        let dir = ray.direction.to_array();

        let plane = if self.normal.is_positive() {
            min[axis] + 1.0
        } else {
            min[axis]
        };
        let t = (plane - origin[axis]) / dir[axis];
        if t <= 1e-6 {
            return None;
        }

        // Hit point must lie within the quad on the two tangent axes
        let p = ray.at(t).to_array();
        for a in 0..3 {
            if a != axis && (p[a] < min[a] || p[a] > min[a] + 1.0) {
                return None;
            }
        }
        Some(t)
    }
}

/// Ray hit against chunk geometry: what an intersection primitive
/// reports back
#[derive(Clone, Copy, Debug)]
pub struct FaceHit {
    /// World-space hit point on the face
    pub point: Vec3,
    /// Distance along the ray
    pub distance: f32,
    /// Outward normal of the struck face
    pub normal: FaceNormal,
}

/// Renderable geometry of one chunk: its exposed voxel faces
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    /// World-space bounds, for the slab-test early out
    pub bounds: Aabb,
    pub faces: Vec<VoxelFace>,
}

impl ChunkMesh {
    /// Nearest front-face intersection with the ray, if any
    pub fn intersect(&self, ray: &Ray) -> Option<FaceHit> {
        ray.intersects_aabb(&self.bounds)?;

        let mut best: Option<FaceHit> = None;
        for face in &self.faces {
            if let Some(distance) = face.intersect(ray) {
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(FaceHit {
                        point: ray.at(distance),
                        distance,
                        normal: face.normal,
                    });
                }
            }
        }
        best
    }

    /// Extract exposed faces from a volume, grouped per chunk.
    ///
    /// A face is exposed when the neighboring cell across it reads empty
    /// (or lies outside the volume). This is the reference mesh source the
    /// engine is tested against; a renderer supplies its own chunk meshes
    /// through the same shape.
    pub fn build(volume: &MapVolume) -> Vec<ChunkMesh> {
        let mut faces_by_chunk: HashMap<ChunkCoord, Vec<VoxelFace>> = HashMap::new();

        for (cell, _) in volume.occupied() {
            for normal in FaceNormal::ALL {
                let (dx, dy, dz) = normal.offset();
                let neighbor = cell.offset(dx, dy, dz);
                let exposed = volume.voxel(neighbor).map_or(true, |v| v.is_empty());
                if exposed {
                    faces_by_chunk
                        .entry(ChunkCoord::from_cell(cell))
                        .or_default()
                        .push(VoxelFace { cell, normal });
                }
            }
        }

        let mut meshes: Vec<ChunkMesh> = faces_by_chunk
            .into_iter()
            .map(|(coord, mut faces)| {
                // Hash map order is arbitrary; sort for reproducible picking
                faces.sort_by_key(|f| (f.cell.x, f.cell.y, f.cell.z, f.normal as u8));
                ChunkMesh {
                    coord,
                    bounds: coord.bounds(),
                    faces,
                }
            })
            .collect();
        meshes.sort_by_key(|m| m.coord);
        meshes
    }
}
