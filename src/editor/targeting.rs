//! Screen-space ray targeting against chunk meshes

use crate::core::camera::Camera;
use crate::core::types::{Vec2, Vec3};
use crate::voxel::cell::CellCoord;
use crate::voxel::mesh::{ChunkMesh, FaceHit, FaceNormal};

/// Result of one targeting cast.
///
/// `remove_cell` is the occupied cell whose face the ray struck;
/// `place_cell` is the adjacent cell on the outside of that face. Both are
/// derived once per cast and never stored across frames.
#[derive(Clone, Copy, Debug)]
pub struct Target {
    /// World-space hit point on the struck face
    pub point: Vec3,
    /// Distance along the ray
    pub distance: f32,
    /// Outward normal of the struck face
    pub normal: FaceNormal,
    /// The occupied cell whose face was struck
    pub remove_cell: CellCoord,
    /// The empty neighbor in the normal direction
    pub place_cell: CellCoord,
}

impl Target {
    /// Derive both candidate cells from a face hit.
    ///
    /// Half a cell against the normal lands inside the struck cell, half a
    /// cell along it lands inside the neighbor; flooring then yields the
    /// same pair for all six face orientations.
    fn from_hit(hit: FaceHit) -> Self {
        let n = hit.normal.to_vec3();
        Self {
            point: hit.point,
            distance: hit.distance,
            normal: hit.normal,
            remove_cell: CellCoord::from_world(hit.point - n * 0.5),
            place_cell: CellCoord::from_world(hit.point + n * 0.5),
        }
    }
}

/// Casts screen-space rays against one frame's chunk meshes.
///
/// Borrowed per event from the camera and mesh list the renderer maintains.
pub struct Raycaster<'a> {
    camera: &'a Camera,
    meshes: &'a [ChunkMesh],
}

impl<'a> Raycaster<'a> {
    pub fn new(camera: &'a Camera, meshes: &'a [ChunkMesh]) -> Self {
        Self { camera, meshes }
    }

    /// Resolve the targeted cells under a [0,1]^2 screen coordinate.
    ///
    /// Keeps the nearest hit across all chunks. A miss returns None and
    /// means "nothing to edit this frame", never an error.
    pub fn pick(&self, screen: Vec2) -> Option<Target> {
        let ray = self.camera.screen_ray(screen);

        let mut best: Option<FaceHit> = None;
        for mesh in self.meshes {
            if let Some(hit) = mesh.intersect(&ray) {
                if best.map_or(true, |b| hit.distance < b.distance) {
                    best = Some(hit);
                }
            }
        }
        best.map(Target::from_hit)
    }
}
