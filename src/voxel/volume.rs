//! Voxel volume access

use std::collections::HashMap;

use super::cell::CellCoord;
use super::chunk::ChunkCoord;
use super::voxel::Voxel;

/// Read/write access to voxel storage.
///
/// This is the interface the editing engine drives; the storage itself
/// (dense arrays, octrees, anything) belongs to the collaborator behind it.
/// `voxel` returns None outside the volume, and `set_voxel` returns false
/// when a write is refused. The engine treats a refused read-modify-write
/// as a no-op and records no history for that cell.
pub trait VoxelVolume {
    /// Read the value at a cell, or None if the cell is outside the volume
    fn voxel(&self, cell: CellCoord) -> Option<Voxel>;

    /// Write a value to a cell. Returns false if the write was refused.
    fn set_voxel(&mut self, cell: CellCoord, value: Voxel) -> bool;
}

/// Sparse in-memory volume backed by a hash map.
///
/// Only occupied cells are stored; absent cells read as empty. Modified
/// chunk coordinates are tracked so a meshing collaborator can rebuild
/// exactly the regions an edit touched.
pub struct MapVolume {
    /// Occupied cells only; empty cells are absent
    cells: HashMap<CellCoord, Voxel>,
    /// Inclusive cell bounds, or None for an unbounded volume
    bounds: Option<(CellCoord, CellCoord)>,
    /// Chunks touched since the last `take_modified`
    modified_chunks: Vec<ChunkCoord>,
}

impl MapVolume {
    /// Create a new unbounded empty volume
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            bounds: None,
            modified_chunks: Vec::new(),
        }
    }

    /// Create an empty volume that refuses reads and writes outside the
    /// inclusive `[min, max]` cell box
    pub fn with_bounds(min: CellCoord, max: CellCoord) -> Self {
        Self {
            cells: HashMap::new(),
            bounds: Some((min, max)),
            modified_chunks: Vec::new(),
        }
    }

    fn in_bounds(&self, cell: CellCoord) -> bool {
        match self.bounds {
            None => true,
            Some((min, max)) => {
                cell.x >= min.x && cell.x <= max.x
                    && cell.y >= min.y && cell.y <= max.y
                    && cell.z >= min.z && cell.z <= max.z
            }
        }
    }

    /// Iterate over all occupied cells
    pub fn occupied(&self) -> impl Iterator<Item = (CellCoord, Voxel)> + '_ {
        self.cells.iter().map(|(&cell, &voxel)| (cell, voxel))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Mark a chunk as modified (needs remeshing)
    fn mark_modified(&mut self, coord: ChunkCoord) {
        // Only add if not already in the list
        if !self.modified_chunks.contains(&coord) {
            self.modified_chunks.push(coord);
        }
    }

    /// Take the list of modified chunks and clear the internal list
    pub fn take_modified(&mut self) -> Vec<ChunkCoord> {
        std::mem::take(&mut self.modified_chunks)
    }
}

impl VoxelVolume for MapVolume {
    fn voxel(&self, cell: CellCoord) -> Option<Voxel> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(self.cells.get(&cell).copied().unwrap_or(Voxel::EMPTY))
    }

    fn set_voxel(&mut self, cell: CellCoord, value: Voxel) -> bool {
        if !self.in_bounds(cell) {
            return false;
        }
        let previous = if value.is_empty() {
            self.cells.remove(&cell)
        } else {
            self.cells.insert(cell, value)
        };
        if previous.unwrap_or(Voxel::EMPTY) != value {
            self.mark_modified(ChunkCoord::from_cell(cell));
        }
        true
    }
}

impl Default for MapVolume {
    fn default() -> Self {
        Self::new()
    }
}
