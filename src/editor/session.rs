//! Edit session: turns pointer gestures into brush applications

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::voxel::cell::CellCoord;
use crate::voxel::volume::VoxelVolume;
use crate::voxel::voxel::Voxel;
use super::brush::{Brush, BrushShape};
use super::config::EditorConfig;
use super::history::{EditHistory, HistoryEntry};
use super::targeting::{Raycaster, Target};

/// What a brush application writes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Write the selected voxel into the empty cell in front of the struck face
    #[default]
    Place,
    /// Clear the struck cell
    Remove,
}

/// Pointer gesture state
enum DragState {
    Idle,
    Dragging {
        /// The open history entry accumulating this gesture's changes
        entry: HistoryEntry,
        /// Target cell of the last brush application, for same-cell dedup
        last_target: Option<CellCoord>,
    },
}

/// Read-only state snapshot for UI collaborators.
///
/// Polled after operations instead of pushed through callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EditorState {
    pub editing_enabled: bool,
    pub mode: EditMode,
    pub voxel: Voxel,
    pub brush_size: u32,
    pub brush_shape: BrushShape,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Drives voxel edits from discrete pointer events.
///
/// One gesture runs from pointer down to pointer up; every cell changed by
/// it lands in a single history entry, undone and redone as a unit. The
/// session assumes it is the sole writer of the volume while a gesture is
/// open.
pub struct EditSession {
    enabled: bool,
    mode: EditMode,
    voxel: Voxel,
    brush: Brush,
    max_brush_size: u32,
    drag: DragState,
    history: EditHistory,
}

impl EditSession {
    /// Create a session from a configuration
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            enabled: true,
            mode: EditMode::Place,
            voxel: config.default_voxel,
            brush: Brush::new(config.default_brush_size, config.default_brush_shape),
            max_brush_size: config.max_brush_size.max(1),
            drag: DragState::Idle,
            history: EditHistory::new(config.history_capacity),
        }
    }

    /// Begin a gesture at a screen coordinate.
    ///
    /// Opens a history entry and applies the brush once at the initial
    /// target. A miss still opens the gesture; the entry just stays empty
    /// until a later move hits.
    pub fn pointer_down(
        &mut self,
        screen: Vec2,
        picker: &Raycaster,
        volume: &mut impl VoxelVolume,
    ) {
        if !self.enabled || matches!(self.drag, DragState::Dragging { .. }) {
            return;
        }

        let mut entry = HistoryEntry::new();
        let mut last_target = None;
        if let Some(target) = picker.pick(screen) {
            let cell = self.target_cell(&target);
            self.apply_brush(cell, &mut entry, volume);
            last_target = Some(cell);
        }
        self.drag = DragState::Dragging { entry, last_target };
    }

    /// Continue a gesture.
    ///
    /// Re-targets under the new screen coordinate; if the resolved cell is
    /// the one the brush was last applied to, the move is a no-op. This is
    /// what keeps a held-still cursor from re-touching the same cell every
    /// frame.
    pub fn pointer_move(
        &mut self,
        screen: Vec2,
        picker: &Raycaster,
        volume: &mut impl VoxelVolume,
    ) {
        let DragState::Dragging { mut entry, mut last_target } =
            std::mem::replace(&mut self.drag, DragState::Idle)
        else {
            return;
        };

        if let Some(target) = picker.pick(screen) {
            let cell = self.target_cell(&target);
            if last_target != Some(cell) {
                self.apply_brush(cell, &mut entry, volume);
                last_target = Some(cell);
            }
        }
        self.drag = DragState::Dragging { entry, last_target };
    }

    /// End the gesture, committing its entry if it changed anything.
    /// An empty gesture is discarded silently.
    pub fn pointer_up(&mut self) {
        if let DragState::Dragging { entry, .. } =
            std::mem::replace(&mut self.drag, DragState::Idle)
        {
            self.seal(entry);
        }
    }

    /// Enable or disable editing.
    ///
    /// Disabling mid-drag seals the open gesture; the volume already holds
    /// its writes, so dropping them would desynchronize the history.
    pub fn set_editing(&mut self, enabled: bool) {
        if !enabled {
            self.pointer_up();
        }
        self.enabled = enabled;
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    pub fn set_voxel(&mut self, voxel: Voxel) {
        self.voxel = voxel;
    }

    /// Set the brush edge length, clamped to the configured range
    pub fn set_brush_size(&mut self, size: u32) {
        let clamped = size.clamp(1, self.max_brush_size);
        if clamped != size {
            log::debug!("brush size {size} out of range, clamped to {clamped}");
        }
        self.brush.size = clamped;
    }

    pub fn set_brush_shape(&mut self, shape: BrushShape) {
        self.brush.shape = shape;
    }

    /// Undo the most recent committed gesture.
    /// Rejected while a gesture is open.
    pub fn undo(&mut self, volume: &mut impl VoxelVolume) -> bool {
        if matches!(self.drag, DragState::Dragging { .. }) {
            return false;
        }
        self.history.undo(volume)
    }

    /// Redo the most recently undone gesture.
    /// Rejected while a gesture is open.
    pub fn redo(&mut self, volume: &mut impl VoxelVolume) -> bool {
        if matches!(self.drag, DragState::Dragging { .. }) {
            return false;
        }
        self.history.redo(volume)
    }

    /// Snapshot of the session state for display
    pub fn state(&self) -> EditorState {
        EditorState {
            editing_enabled: self.enabled,
            mode: self.mode,
            voxel: self.voxel,
            brush_size: self.brush.size,
            brush_shape: self.brush.shape,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    /// The cell the current mode edits: the struck cell when removing, the
    /// empty neighbor when placing
    fn target_cell(&self, target: &Target) -> CellCoord {
        match self.mode {
            EditMode::Place => target.place_cell,
            EditMode::Remove => target.remove_cell,
        }
    }

    /// Apply the brush around a center cell, recording changes into the
    /// open entry.
    ///
    /// Each cell is captured at most once per gesture: the first write
    /// records the pre-gesture value, revisits only update the outcome.
    /// A refused read or write skips the cell entirely.
    fn apply_brush(
        &self,
        center: CellCoord,
        entry: &mut HistoryEntry,
        volume: &mut impl VoxelVolume,
    ) {
        let value = match self.mode {
            EditMode::Place => self.voxel,
            EditMode::Remove => Voxel::EMPTY,
        };

        for cell in self.brush.cells(center) {
            match entry.written(cell) {
                Some(prev) => {
                    if prev != value && volume.set_voxel(cell, value) {
                        entry.record(cell, prev, value);
                    }
                }
                None => {
                    let Some(old) = volume.voxel(cell) else {
                        continue;
                    };
                    if old != value && volume.set_voxel(cell, value) {
                        entry.record(cell, old, value);
                    }
                }
            }
        }
    }

    fn seal(&mut self, entry: HistoryEntry) {
        if entry.is_empty() {
            return;
        }
        log::debug!("gesture committed: {} cell(s) changed", entry.len());
        self.history.commit(entry);
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::Camera;
    use crate::core::types::Vec3;
    use crate::voxel::mesh::ChunkMesh;
    use crate::voxel::volume::MapVolume;

    const CENTER: Vec2 = Vec2::new(0.5, 0.5);

    /// Volume with a single ground block at (2,-1,2)
    fn ground_volume() -> MapVolume {
        let mut volume = MapVolume::new();
        volume.set_voxel(CellCoord::new(2, -1, 2), Voxel::new(1));
        volume.take_modified();
        volume
    }

    /// Camera looking straight down at the top face of the cell under `x, z`
    fn camera_over(x: f32, z: f32) -> Camera {
        Camera::look_at(
            Vec3::new(x + 0.5, 10.0, z + 0.5),
            Vec3::new(x + 0.5, -0.5, z + 0.5),
            Vec3::Z,
        )
    }

    fn session_with_voxel(id: u16) -> EditSession {
        let mut session = EditSession::default();
        session.set_voxel(Voxel::new(id));
        session
    }

    /// Counts every write the session issues
    struct CountingVolume {
        inner: MapVolume,
        writes: usize,
    }

    impl VoxelVolume for CountingVolume {
        fn voxel(&self, cell: CellCoord) -> Option<Voxel> {
            self.inner.voxel(cell)
        }

        fn set_voxel(&mut self, cell: CellCoord, value: Voxel) -> bool {
            self.writes += 1;
            self.inner.set_voxel(cell, value)
        }
    }

    #[test]
    fn test_place_gesture_and_undo() {
        // Press over the ground block places voxel 4 into (2,0,2); undo
        // empties it again.
        let mut volume = ground_volume();
        let meshes = ChunkMesh::build(&volume);
        let camera = camera_over(2.0, 2.0);
        let mut session = session_with_voxel(4);

        session.pointer_down(CENTER, &Raycaster::new(&camera, &meshes), &mut volume);
        session.pointer_up();
        assert_eq!(volume.voxel(CellCoord::new(2, 0, 2)), Some(Voxel::new(4)));
        assert!(session.state().can_undo);

        assert!(session.undo(&mut volume));
        assert_eq!(volume.voxel(CellCoord::new(2, 0, 2)), Some(Voxel::EMPTY));

        assert!(session.redo(&mut volume));
        assert_eq!(volume.voxel(CellCoord::new(2, 0, 2)), Some(Voxel::new(4)));
    }

    #[test]
    fn test_remove_gesture_and_undo() {
        let mut volume = ground_volume();
        let meshes = ChunkMesh::build(&volume);
        let camera = camera_over(2.0, 2.0);
        let mut session = session_with_voxel(4);
        session.set_mode(EditMode::Remove);

        session.pointer_down(CENTER, &Raycaster::new(&camera, &meshes), &mut volume);
        session.pointer_up();
        assert_eq!(volume.voxel(CellCoord::new(2, -1, 2)), Some(Voxel::EMPTY));

        assert!(session.undo(&mut volume));
        assert_eq!(volume.voxel(CellCoord::new(2, -1, 2)), Some(Voxel::new(1)));
    }

    #[test]
    fn test_drag_dedup_skips_repeated_cell() {
        let mut volume = CountingVolume {
            inner: ground_volume(),
            writes: 0,
        };
        let meshes = ChunkMesh::build(&volume.inner);
        let camera = camera_over(2.0, 2.0);
        let mut session = session_with_voxel(4);

        let caster = Raycaster::new(&camera, &meshes);
        session.pointer_down(CENTER, &caster, &mut volume);
        let after_press = volume.writes;
        assert_eq!(after_press, 1);

        // Holding still: every move resolves the same place cell
        for _ in 0..3 {
            session.pointer_move(CENTER, &caster, &mut volume);
        }
        session.pointer_up();
        assert_eq!(volume.writes, after_press);
    }

    #[test]
    fn test_drag_spans_cells_in_one_gesture() {
        let mut volume = ground_volume();
        volume.set_voxel(CellCoord::new(5, -1, 5), Voxel::new(1));
        volume.take_modified();
        let meshes = ChunkMesh::build(&volume);
        let mut session = session_with_voxel(4);

        // The view moves between events; the gesture does not care
        let cam_a = camera_over(2.0, 2.0);
        session.pointer_down(CENTER, &Raycaster::new(&cam_a, &meshes), &mut volume);
        let cam_b = camera_over(5.0, 5.0);
        session.pointer_move(CENTER, &Raycaster::new(&cam_b, &meshes), &mut volume);
        session.pointer_up();

        assert_eq!(volume.voxel(CellCoord::new(2, 0, 2)), Some(Voxel::new(4)));
        assert_eq!(volume.voxel(CellCoord::new(5, 0, 5)), Some(Voxel::new(4)));

        // Both cells belong to the same entry
        assert!(session.undo(&mut volume));
        assert_eq!(volume.voxel(CellCoord::new(2, 0, 2)), Some(Voxel::EMPTY));
        assert_eq!(volume.voxel(CellCoord::new(5, 0, 5)), Some(Voxel::EMPTY));
        assert!(!session.state().can_undo);
    }

    #[test]
    fn test_cube_brush_overwrites_and_restores() {
        // 5x1x5 ground slab; a size-3 cube brush centered one cell above it
        // fills air and overwrites ground alike, and undo restores both.
        let mut volume = MapVolume::new();
        for x in 0..5 {
            for z in 0..5 {
                volume.set_voxel(CellCoord::new(x, -1, z), Voxel::new(1));
            }
        }
        volume.take_modified();
        let meshes = ChunkMesh::build(&volume);
        let camera = camera_over(2.0, 2.0);
        let mut session = session_with_voxel(4);
        session.set_brush_size(3);

        session.pointer_down(CENTER, &Raycaster::new(&camera, &meshes), &mut volume);
        session.pointer_up();

        // Brush box spans y in [-1, 1] around the place cell (2,0,2)
        assert_eq!(volume.voxel(CellCoord::new(1, -1, 1)), Some(Voxel::new(4)));
        assert_eq!(volume.voxel(CellCoord::new(3, 1, 3)), Some(Voxel::new(4)));

        assert!(session.undo(&mut volume));
        assert_eq!(volume.voxel(CellCoord::new(1, -1, 1)), Some(Voxel::new(1)));
        assert_eq!(volume.voxel(CellCoord::new(3, 1, 3)), Some(Voxel::EMPTY));
        assert_eq!(volume.voxel(CellCoord::new(2, 0, 2)), Some(Voxel::EMPTY));
    }

    #[test]
    fn test_miss_gesture_discarded() {
        let mut volume = ground_volume();
        let camera = camera_over(2.0, 2.0);
        let empty: Vec<ChunkMesh> = Vec::new();
        let mut session = session_with_voxel(4);

        session.pointer_down(CENTER, &Raycaster::new(&camera, &empty), &mut volume);
        session.pointer_up();
        assert!(!session.state().can_undo);
        assert_eq!(volume.occupied_count(), 1);
    }

    #[test]
    fn test_miss_then_hit_within_gesture() {
        let mut volume = ground_volume();
        let meshes = ChunkMesh::build(&volume);
        let camera = camera_over(2.0, 2.0);
        let empty: Vec<ChunkMesh> = Vec::new();
        let mut session = session_with_voxel(4);

        // Press over nothing, then drag onto the block
        session.pointer_down(CENTER, &Raycaster::new(&camera, &empty), &mut volume);
        session.pointer_move(CENTER, &Raycaster::new(&camera, &meshes), &mut volume);
        session.pointer_up();

        assert_eq!(volume.voxel(CellCoord::new(2, 0, 2)), Some(Voxel::new(4)));
        assert!(session.state().can_undo);
    }

    #[test]
    fn test_disable_mid_drag_commits_partial_gesture() {
        let mut volume = ground_volume();
        let meshes = ChunkMesh::build(&volume);
        let camera = camera_over(2.0, 2.0);
        let mut session = session_with_voxel(4);

        session.pointer_down(CENTER, &Raycaster::new(&camera, &meshes), &mut volume);
        session.set_editing(false);

        // The applied edit is committed, not lost
        let state = session.state();
        assert!(!state.editing_enabled);
        assert!(state.can_undo);

        // Disabled sessions ignore pointer events
        session.pointer_down(CENTER, &Raycaster::new(&camera, &meshes), &mut volume);
        session.pointer_up();
        assert!(session.state().can_undo);
        assert!(session.undo(&mut volume));
        assert!(!session.undo(&mut volume));
    }

    #[test]
    fn test_undo_rejected_while_dragging() {
        let mut volume = ground_volume();
        let meshes = ChunkMesh::build(&volume);
        let camera = camera_over(2.0, 2.0);
        let mut session = session_with_voxel(4);

        session.pointer_down(CENTER, &Raycaster::new(&camera, &meshes), &mut volume);
        assert!(!session.undo(&mut volume));
        assert!(!session.redo(&mut volume));

        session.pointer_up();
        assert!(session.undo(&mut volume));
    }

    #[test]
    fn test_brush_size_clamped_at_setter() {
        let mut session = EditSession::default();

        session.set_brush_size(99);
        assert_eq!(session.state().brush_size, 10);

        session.set_brush_size(0);
        assert_eq!(session.state().brush_size, 1);
    }

    #[test]
    fn test_state_snapshot_reflects_setters() {
        let mut session = EditSession::default();
        let state = session.state();
        assert!(state.editing_enabled);
        assert_eq!(state.mode, EditMode::Place);
        assert!(!state.can_undo);
        assert!(!state.can_redo);

        session.set_mode(EditMode::Remove);
        session.set_brush_shape(BrushShape::Sphere);
        session.set_voxel(Voxel::new(9));

        let state = session.state();
        assert_eq!(state.mode, EditMode::Remove);
        assert_eq!(state.brush_shape, BrushShape::Sphere);
        assert_eq!(state.voxel, Voxel::new(9));
    }
}
