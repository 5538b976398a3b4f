//! Gesture-scoped undo/redo history

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use crate::voxel::cell::CellCoord;
use crate::voxel::volume::VoxelVolume;
use crate::voxel::voxel::Voxel;

/// One recorded cell mutation: the value before the gesture first touched
/// the cell, and the value the gesture left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub cell: CellCoord,
    pub old: Voxel,
    pub new: Voxel,
}

/// The changes belonging to one gesture, undone and redone as a unit.
///
/// While the gesture is open the entry deduplicates by cell: the first
/// touch captures `old`, later writes to the same cell only update `new`.
/// Undo therefore always restores the true gesture-start value.
#[derive(Debug)]
pub struct HistoryEntry {
    changes: Vec<CellChange>,
    touched: HashMap<CellCoord, usize>,
    /// When the gesture opened
    pub timestamp: Instant,
}

impl HistoryEntry {
    /// Open a new empty entry
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
            touched: HashMap::new(),
            timestamp: Instant::now(),
        }
    }

    /// Value this gesture last wrote to the cell, if it touched it
    pub fn written(&self, cell: CellCoord) -> Option<Voxel> {
        self.touched.get(&cell).map(|&i| self.changes[i].new)
    }

    /// Record a write. The first touch of a cell stores `old`; revisits
    /// keep that `old` and only update `new`.
    pub fn record(&mut self, cell: CellCoord, old: Voxel, new: Voxel) {
        match self.touched.get(&cell) {
            Some(&i) => self.changes[i].new = new,
            None => {
                self.touched.insert(cell, self.changes.len());
                self.changes.push(CellChange { cell, old, new });
            }
        }
    }

    /// Whether the gesture changed anything
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed cells
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// The recorded changes in application order
    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }
}

impl Default for HistoryEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded linear undo/redo log of gesture entries.
///
/// Entries below the cursor are undoable, entries at and above it are
/// redoable. Committing truncates the redo tail; exceeding capacity evicts
/// the oldest entry, which becomes unrecoverable.
#[derive(Debug)]
pub struct EditHistory {
    entries: VecDeque<HistoryEntry>,
    /// Number of undoable entries; the redo tail starts here
    cursor: usize,
    capacity: usize,
}

impl EditHistory {
    /// Create a history retaining at most `capacity` gestures
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Append a sealed gesture entry, discarding any redo tail first.
    /// Empty entries are dropped.
    pub fn commit(&mut self, entry: HistoryEntry) {
        if entry.is_empty() {
            return;
        }
        self.entries.truncate(self.cursor);
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
            self.cursor -= 1;
        }
        self.entries.push_back(entry);
        self.cursor = self.entries.len();
    }

    /// Undo the most recent gesture, replaying its old values in reverse
    /// application order. Returns false when there is nothing to undo.
    pub fn undo(&mut self, volume: &mut impl VoxelVolume) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let entry = &self.entries[self.cursor];
        for change in entry.changes.iter().rev() {
            volume.set_voxel(change.cell, change.old);
        }
        log::debug!("undo: restored {} cell(s)", entry.len());
        true
    }

    /// Redo the next gesture, replaying its new values in application
    /// order. Returns false when there is nothing to redo.
    pub fn redo(&mut self, volume: &mut impl VoxelVolume) -> bool {
        if self.cursor == self.entries.len() {
            return false;
        }
        let entry = &self.entries[self.cursor];
        for change in entry.changes.iter() {
            volume.set_voxel(change.cell, change.new);
        }
        log::debug!("redo: reapplied {} cell(s)", entry.len());
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of retained entries (undoable and redoable)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
