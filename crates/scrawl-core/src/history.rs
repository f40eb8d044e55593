//! Linear undo/redo log over the element collection.

use crate::element::Element;

/// A point-in-time copy of the element collection.
pub type Snapshot = Vec<Element>;

/// Snapshot log plus a cursor.
///
/// Snapshots other than the one at the cursor are never mutated; every
/// non-coalesced commit is an independent copy, which is what keeps
/// undo/redo correct under arbitrary interleavings of draws, moves,
/// and resizes.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Start with a single empty snapshot.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
        }
    }

    /// The snapshot at the cursor; this is what the renderer draws.
    pub fn current(&self) -> &[Element] {
        &self.snapshots[self.cursor]
    }

    /// Record a new state.
    ///
    /// With `coalesce` the snapshot at the cursor is replaced in place;
    /// every intermediate frame of an active drag commits this way so
    /// the log holds one entry per gesture, not one per pointer event.
    /// Without it, anything after the cursor is discarded (the redo
    /// branch dies the moment a genuinely new action lands), the state
    /// is appended, and the cursor advances.
    pub fn commit(&mut self, state: Snapshot, coalesce: bool) {
        if coalesce {
            self.snapshots[self.cursor] = state;
        } else {
            self.snapshots.truncate(self.cursor + 1);
            self.snapshots.push(state);
            self.cursor += 1;
        }
    }

    /// Step the cursor back one snapshot; no-op at the start.
    pub fn undo(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Step the cursor forward one snapshot; no-op at the end.
    pub fn redo(&mut self) {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of snapshots in the log (never zero; the initial empty
    /// snapshot always remains).
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}
