use crate::draw::surface::CanvasSurface;
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable full-surface pixel copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Snapshot {
    pub fn of(surface: &CanvasSurface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            pixels: Arc::from(surface.pixels()),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn restore_into(&self, surface: &mut CanvasSurface) -> bool {
        if surface.size() != self.size() || !surface.copy_from(&self.pixels) {
            warn!(
                snapshot = ?self.size(),
                surface = ?surface.size(),
                "history snapshot does not match surface; restore skipped"
            );
            return false;
        }
        true
    }
}

/// Linear undo/redo over full-surface snapshots.
///
/// The entry under the cursor always matches the committed surface pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHistory {
    entries: Vec<Snapshot>,
    cursor: usize,
}

impl SnapshotHistory {
    pub fn new(surface: &CanvasSurface) -> Self {
        Self {
            entries: vec![Snapshot::of(surface)],
            cursor: 0,
        }
    }

    /// Drops any redo branch and appends the current surface.
    pub fn capture(&mut self, surface: &CanvasSurface) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Snapshot::of(surface));
        self.cursor = self.entries.len() - 1;
        debug!(len = self.entries.len(), cursor = self.cursor, "history captured");
    }

    pub fn undo(&mut self, surface: &mut CanvasSurface) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.move_to(self.cursor - 1, surface)
    }

    pub fn redo(&mut self, surface: &mut CanvasSurface) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.move_to(self.cursor + 1, surface)
    }

    /// Replaces all history with a single entry of `surface`.
    pub fn reset(&mut self, surface: &CanvasSurface) {
        self.entries.clear();
        self.entries.push(Snapshot::of(surface));
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    pub fn memory_bytes(&self) -> usize {
        self.entries.iter().map(|entry| entry.pixels.len()).sum()
    }

    fn move_to(&mut self, target: usize, surface: &mut CanvasSurface) -> bool {
        if !self.entries[target].restore_into(surface) {
            return false;
        }
        self.cursor = target;
        debug!(len = self.entries.len(), cursor = self.cursor, "history moved");
        true
    }
}
