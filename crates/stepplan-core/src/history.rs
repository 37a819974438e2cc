use crate::item::WorkItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Snapshots retained: the current state plus ten undo steps.
pub const HISTORY_CAPACITY: usize = 11;

/// Bounded linear undo buffer of full-plan snapshots.
///
/// `cursor` points at the snapshot that is currently live. Recording a new
/// snapshot discards everything after the cursor, so there is never more
/// than one redo branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<Vec<WorkItem>>,
    cursor: Option<usize>,
}

impl History {
    /// History with no active plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// History of a freshly activated plan: one snapshot, cursor on it.
    pub fn activated(items: Vec<WorkItem>) -> Self {
        Self {
            snapshots: vec![items],
            cursor: Some(0),
        }
    }

    /// Discard everything and start over from `items`.
    pub fn reset(&mut self, items: Vec<WorkItem>) {
        *self = Self::activated(items);
    }

    pub fn record(&mut self, items: Vec<WorkItem>) {
        match self.cursor {
            Some(cursor) => self.snapshots.truncate(cursor + 1),
            None => self.snapshots.clear(),
        }
        self.snapshots.push(items);
        if self.snapshots.len() > HISTORY_CAPACITY {
            let excess = self.snapshots.len() - HISTORY_CAPACITY;
            self.snapshots.drain(..excess);
        }
        self.cursor = Some(self.snapshots.len() - 1);
        debug!(depth = self.snapshots.len(), "recorded snapshot");
    }

    /// Step back one snapshot. `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<&[WorkItem]> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.current()
    }

    /// Step forward one snapshot. `None` when already at the newest.
    pub fn redo(&mut self) -> Option<&[WorkItem]> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.snapshots.len())?;
        self.cursor = Some(cursor + 1);
        self.current()
    }

    pub fn current(&self) -> Option<&[WorkItem]> {
        self.cursor
            .and_then(|c| self.snapshots.get(c))
            .map(Vec::as_slice)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    pub fn snapshots(&self) -> &[Vec<WorkItem>] {
        &self.snapshots
    }

    /// Bring a deserialized buffer back within bounds: drop the oldest
    /// snapshots past capacity and pull the cursor onto a real snapshot.
    pub fn repaired(mut self) -> Self {
        if self.snapshots.len() > HISTORY_CAPACITY {
            let excess = self.snapshots.len() - HISTORY_CAPACITY;
            self.snapshots.drain(..excess);
            self.cursor = self.cursor.map(|c| c.saturating_sub(excess));
        }
        self.cursor = match (self.snapshots.len(), self.cursor) {
            (0, _) => None,
            (len, Some(c)) => Some(c.min(len - 1)),
            (len, None) => Some(len - 1),
        };
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
