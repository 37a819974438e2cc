use crate::dates::{self, DateRange};
use crate::error::{PlanError, Result};
use crate::history::History;
use crate::item::{ItemId, ItemPatch, ItemSeed, WorkItem};
use crate::propagate::apply_edit;
use crate::reindex::reindex;
use crate::structure;
use tracing::info;

/// A live plan plus its undo history.
///
/// Every mutation goes operation -> reindex -> history record, and a call
/// that leaves the plan unchanged records nothing. Undo and redo only move
/// the history cursor.
#[derive(Debug, Clone)]
pub struct Schedule {
    items: Vec<WorkItem>,
    history: History,
}

impl Schedule {
    /// Activate a stored plan: reindex it and start a one-snapshot history.
    pub fn open(items: &[WorkItem]) -> Self {
        let items = reindex(items);
        Self {
            history: History::activated(items.clone()),
            items,
        }
    }

    /// Resume from a persisted history; the snapshot under the cursor is live.
    pub fn with_history(history: History) -> Self {
        let history = history.repaired();
        match history.current() {
            Some(current) => Self {
                items: current.to_vec(),
                history,
            },
            None => Self::open(&[]),
        }
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self, next: Vec<WorkItem>) -> bool {
        if next == self.items {
            return false;
        }
        self.items = next;
        self.history.record(self.items.clone());
        true
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Apply `patch` to `id` and propagate. Returns false and records nothing
    /// when the plan comes out unchanged, as for an unknown id or a patch that
    /// repeats the stored values.
    pub fn edit(&mut self, id: ItemId, patch: &ItemPatch) -> bool {
        let next = apply_edit(&self.items, id, patch);
        self.commit(next)
    }

    /// Insert a task below row `index`; returns the new task's id.
    pub fn insert_task_after(&mut self, index: usize, seed: &ItemSeed) -> ItemId {
        let at = structure::insertion_point(self.items.len(), index);
        let next = structure::insert_task_after(&self.items, index, seed);
        let id = next[at].id;
        self.commit(next);
        id
    }

    pub fn append_phase(&mut self, seed: &ItemSeed) -> ItemId {
        let next = structure::append_phase(&self.items, seed);
        let id = next[next.len() - 1].id;
        self.commit(next);
        id
    }

    pub fn delete(&mut self, id: ItemId) -> bool {
        let next = structure::delete_item(&self.items, id);
        self.commit(next)
    }

    /// Move row `from` to `to`. Returns false and records nothing when the
    /// plan comes out unchanged, as for an out-of-range `from` or a move onto
    /// the same row.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let next = structure::move_item(&self.items, from, to);
        self.commit(next)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.items = snapshot.to_vec();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.items = snapshot.to_vec();
                true
            }
            None => false,
        }
    }

    /// Replace the whole plan (e.g. from a backup). Not undoable.
    pub fn restore(&mut self, items: &[WorkItem]) {
        *self = Self::open(items);
        info!(items = self.items.len(), "restored plan; history reset");
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn find(&self, id: ItemId) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn date_range(&self) -> DateRange {
        dates::date_range(&self.items)
    }

    /// Look up an item by full id, id prefix (4+ characters), task number
    /// (`"2.3"`) or phase number (`"2"`).
    pub fn resolve(&self, selector: &str) -> Result<ItemId> {
        let selector = selector.trim();
        let not_found = || PlanError::ItemNotFound(selector.to_string());

        if let Ok(id) = selector.parse::<ItemId>() {
            return self.find(id).map(|item| item.id).ok_or_else(not_found);
        }

        // Tasks above the first phase share phase 1's numbers.
        let by_number = self
            .items
            .iter()
            .filter(|item| item.is_task() && item.task_number.as_deref() == Some(selector));
        if let Some(id) = unique(by_number, selector)? {
            return Ok(id);
        }

        if let Ok(n) = selector.parse::<u32>() {
            if let Some(item) = self
                .items
                .iter()
                .find(|item| item.is_phase() && item.phase_number == n)
            {
                return Ok(item.id);
            }
        }

        if selector.len() >= 4 {
            let by_prefix = self.items.iter().filter(|item| item.id.matches_prefix(selector));
            if let Some(id) = unique(by_prefix, selector)? {
                return Ok(id);
            }
        }

        Err(not_found())
    }
}

/// The single item in `hits`, `None` when there are none, or
/// [`PlanError::AmbiguousSelector`] when there are several.
fn unique<'a>(
    mut hits: impl Iterator<Item = &'a WorkItem>,
    selector: &str,
) -> Result<Option<ItemId>> {
    let Some(first) = hits.next() else {
        return Ok(None);
    };
    if hits.next().is_some() {
        return Err(PlanError::AmbiguousSelector(selector.to_string()));
    }
    Ok(Some(first.id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        dates::parse(s).unwrap()
    }

    fn schedule() -> Schedule {
        Schedule::open(&[
            WorkItem::phase("Design", d("2025-01-01"), 1),
            WorkItem::task("Sketch", d("2025-01-01"), 2),
            WorkItem::task("Review", d("2025-01-03"), 1),
        ])
    }

    fn days(n: i64) -> ItemPatch {
        ItemPatch {
            work_days: Some(n),
            ..Default::default()
        }
    }

    #[test]
    fn open_reindexes_and_activates_history() {
        let s = schedule();
        assert_eq!(s.items()[2].number(), "1.2");
        assert_eq!(s.history().len(), 1);
        assert!(!s.can_undo());
    }

    #[test]
    fn edit_records_and_undoes() {
        let mut s = schedule();
        let sketch = s.items()[1].id;
        assert!(s.edit(sketch, &days(4)));
        assert_eq!(s.items()[2].start, d("2025-01-05"));
        assert_eq!(s.history().len(), 2);

        assert!(s.undo());
        assert_eq!(s.items()[2].start, d("2025-01-03"));
        assert_eq!(s.history().len(), 2);

        assert!(s.redo());
        assert_eq!(s.items()[2].start, d("2025-01-05"));
        assert!(!s.redo());
    }

    #[test]
    fn no_op_edits_are_not_recorded() {
        let mut s = schedule();
        assert!(!s.edit(ItemId::new(), &days(3)));
        assert!(!s.move_item(42, 0));
        assert!(!s.delete(ItemId::new()));
        let sketch = s.items()[1].id;
        assert!(!s.edit(sketch, &days(2)));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn structural_operations_record() {
        let mut s = schedule();
        let id = s.insert_task_after(2, &ItemSeed::new("Sign off", d("2025-01-04")));
        assert_eq!(s.find(id).unwrap().number(), "1.3");
        let phase = s.append_phase(&ItemSeed::new("Build", d("2025-02-01")));
        assert_eq!(s.position(phase), Some(4));
        assert!(s.move_item(3, 1));
        assert!(s.delete(id));
        assert_eq!(s.history().len(), 5);
    }

    #[test]
    fn restore_resets_history() {
        let mut s = schedule();
        let sketch = s.items()[1].id;
        s.edit(sketch, &days(5));
        s.restore(&[WorkItem::phase("Fresh", d("2026-01-01"), 2)]);
        assert_eq!(s.items().len(), 1);
        assert!(!s.can_undo());
        assert_eq!(s.items()[0].color, crate::reindex::PALETTE[0]);
    }

    #[test]
    fn resumes_from_history_cursor() {
        let mut s = schedule();
        let sketch = s.items()[1].id;
        s.edit(sketch, &days(5));
        s.undo();
        let resumed = Schedule::with_history(s.history().clone());
        assert_eq!(resumed.items(), s.items());
        assert!(resumed.can_redo());
    }

    #[test]
    fn resolve_selectors() {
        let s = schedule();
        let review = s.items()[2].id;
        assert_eq!(s.resolve("1.2").unwrap(), review);
        assert_eq!(s.resolve("1").unwrap(), s.items()[0].id);
        assert_eq!(s.resolve(&review.to_string()).unwrap(), review);
        assert_eq!(s.resolve(&review.short()).unwrap(), review);
        assert!(matches!(s.resolve("9.9"), Err(PlanError::ItemNotFound(_))));
        assert!(matches!(s.resolve("zz"), Err(PlanError::ItemNotFound(_))));
    }

    #[test]
    fn task_number_shared_with_orphan_is_ambiguous() {
        let s = Schedule::open(&[
            WorkItem::task("Survey", d("2024-12-30"), 1),
            WorkItem::phase("Design", d("2025-01-01"), 1),
            WorkItem::task("Sketch", d("2025-01-01"), 2),
            WorkItem::task("Review", d("2025-01-03"), 1),
        ]);
        let survey = s.items()[0].id;
        assert_eq!(s.items()[0].number(), "1.1");
        assert_eq!(s.items()[2].number(), "1.1");

        assert!(matches!(s.resolve("1.1"), Err(PlanError::AmbiguousSelector(_))));
        assert_eq!(s.resolve(&survey.to_string()).unwrap(), survey);
        assert_eq!(s.resolve("1.2").unwrap(), s.items()[3].id);
        assert_eq!(s.resolve("1").unwrap(), s.items()[1].id);
    }
}
