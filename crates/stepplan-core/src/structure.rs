//! Insert, delete and reorder rows. Every operation returns a freshly
//! reindexed sequence; none of them touch dates beyond what reindexing does.

use crate::item::{ItemId, ItemSeed, WorkItem};
use crate::reindex::reindex;
use crate::types::ItemKind;
use tracing::{debug, warn};

/// Where [`insert_task_after`] places the new row for a plan of `len` rows.
pub fn insertion_point(len: usize, index: usize) -> usize {
    index.saturating_add(1).min(len)
}

/// Insert a new task directly below row `index` (appends when `index` is past
/// the end). The task joins the phase of the row it follows.
pub fn insert_task_after(items: &[WorkItem], index: usize, seed: &ItemSeed) -> Vec<WorkItem> {
    let at = insertion_point(items.len(), index);
    let mut task = WorkItem::from_seed(ItemKind::Task, seed);
    if let Some(above) = at.checked_sub(1).and_then(|i| items.get(i)) {
        task.phase_number = above.phase_number;
    }

    let mut out = items.to_vec();
    out.insert(at, task);
    debug!(at, "inserted task");
    reindex(&out)
}

/// Append a new phase at the end of the plan.
pub fn append_phase(items: &[WorkItem], seed: &ItemSeed) -> Vec<WorkItem> {
    let mut out = items.to_vec();
    out.push(WorkItem::from_seed(ItemKind::Phase, seed));
    debug!(at = out.len() - 1, "appended phase");
    reindex(&out)
}

/// Remove the item `id`. Removing a phase also removes every task carrying
/// its phase number, which for phase 1 includes tasks above the first phase.
/// An unknown `id` returns the input unchanged.
pub fn delete_item(items: &[WorkItem], id: ItemId) -> Vec<WorkItem> {
    let Some(target) = items.iter().find(|item| item.id == id) else {
        warn!(%id, "delete ignored: no such item");
        return items.to_vec();
    };

    let out: Vec<WorkItem> = if target.is_phase() {
        let phase = target.phase_number;
        items
            .iter()
            .filter(|item| item.id != id && !(item.is_task() && item.phase_number == phase))
            .cloned()
            .collect()
    } else {
        items.iter().filter(|item| item.id != id).cloned().collect()
    };
    debug!(%id, removed = items.len() - out.len(), "deleted item");
    reindex(&out)
}

/// Move the row at `from` to `to` (0-based). `to` clamps to the last row; an
/// out-of-range `from` returns the input unchanged.
pub fn move_item(items: &[WorkItem], from: usize, to: usize) -> Vec<WorkItem> {
    if from >= items.len() {
        warn!(from, len = items.len(), "move ignored: no such row");
        return items.to_vec();
    }
    let to = to.min(items.len() - 1);

    let mut out = items.to_vec();
    let item = out.remove(from);
    out.insert(to, item);
    debug!(from, to, "moved item");
    reindex(&out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        dates::parse(s).unwrap()
    }

    fn plan() -> Vec<WorkItem> {
        reindex(&[
            WorkItem::phase("Design", d("2025-01-01"), 1),
            WorkItem::task("Sketch", d("2025-01-01"), 2),
            WorkItem::task("Review", d("2025-01-03"), 1),
            WorkItem::phase("Build", d("2025-01-04"), 1),
            WorkItem::task("Frame", d("2025-01-04"), 3),
            WorkItem::phase("Ship", d("2025-01-07"), 1),
            WorkItem::task("Deliver", d("2025-01-07"), 1),
        ])
    }

    fn descriptions(items: &[WorkItem]) -> Vec<&str> {
        items.iter().map(|i| i.description.as_str()).collect()
    }

    fn numbers(items: &[WorkItem]) -> Vec<String> {
        items.iter().map(WorkItem::number).collect()
    }

    #[test]
    fn insert_task_joins_phase_above() {
        let seed = ItemSeed::new("Prototype", d("2025-01-02")).work_days(2);
        let out = insert_task_after(&plan(), 1, &seed);
        assert_eq!(out.len(), 8);
        assert_eq!(out[2].description, "Prototype");
        assert_eq!(out[2].number(), "1.2");
        assert_eq!(out[3].number(), "1.3");
        assert_eq!(out[2].end, d("2025-01-03"));
        assert_eq!(out[2].color, out[0].color);
    }

    #[test]
    fn insert_after_phase_row_becomes_first_child() {
        let seed = ItemSeed::new("Survey", d("2025-01-04"));
        let out = insert_task_after(&plan(), 3, &seed);
        assert_eq!(out[4].number(), "2.1");
        assert_eq!(out[5].number(), "2.2");
    }

    #[test]
    fn insert_past_end_appends() {
        let seed = ItemSeed::new("Retro", d("2025-01-09"));
        let out = insert_task_after(&plan(), 99, &seed);
        assert_eq!(out.last().unwrap().description, "Retro");
        assert_eq!(out.last().unwrap().number(), "3.2");
    }

    #[test]
    fn insert_into_empty_plan() {
        let seed = ItemSeed::new("Lonely", d("2025-01-01"));
        let out = insert_task_after(&[], 0, &seed);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].number(), "1.1");
    }

    #[test]
    fn append_phase_numbers_next() {
        let seed = ItemSeed::new("Support", d("2025-02-01")).work_days(5);
        let out = append_phase(&plan(), &seed);
        let last = out.last().unwrap();
        assert!(last.is_phase());
        assert_eq!(last.phase_number, 4);
        assert_eq!(last.end, d("2025-02-05"));
    }

    #[test]
    fn delete_phase_cascades_to_its_tasks() {
        let items = plan();
        let out = delete_item(&items, items[3].id);
        assert_eq!(descriptions(&out), vec!["Design", "Sketch", "Review", "Ship", "Deliver"]);
        assert_eq!(numbers(&out), vec!["1", "1.1", "1.2", "2", "2.1"]);
    }

    #[test]
    fn delete_first_phase_takes_tasks_filed_above_it() {
        let items = reindex(&[
            WorkItem::task("Survey", d("2024-12-30"), 1),
            WorkItem::phase("Design", d("2025-01-01"), 1),
            WorkItem::task("Sketch", d("2025-01-01"), 2),
            WorkItem::phase("Build", d("2025-01-04"), 1),
            WorkItem::task("Frame", d("2025-01-04"), 3),
        ]);
        assert_eq!(items[0].phase_number, 1);

        let out = delete_item(&items, items[1].id);
        assert_eq!(descriptions(&out), vec!["Build", "Frame"]);
        assert_eq!(numbers(&out), vec!["1", "1.1"]);
    }

    #[test]
    fn delete_task_removes_only_itself() {
        let items = plan();
        let out = delete_item(&items, items[1].id);
        assert_eq!(out.len(), 6);
        assert_eq!(out[1].description, "Review");
        assert_eq!(out[1].number(), "1.1");
        assert_eq!(out[0].start, d("2025-01-03"));
    }

    #[test]
    fn delete_unknown_is_a_no_op() {
        let items = plan();
        assert_eq!(delete_item(&items, ItemId::new()), items);
    }

    #[test]
    fn move_task_into_other_phase() {
        let out = move_item(&plan(), 1, 4);
        assert_eq!(
            descriptions(&out),
            vec!["Design", "Review", "Build", "Frame", "Sketch", "Ship", "Deliver"]
        );
        assert_eq!(out[4].number(), "2.2");
        assert_eq!(out[4].color, out[2].color);
    }

    #[test]
    fn move_clamps_destination() {
        let out = move_item(&plan(), 0, 100);
        assert_eq!(out.last().unwrap().description, "Design");
        // The displaced tasks now sit above the first phase.
        assert_eq!(out[0].number(), "1.1");
    }

    #[test]
    fn move_out_of_range_is_a_no_op() {
        let items = plan();
        assert_eq!(move_item(&items, 7, 0), items);
    }
}
