//! Forward propagation of date edits through the positional link chain.
//!
//! Each row's [`LinkMode`] constrains the row directly below it. An edit
//! resolves the edited row's own date triangle, then a single left-to-right
//! sweep re-derives every later task from the (already updated) task above it,
//! so a change ripples to the end of the plan in one pass.

use crate::dates;
use crate::item::{clamp_work_days, ItemId, ItemPatch, WorkItem};
use crate::reindex::reindex;
use crate::types::LinkMode;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Apply `patch` to the item `id`, cascade date consequences forward, and
/// reindex. An unknown `id` returns the input unchanged.
pub fn apply_edit(items: &[WorkItem], id: ItemId, patch: &ItemPatch) -> Vec<WorkItem> {
    let Some(index) = items.iter().position(|item| item.id == id) else {
        warn!(%id, "edit ignored: no such item");
        return items.to_vec();
    };

    let mut out = items.to_vec();
    resolve_triangle(&mut out[index], patch);
    let moved = sweep(&mut out, index);
    debug!(%id, index, moved, "applied edit");
    reindex(&out)
}

/// Write `patch` into `item` and make its start/end/work-days consistent.
///
/// Only the highest-priority date field drives the recomputation: work days,
/// then end, then start. Lower-priority date fields are still stored.
pub fn resolve_triangle(item: &mut WorkItem, patch: &ItemPatch) {
    patch.apply_fields(item);
    if let Some(start) = patch.start {
        item.start = start;
    }
    if let Some(end) = patch.end {
        item.end = end;
    }

    if let Some(work_days) = patch.work_days {
        item.work_days = clamp_work_days(work_days);
        item.end = dates::end_from(item.start, item.work_days);
    } else if let Some(end) = patch.end {
        item.work_days = dates::work_days_in(item.start, end);
        if end < item.start {
            item.end = item.start;
        }
    } else if patch.start.is_some() {
        item.end = dates::end_from(item.start, item.work_days);
    }
}

/// Dates for a successor of `work_days` days linked to a predecessor spanning
/// `start..=end` with `mode`. Returns `(start, end)`.
pub fn successor_dates(
    mode: LinkMode,
    start: NaiveDate,
    end: NaiveDate,
    work_days: u32,
) -> (NaiveDate, NaiveDate) {
    match mode {
        LinkMode::FinishToStart => {
            let next_start = dates::next_day(end);
            (next_start, dates::end_from(next_start, work_days))
        }
        LinkMode::StartToStart => (start, dates::end_from(start, work_days)),
        LinkMode::StartToFinish => (dates::start_from(start, work_days), start),
        LinkMode::FinishToFinish => (dates::start_from(end, work_days), end),
    }
}

/// Re-derive every task after `from` from the nearest task above it. Phase
/// rows are passed over: they neither receive dates nor drive the row below
/// them, so a task that opens a phase links to the last task of the previous
/// phase. Returns the number of tasks whose dates changed.
pub fn sweep(items: &mut [WorkItem], from: usize) -> usize {
    if from >= items.len() {
        return 0;
    }
    let mut anchor = items[..=from].iter().rposition(WorkItem::is_task);
    let mut moved = 0;

    for i in from..items.len() - 1 {
        if items[i].is_task() {
            anchor = Some(i);
        }
        if !items[i + 1].is_task() {
            continue;
        }
        let Some(a) = anchor else {
            continue;
        };
        let current = &items[a];
        let (start, end) =
            successor_dates(current.mode, current.start, current.end, items[i + 1].work_days);

        let next = &mut items[i + 1];
        if next.start != start || next.end != end {
            next.start = start;
            next.end = end;
            moved += 1;
        }
    }
    moved
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
