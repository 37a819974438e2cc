//! Hierarchical numbering, palette colours, and phase date aggregation.
//!
//! This is the only place that assigns `phase_number`, `task_number` and
//! `color`, and the only place that writes phase dates. Running it twice is a
//! no-op.

use crate::dates;
use crate::item::WorkItem;
use std::ops::Range;
use tracing::{debug, warn};

/// Phase colours, cycled by phase number.
pub const PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
];

/// Colour for the 1-based `phase_number`, wrapping around the palette.
pub fn color_for(phase_number: u32) -> &'static str {
    let index = (phase_number.max(1) - 1) as usize % PALETTE.len();
    PALETTE[index]
}

/// Index range of the tasks owned by the phase at `phase_index`: every row
/// after it up to the next phase or the end of the sequence.
pub fn phase_children(items: &[WorkItem], phase_index: usize) -> Range<usize> {
    let first = phase_index + 1;
    let last = items
        .iter()
        .enumerate()
        .skip(first)
        .find(|(_, item)| item.is_phase())
        .map_or(items.len(), |(i, _)| i);
    first.min(items.len())..last
}

pub fn reindex(items: &[WorkItem]) -> Vec<WorkItem> {
    let mut out = items.to_vec();
    let phases = renumber(&mut out);
    aggregate_phases(&mut out);
    debug!(phases, items = out.len(), "reindexed plan");
    out
}

fn renumber(items: &mut [WorkItem]) -> u32 {
    let mut phase_count = 0u32;
    let mut owner: Option<u32> = None;
    let mut ordinal = 0u32;
    let mut orphans = 0usize;

    for item in items.iter_mut() {
        if item.is_phase() {
            phase_count += 1;
            owner = Some(phase_count);
            ordinal = 0;
            item.phase_number = phase_count;
            item.task_number = None;
            item.color = color_for(phase_count).to_string();
            continue;
        }

        // A task above the first phase is filed under phase 1.
        let phase = owner.unwrap_or_else(|| {
            orphans += 1;
            1
        });
        ordinal += 1;
        item.phase_number = phase;
        item.task_number = Some(format!("{phase}.{ordinal}"));
        item.color = color_for(phase).to_string();
    }

    if orphans > 0 {
        warn!(orphans, "tasks found before the first phase; filed under phase 1");
    }
    phase_count
}

fn aggregate_phases(items: &mut [WorkItem]) {
    for index in 0..items.len() {
        if !items[index].is_phase() {
            continue;
        }
        let children = &items[phase_children(items, index)];
        let start = children.iter().map(|c| c.start).min();
        let end = children.iter().map(|c| c.end).max();

        // A phase without tasks keeps whatever dates it already had.
        if let (Some(start), Some(end)) = (start, end) {
            let phase = &mut items[index];
            phase.start = start;
            phase.end = end;
            phase.work_days = dates::work_days_in(start, end);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
