use chrono::NaiveDate;
use stepplan_core::{
    dates, delete_item, reindex, ItemPatch, ItemSeed, LinkMode, Schedule, WorkItem,
    HISTORY_CAPACITY,
};

fn d(s: &str) -> NaiveDate {
    dates::parse(s).unwrap()
}

fn days(n: i64) -> ItemPatch {
    ItemPatch {
        work_days: Some(n),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

#[test]
fn finish_to_start_extends_phase() {
    let mut s = Schedule::open(&[
        WorkItem::phase("P1", d("2025-01-01"), 5),
        WorkItem::task("T1", d("2025-01-01"), 3).with_mode(LinkMode::FinishToStart),
    ]);
    let t1 = s.items()[1].id;
    s.edit(t1, &days(5));

    assert_eq!(s.items()[1].end, d("2025-01-05"));
    assert_eq!(s.items()[0].end, d("2025-01-05"));
}

#[test]
fn chain_shifts_by_the_same_amount() {
    let mut s = Schedule::open(&[
        WorkItem::phase("P", d("2025-01-01"), 1),
        WorkItem::task("A", d("2025-01-01"), 2),
        WorkItem::task("B", d("2025-01-03"), 3),
        WorkItem::task("C", d("2025-01-06"), 1),
    ]);
    let before = s.items().to_vec();
    let a = before[1].id;
    s.edit(
        a,
        &ItemPatch {
            end: Some(d("2025-01-04")),
            ..Default::default()
        },
    );

    let after = s.items();
    for i in 2..4 {
        assert_eq!((after[i].start - before[i].start).num_days(), 2);
        assert_eq!((after[i].end - before[i].end).num_days(), 2);
        assert_eq!(after[i].work_days, before[i].work_days);
    }
}

#[test]
fn every_item_keeps_its_triangle() {
    let mut s = Schedule::open(&[
        WorkItem::phase("P", d("2025-01-01"), 1),
        WorkItem::task("A", d("2025-01-01"), 2).with_mode(LinkMode::StartToFinish),
        WorkItem::task("B", d("2025-01-03"), 3).with_mode(LinkMode::FinishToFinish),
        WorkItem::task("C", d("2025-01-06"), 1).with_mode(LinkMode::StartToStart),
        WorkItem::task("D", d("2025-01-06"), 4),
    ]);
    let a = s.items()[1].id;
    s.edit(
        a,
        &ItemPatch {
            start: Some(d("2025-03-01")),
            ..Default::default()
        },
    );
    assert!(s.items().iter().all(WorkItem::triangle_holds));
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[test]
fn history_keeps_ten_undo_steps() {
    let mut s = Schedule::open(&[
        WorkItem::phase("P", d("2025-01-01"), 1),
        WorkItem::task("T", d("2025-01-01"), 1),
    ]);
    let t = s.items()[1].id;
    for n in 2..=16 {
        assert!(s.edit(t, &days(n)));
    }
    assert_eq!(s.history().len(), HISTORY_CAPACITY);

    let mut undone = 0;
    while s.undo() {
        undone += 1;
    }
    assert_eq!(undone, 10);
    // The oldest retained state is five edits in, not the starting plan.
    assert_eq!(s.items()[1].work_days, 6);
}

#[test]
fn undo_then_redo_restores_latest() {
    let mut s = Schedule::open(&[WorkItem::phase("P", d("2025-01-01"), 1)]);
    let mut index = 0;
    for i in 0..6 {
        let seed = ItemSeed::new(format!("T{i}"), d("2025-01-01")).work_days(i + 1);
        s.insert_task_after(index, &seed);
        index += 1;
    }
    let latest = s.items().to_vec();

    for _ in 0..6 {
        assert!(s.undo());
    }
    assert_eq!(s.items().len(), 1);
    for _ in 0..6 {
        assert!(s.redo());
    }
    assert_eq!(s.items(), latest.as_slice());
}

#[test]
fn new_edit_after_undo_drops_redo() {
    let mut s = Schedule::open(&[WorkItem::phase("P", d("2025-01-01"), 1)]);
    s.append_phase(&ItemSeed::new("Q", d("2025-02-01")));
    s.append_phase(&ItemSeed::new("R", d("2025-03-01")));
    s.undo();
    s.append_phase(&ItemSeed::new("S", d("2025-04-01")));

    assert!(!s.redo());
    let names: Vec<_> = s.items().iter().map(|i| i.description.as_str()).collect();
    assert_eq!(names, vec!["P", "Q", "S"]);
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn deleting_a_phase_leaves_dense_numbers() {
    let items = reindex(&[
        WorkItem::phase("One", d("2025-01-01"), 1),
        WorkItem::task("a", d("2025-01-01"), 1),
        WorkItem::phase("Two", d("2025-01-02"), 1),
        WorkItem::task("b", d("2025-01-02"), 1),
        WorkItem::task("c", d("2025-01-03"), 1),
        WorkItem::phase("Three", d("2025-01-04"), 1),
        WorkItem::task("d", d("2025-01-04"), 1),
    ]);
    let two = items[2].id;
    let out = delete_item(&items, two);

    assert_eq!(out.len(), 4);
    assert!(out.iter().all(|i| i.description != "b" && i.description != "c"));
    let phases: Vec<u32> = out.iter().filter(|i| i.is_phase()).map(|i| i.phase_number).collect();
    assert_eq!(phases, vec![1, 2]);
    assert_eq!(out[3].number(), "2.1");
}

#[test]
fn date_range_covers_plan_with_margins() {
    let s = Schedule::open(&[
        WorkItem::phase("P", d("2025-01-01"), 1),
        WorkItem::task("T", d("2025-01-10"), 10),
    ]);
    let range = s.date_range();
    assert_eq!(range.start, d("2024-12-11"));
    assert_eq!(range.end, d("2025-03-20"));
}
