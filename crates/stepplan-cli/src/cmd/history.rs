use crate::output::print_json;
use stepplan_core::Schedule;
use std::path::Path;

pub fn undo(root: &Path, json: bool) -> anyhow::Result<()> {
    step(root, json, "undo", Schedule::undo)
}

pub fn redo(root: &Path, json: bool) -> anyhow::Result<()> {
    step(root, json, "redo", Schedule::redo)
}

fn step(
    root: &Path,
    json: bool,
    action: &str,
    apply: fn(&mut Schedule) -> bool,
) -> anyhow::Result<()> {
    let mut schedule = super::open(root)?;
    let moved = apply(&mut schedule);
    if moved {
        super::save(root, &schedule)?;
    }

    if json {
        print_json(&serde_json::json!({
            "action": action,
            "applied": moved,
            "can_undo": schedule.can_undo(),
            "can_redo": schedule.can_redo(),
            "items": schedule.items().len(),
        }))?;
    } else if moved {
        let position = schedule.history().cursor().map_or(0, |c| c + 1);
        println!(
            "{}: now at state {position} of {}",
            if action == "undo" { "Undone" } else { "Redone" },
            schedule.history().len()
        );
    } else {
        println!("nothing to {action}");
    }
    Ok(())
}
