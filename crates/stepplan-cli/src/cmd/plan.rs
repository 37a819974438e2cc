use crate::output::{print_item_detail, print_items, print_json};
use anyhow::Context;
use stepplan_core::dates;
use std::path::Path;

pub fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let schedule = super::open(root)?;

    if json {
        return print_json(&schedule.items());
    }
    if schedule.items().is_empty() {
        println!("No items. Start with 'stepplan add-phase <description>'.");
        return Ok(());
    }
    print_items(schedule.items());
    Ok(())
}

pub fn show(root: &Path, selector: &str, json: bool) -> anyhow::Result<()> {
    let schedule = super::open(root)?;
    let id = schedule.resolve(selector)?;
    let item = schedule
        .find(id)
        .with_context(|| format!("item '{selector}' not found"))?;

    if json {
        print_json(item)?;
    } else {
        print_item_detail(item);
    }
    Ok(())
}

pub fn range(root: &Path, json: bool) -> anyhow::Result<()> {
    let schedule = super::open(root)?;
    let range = schedule.date_range();

    if json {
        print_json(&serde_json::json!({
            "start": range.start,
            "end": range.end,
            "days": range.days(),
        }))?;
    } else {
        println!(
            "{} - {} ({} days)",
            dates::display(range.start),
            dates::display(range.end),
            range.days()
        );
    }
    Ok(())
}
