use crate::output::print_json;
use anyhow::Context;
use clap::Args;
use stepplan_core::config::Config;
use stepplan_core::types::coerce_progress;
use stepplan_core::{dates, ItemId, ItemKind, ItemPatch, LinkMode, PlanError, Schedule};
use std::path::Path;
use tracing::warn;

#[derive(Args)]
pub struct EditArgs {
    /// Item id, id prefix, task number (2.3) or phase number (2)
    selector: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    accountable: Option<String>,
    /// Work days; values below 1 become 1
    #[arg(long, allow_negative_numbers = true)]
    days: Option<i64>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,
    /// Percent complete, 0-100
    #[arg(long)]
    progress: Option<String>,
    /// Link to the next row: FS, SS, SF or FF
    #[arg(long)]
    mode: Option<String>,
    /// phase or task
    #[arg(long)]
    kind: Option<String>,
    #[arg(long)]
    phase_number: Option<u32>,
    #[arg(long)]
    task_number: Option<String>,
}

// ---------------------------------------------------------------------------
// add-phase / add-task
// ---------------------------------------------------------------------------

pub fn add_phase(
    root: &Path,
    description: &str,
    start: Option<&str>,
    days: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let mut schedule = super::open(root)?;

    let start = match start {
        Some(s) => parse_date(s)?,
        None => schedule
            .items()
            .iter()
            .map(|item| item.end)
            .max()
            .map(dates::next_day)
            .unwrap_or_else(dates::today),
    };
    let mut seed = config.seed(description, start);
    if let Some(days) = days {
        seed = seed.work_days(days);
    }

    let id = schedule.append_phase(&seed);
    super::save(root, &schedule)?;
    report_added(&schedule, id, json)
}

pub fn add_task(
    root: &Path,
    description: &str,
    after: &str,
    start: Option<&str>,
    days: Option<u32>,
    mode: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let mut schedule = super::open(root)?;

    let anchor = schedule.resolve(after)?;
    let index = schedule
        .position(anchor)
        .with_context(|| format!("item '{after}' not found"))?;
    let above = &schedule.items()[index];
    let start = match start {
        Some(s) => parse_date(s)?,
        None if above.is_phase() => above.start,
        None => dates::next_day(above.end),
    };

    let mut seed = config.seed(description, start);
    if let Some(days) = days {
        seed = seed.work_days(days);
    }
    if let Some(mode) = mode {
        seed = seed.mode(mode.parse::<LinkMode>()?);
    }

    let id = schedule.insert_task_after(index, &seed);
    super::save(root, &schedule)?;
    report_added(&schedule, id, json)
}

fn report_added(schedule: &Schedule, id: ItemId, json: bool) -> anyhow::Result<()> {
    let item = schedule.find(id).context("new item missing from plan")?;
    if json {
        print_json(item)?;
    } else {
        println!(
            "Added {} {}: {} ({} - {})",
            item.kind,
            item.number(),
            item.description,
            dates::display(item.start),
            dates::display(item.end)
        );
    }
    Ok(())
}

fn parse_date(input: &str) -> anyhow::Result<chrono::NaiveDate> {
    dates::parse(input).ok_or_else(|| PlanError::InvalidDate(input.to_string()).into())
}

// ---------------------------------------------------------------------------
// edit
// ---------------------------------------------------------------------------

pub fn edit(root: &Path, args: EditArgs, json: bool) -> anyhow::Result<()> {
    let mut schedule = super::open(root)?;
    let id = schedule.resolve(&args.selector)?;
    let patch = build_patch(&args)?;
    if patch.is_empty() {
        anyhow::bail!("nothing to change: pass at least one field to edit");
    }

    let changed = schedule.edit(id, &patch);
    if changed {
        super::save(root, &schedule)?;
    }

    let item = schedule
        .find(id)
        .with_context(|| format!("item '{}' not found", args.selector))?;
    if json {
        print_json(&serde_json::json!({ "changed": changed, "item": item }))?;
    } else if changed {
        println!(
            "Updated {} {}: {} - {} ({} days)",
            item.kind,
            item.number(),
            dates::display(item.start),
            dates::display(item.end),
            item.work_days
        );
    } else {
        println!("No changes.");
    }
    Ok(())
}

fn build_patch(args: &EditArgs) -> anyhow::Result<ItemPatch> {
    Ok(ItemPatch {
        phase_number: args.phase_number,
        task_number: args.task_number.clone(),
        kind: args.kind.as_deref().map(str::parse::<ItemKind>).transpose()?,
        description: args.description.clone(),
        accountable: args.accountable.clone(),
        work_days: args.days,
        start: lenient_date("start", args.start.as_deref()),
        end: lenient_date("end", args.end.as_deref()),
        progress: args.progress.as_deref().map(|p| f64::from(coerce_progress(p))),
        mode: args.mode.as_deref().map(str::parse::<LinkMode>).transpose()?,
    })
}

/// An unreadable date on edit is dropped rather than rejected.
fn lenient_date(field: &str, input: Option<&str>) -> Option<chrono::NaiveDate> {
    let input = input?;
    let parsed = dates::parse(input);
    if parsed.is_none() {
        warn!(field, value = input, "ignoring unparseable date");
    }
    parsed
}

// ---------------------------------------------------------------------------
// delete / move
// ---------------------------------------------------------------------------

pub fn delete(root: &Path, selector: &str, json: bool) -> anyhow::Result<()> {
    let mut schedule = super::open(root)?;
    let id = schedule.resolve(selector)?;
    let item = schedule
        .find(id)
        .cloned()
        .with_context(|| format!("item '{selector}' not found"))?;

    let before = schedule.items().len();
    schedule.delete(id);
    let removed = before - schedule.items().len();
    super::save(root, &schedule)?;

    if json {
        print_json(&serde_json::json!({ "deleted": item.id, "removed": removed }))?;
    } else if removed > 1 {
        println!(
            "Deleted {} {}: {} (and {} tasks)",
            item.kind,
            item.number(),
            item.description,
            removed - 1
        );
    } else {
        println!("Deleted {} {}: {}", item.kind, item.number(), item.description);
    }
    Ok(())
}

pub fn move_row(root: &Path, from: usize, to: usize, json: bool) -> anyhow::Result<()> {
    if from == 0 || to == 0 {
        anyhow::bail!("rows are numbered from 1");
    }
    let mut schedule = super::open(root)?;
    let len = schedule.items().len();
    if from > len {
        anyhow::bail!("no row {from}: the plan has {len} rows");
    }

    let changed = schedule.move_item(from - 1, to - 1);
    if changed {
        super::save(root, &schedule)?;
    }

    if json {
        print_json(&serde_json::json!({ "changed": changed, "from": from, "to": to.min(len) }))?;
    } else if changed {
        println!("Moved row {from} to {}", to.min(len));
    } else {
        println!("No changes.");
    }
    Ok(())
}
