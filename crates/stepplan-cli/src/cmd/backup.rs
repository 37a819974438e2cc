use crate::output::{print_json, print_table};
use anyhow::Context;
use stepplan_core::{config::Config, store};
use std::path::Path;

pub fn create(root: &Path, label: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let items = store::load_plan(root).context("failed to load plan")?;
    let written = store::create_backup(root, &items, config.backups.keep, label)
        .context("failed to write backup")?;

    if json {
        print_json(&serde_json::json!({ "path": written }))?;
        return Ok(());
    }
    match written {
        Some(path) => println!("Wrote backup {}", path.display()),
        None => println!("Backups are disabled (backups.keep is 0)."),
    }
    Ok(())
}

pub fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let backups = store::list_backups(root).context("failed to list backups")?;

    if json {
        return print_json(&backups);
    }
    if backups.is_empty() {
        println!("No backups.");
        return Ok(());
    }
    let rows = backups
        .iter()
        .map(|b| vec![b.name.clone(), b.path.display().to_string()])
        .collect();
    print_table(&["NAME", "PATH"], rows);
    Ok(())
}

pub fn restore(root: &Path, backup: &str, json: bool) -> anyhow::Result<()> {
    let items =
        store::load_backup(root, backup).with_context(|| format!("failed to read backup '{backup}'"))?;
    let mut schedule = super::open(root)?;
    schedule.restore(&items);
    super::save(root, &schedule)?;

    if json {
        print_json(&serde_json::json!({
            "restored": backup,
            "items": schedule.items().len(),
        }))?;
    } else {
        println!(
            "Restored {} items from {backup}. Undo history cleared.",
            schedule.items().len()
        );
    }
    Ok(())
}
