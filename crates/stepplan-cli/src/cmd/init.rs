use crate::output::print_json;
use anyhow::Context;
use stepplan_core::{config::Config, io, paths, store, History};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let project_name = match name {
        Some(n) => n.to_string(),
        None => paths::slugify(
            &root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
    };

    if !json {
        println!("Initializing stepplan in: {}", root.display());
    }

    for dir in [paths::STEPPLAN_DIR, paths::BACKUPS_DIR] {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    let mut created = Vec::new();
    let mut existing = Vec::new();

    if paths::config_path(root).exists() {
        existing.push(paths::CONFIG_FILE);
    } else {
        Config::new(&project_name)
            .save(root)
            .context("failed to write config.yaml")?;
        created.push(paths::CONFIG_FILE);
    }

    if store::is_initialized(root) {
        existing.push(paths::PLAN_FILE);
    } else {
        store::save_plan(root, &[]).context("failed to write plan.yaml")?;
        created.push(paths::PLAN_FILE);
    }

    if paths::history_path(root).exists() {
        existing.push(paths::HISTORY_FILE);
    } else {
        let items = store::load_plan(root).context("failed to read plan.yaml")?;
        store::save_history(root, &History::activated(items))
            .context("failed to write history.yaml")?;
        created.push(paths::HISTORY_FILE);
    }

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "project": project_name,
            "created": created,
            "existing": existing,
        }))?;
    } else {
        for file in &created {
            println!("  created: {file}");
        }
        for file in &existing {
            println!("  exists:  {file}");
        }
    }
    Ok(())
}
