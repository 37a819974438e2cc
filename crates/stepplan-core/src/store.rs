//! On-disk layout under `.stepplan/`: the canonical plan, the undo buffer,
//! and timestamped backups. The engine never touches the filesystem; this
//! module is the collaborator that does.

use crate::error::{PlanError, Result};
use crate::history::History;
use crate::io;
use crate::item::WorkItem;
use crate::paths;
use crate::schedule::Schedule;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// PlanFile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub items: Vec<WorkItem>,
}

fn default_version() -> u32 {
    1
}

impl PlanFile {
    pub fn new(items: Vec<WorkItem>) -> Self {
        Self { version: 1, items }
    }
}

pub fn is_initialized(root: &Path) -> bool {
    paths::plan_path(root).exists()
}

pub fn load_plan(root: &Path) -> Result<Vec<WorkItem>> {
    let path = paths::plan_path(root);
    if !path.exists() {
        return Err(PlanError::NotInitialized);
    }
    let file: PlanFile = io::read_yaml(&path)?;
    Ok(file.items)
}

pub fn save_plan(root: &Path, items: &[WorkItem]) -> Result<()> {
    io::write_yaml(&paths::plan_path(root), &PlanFile::new(items.to_vec()))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

pub fn load_history(root: &Path) -> Result<Option<History>> {
    let path = paths::history_path(root);
    if !path.exists() {
        return Ok(None);
    }
    let history: History = io::read_yaml(&path)?;
    Ok(Some(history.repaired()))
}

pub fn save_history(root: &Path, history: &History) -> Result<()> {
    io::write_yaml(&paths::history_path(root), history)
}

/// Load the plan and resume its history. If the stored history does not end
/// on the stored plan (missing, or the plan was edited by hand) the plan is
/// activated afresh with a one-snapshot history.
pub fn open_schedule(root: &Path) -> Result<Schedule> {
    let items = load_plan(root)?;
    let history = match load_history(root) {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "unreadable history; starting a new one");
            None
        }
    };

    match history {
        Some(h) if h.current() == Some(items.as_slice()) => Ok(Schedule::with_history(h)),
        Some(_) => {
            info!("stored history does not match plan; history reset");
            Ok(Schedule::open(&items))
        }
        None => Ok(Schedule::open(&items)),
    }
}

pub fn save_schedule(root: &Path, schedule: &Schedule) -> Result<()> {
    save_plan(root, schedule.items())?;
    save_history(root, schedule.history())?;
    debug!(items = schedule.items().len(), "saved plan");
    Ok(())
}

// ---------------------------------------------------------------------------
// Backups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupInfo {
    pub name: String,
    pub path: PathBuf,
}

/// Backups, oldest first. Names are UTC timestamps, so lexical order is
/// chronological.
pub fn list_backups(root: &Path) -> Result<Vec<BackupInfo>> {
    let dir = paths::backups_dir(root);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(paths::BACKUP_EXT)
        {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        backups.push(BackupInfo { name, path });
    }
    backups.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(backups)
}

/// Write `items` as a new backup and prune down to `keep`. Returns the path
/// written, or `None` when `keep` is 0. A `label` must be a slug; it is
/// appended to the timestamp.
pub fn create_backup(
    root: &Path,
    items: &[WorkItem],
    keep: usize,
    label: Option<&str>,
) -> Result<Option<PathBuf>> {
    if let Some(label) = label {
        paths::validate_slug(label)?;
    }
    if keep == 0 {
        return Ok(None);
    }

    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let base = match label {
        Some(label) => format!("{stamp}-{label}"),
        None => stamp.to_string(),
    };
    let mut path = paths::backup_path(root, &base);
    let mut n = 1;
    while path.exists() {
        path = paths::backup_path(root, &format!("{base}-{n}"));
        n += 1;
    }

    io::write_yaml(&path, &PlanFile::new(items.to_vec()))?;
    info!(path = %path.display(), "wrote backup");
    prune_backups(root, keep);
    Ok(Some(path))
}

/// Delete the oldest backups beyond `keep`. Failures are logged, not returned.
pub fn prune_backups(root: &Path, keep: usize) -> usize {
    let backups = match list_backups(root) {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, "could not list backups for pruning");
            return 0;
        }
    };

    let excess = backups.len().saturating_sub(keep);
    let mut removed = 0;
    for backup in backups.into_iter().take(excess) {
        match std::fs::remove_file(&backup.path) {
            Ok(()) => removed += 1,
            Err(e) => warn!(path = %backup.path.display(), error = %e, "could not prune backup"),
        }
    }
    removed
}

/// Read a backup by name (as listed) or by explicit file path.
pub fn load_backup(root: &Path, name_or_path: &str) -> Result<Vec<WorkItem>> {
    let direct = PathBuf::from(name_or_path);
    let path = if direct.is_file() {
        direct
    } else {
        paths::backup_path(root, name_or_path)
    };
    if !path.is_file() {
        return Err(PlanError::BackupNotFound(name_or_path.to_string()));
    }
    let file: PlanFile = io::read_yaml(&path)?;
    Ok(file.items)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
