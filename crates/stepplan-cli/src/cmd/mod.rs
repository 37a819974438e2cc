pub mod backup;
pub mod config;
pub mod history;
pub mod init;
pub mod item;
pub mod plan;

use anyhow::Context;
use stepplan_core::{store, Schedule};
use std::path::Path;

pub(crate) fn open(root: &Path) -> anyhow::Result<Schedule> {
    store::open_schedule(root).context("failed to load plan")
}

pub(crate) fn save(root: &Path, schedule: &Schedule) -> anyhow::Result<()> {
    store::save_schedule(root, schedule).context("failed to save plan")
}
