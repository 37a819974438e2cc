use crate::dates;
use crate::types::{clamp_progress, ItemKind, LinkMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ItemId
// ---------------------------------------------------------------------------

/// Stable identity of a row; never changes for the item's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to pick an item out of a listing.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_ascii_lowercase();
        self.0.hyphenated().to_string().starts_with(&prefix)
            || self.0.simple().to_string().starts_with(&prefix)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

// ---------------------------------------------------------------------------
// WorkItem
// ---------------------------------------------------------------------------

/// One row of a plan. Rows are either phases or tasks; a task belongs to the
/// nearest phase above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: ItemId,
    pub kind: ItemKind,
    /// 1-based number of the owning phase.
    pub phase_number: u32,
    /// `"{phase}.{ordinal}"` for tasks, `None` for phases.
    #[serde(default)]
    pub task_number: Option<String>,
    pub description: String,
    #[serde(default)]
    pub accountable: String,
    pub work_days: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub mode: LinkMode,
    #[serde(default)]
    pub color: String,
}

impl WorkItem {
    pub fn new(kind: ItemKind, description: impl Into<String>, start: NaiveDate, work_days: u32) -> Self {
        let work_days = work_days.max(1);
        Self {
            id: ItemId::new(),
            kind,
            phase_number: 1,
            task_number: None,
            description: description.into(),
            accountable: String::new(),
            work_days,
            start,
            end: dates::end_from(start, work_days),
            progress: 0,
            mode: LinkMode::default(),
            color: String::new(),
        }
    }

    pub fn phase(description: impl Into<String>, start: NaiveDate, work_days: u32) -> Self {
        Self::new(ItemKind::Phase, description, start, work_days)
    }

    pub fn task(description: impl Into<String>, start: NaiveDate, work_days: u32) -> Self {
        Self::new(ItemKind::Task, description, start, work_days)
    }

    pub fn from_seed(kind: ItemKind, seed: &ItemSeed) -> Self {
        let mut item = Self::new(kind, seed.description.clone(), seed.start, seed.work_days);
        item.accountable = seed.accountable.clone();
        item.mode = seed.mode;
        item
    }

    pub fn with_mode(mut self, mode: LinkMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_phase(&self) -> bool {
        self.kind.is_phase()
    }

    pub fn is_task(&self) -> bool {
        !self.kind.is_phase()
    }

    /// `"2"` for a phase, `"2.3"` for a task.
    pub fn number(&self) -> String {
        match (&self.kind, &self.task_number) {
            (ItemKind::Task, Some(n)) => n.clone(),
            _ => self.phase_number.to_string(),
        }
    }

    /// True when `end == start + (work_days - 1)`.
    pub fn triangle_holds(&self) -> bool {
        self.work_days >= 1 && self.end == dates::end_from(self.start, self.work_days)
    }
}

// ---------------------------------------------------------------------------
// ItemPatch
// ---------------------------------------------------------------------------

/// Partial field update for one item. `None` leaves the field as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub phase_number: Option<u32>,
    pub task_number: Option<String>,
    pub kind: Option<ItemKind>,
    pub description: Option<String>,
    pub accountable: Option<String>,
    /// Values below 1 are clamped to 1.
    pub work_days: Option<i64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Clamped into `[0, 100]`.
    pub progress: Option<f64>,
    pub mode: Option<LinkMode>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy the non-date fields into `item`.
    pub(crate) fn apply_fields(&self, item: &mut WorkItem) {
        if let Some(n) = self.phase_number {
            item.phase_number = n;
        }
        if let Some(n) = &self.task_number {
            item.task_number = Some(n.clone());
        }
        if let Some(kind) = self.kind {
            item.kind = kind;
        }
        if let Some(d) = &self.description {
            item.description = d.clone();
        }
        if let Some(a) = &self.accountable {
            item.accountable = a.clone();
        }
        if let Some(p) = self.progress {
            item.progress = clamp_progress(p);
        }
        if let Some(m) = self.mode {
            item.mode = m;
        }
    }
}

pub(crate) fn clamp_work_days(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// ItemSeed
// ---------------------------------------------------------------------------

/// Caller-supplied starting values for a newly inserted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSeed {
    pub description: String,
    pub accountable: String,
    pub start: NaiveDate,
    pub work_days: u32,
    pub mode: LinkMode,
}

impl ItemSeed {
    pub fn new(description: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            description: description.into(),
            accountable: String::new(),
            start,
            work_days: 1,
            mode: LinkMode::default(),
        }
    }

    pub fn work_days(mut self, work_days: u32) -> Self {
        self.work_days = work_days.max(1);
        self
    }

    pub fn mode(mut self, mode: LinkMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn accountable(mut self, accountable: impl Into<String>) -> Self {
        self.accountable = accountable.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
