use crate::error::{PlanError, Result};
use crate::item::ItemSeed;
use crate::paths;
use crate::types::LinkMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// DefaultsConfig
// ---------------------------------------------------------------------------

/// Seed values for rows created without explicit overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_work_days")]
    pub work_days: u32,
    #[serde(default)]
    pub mode: LinkMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountable: Option<String>,
}

fn default_work_days() -> u32 {
    1
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            work_days: default_work_days(),
            mode: LinkMode::default(),
            accountable: None,
        }
    }
}

// ---------------------------------------------------------------------------
// BackupConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Backups retained after pruning; 0 disables backups.
    #[serde(default = "default_keep")]
    pub keep: usize,
}

fn default_keep() -> usize {
    20
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            keep: default_keep(),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub backups: BackupConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
                description: None,
            },
            defaults: DefaultsConfig::default(),
            backups: BackupConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(PlanError::NotInitialized);
        }
        crate::io::read_yaml(&path)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        crate::io::write_yaml(&paths::config_path(root), self)
    }

    /// Seed for a new row, filled from `defaults`.
    pub fn seed(&self, description: impl Into<String>, start: NaiveDate) -> ItemSeed {
        let seed = ItemSeed::new(description, start)
            .work_days(self.defaults.work_days)
            .mode(self.defaults.mode);
        match &self.defaults.accountable {
            Some(who) => seed.accountable(who.clone()),
            None => seed,
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.project.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "project.name is empty".to_string(),
            });
        }

        if self.defaults.work_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "defaults.work_days is 0; new rows will use 1".to_string(),
            });
        }

        if self.backups.keep == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "backups.keep is 0; backups are disabled".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
