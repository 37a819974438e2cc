use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("not initialized: run 'stepplan init'")]
    NotInitialized,

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("ambiguous item selector '{0}': matches more than one item")]
    AmbiguousSelector(String),

    #[error("invalid link mode '{0}': expected one of FS, SS, SF, FF")]
    InvalidLinkMode(String),

    #[error("invalid item kind '{0}': expected 'phase' or 'task'")]
    InvalidKind(String),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid backup label '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("backup not found: {0}")]
    BackupNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
