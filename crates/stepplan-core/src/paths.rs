use crate::error::{PlanError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const STEPPLAN_DIR: &str = ".stepplan";
pub const BACKUPS_DIR: &str = ".stepplan/backups";

pub const CONFIG_FILE: &str = ".stepplan/config.yaml";
pub const PLAN_FILE: &str = ".stepplan/plan.yaml";
pub const HISTORY_FILE: &str = ".stepplan/history.yaml";

pub const BACKUP_EXT: &str = "yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn stepplan_dir(root: &Path) -> PathBuf {
    root.join(STEPPLAN_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn plan_path(root: &Path) -> PathBuf {
    root.join(PLAN_FILE)
}

pub fn history_path(root: &Path) -> PathBuf {
    root.join(HISTORY_FILE)
}

pub fn backups_dir(root: &Path) -> PathBuf {
    root.join(BACKUPS_DIR)
}

pub fn backup_path(root: &Path, name: &str) -> PathBuf {
    let file = if name.ends_with(&format!(".{BACKUP_EXT}")) {
        name.to_string()
    } else {
        format!("{name}.{BACKUP_EXT}")
    };
    backups_dir(root).join(file)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").expect("slug pattern is valid")
    })
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(PlanError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

/// Lowercase, hyphenated form of an arbitrary directory or project name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "plan".to_string()
    } else {
        slug.chars().take(64).collect::<String>().trim_end_matches('-').to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        for slug in ["house-build", "a", "q3-roadmap", "x1"] {
            validate_slug(slug).unwrap_or_else(|_| panic!("expected valid: {slug}"));
        }
    }

    #[test]
    fn invalid_slugs() {
        for slug in ["", "-lead", "trail-", "has spaces", "UPPER", "a_b"] {
            assert!(validate_slug(slug).is_err(), "expected invalid: {slug}");
        }
    }

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("My House Build"), "my-house-build");
        assert_eq!(slugify("  __  "), "plan");
        assert_eq!(slugify("Q3/Roadmap!"), "q3-roadmap");
        validate_slug(&slugify("Weird -- Name")).unwrap();
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(plan_path(root), PathBuf::from("/tmp/proj/.stepplan/plan.yaml"));
        assert_eq!(
            backup_path(root, "20250101T000000Z"),
            PathBuf::from("/tmp/proj/.stepplan/backups/20250101T000000Z.yaml")
        );
        assert_eq!(
            backup_path(root, "b.yaml"),
            PathBuf::from("/tmp/proj/.stepplan/backups/b.yaml")
        );
    }
}
