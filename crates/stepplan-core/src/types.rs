use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ItemKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Aggregate row; dates are derived from the tasks that follow it.
    Phase,
    /// Leaf row with its own date triangle and link mode.
    Task,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Phase => "phase",
            ItemKind::Task => "task",
        }
    }

    pub fn is_phase(self) -> bool {
        matches!(self, ItemKind::Phase)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = crate::error::PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phase" | "step" => Ok(ItemKind::Phase),
            "task" => Ok(ItemKind::Task),
            _ => Err(crate::error::PlanError::InvalidKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// LinkMode
// ---------------------------------------------------------------------------

/// How the item immediately after this one is scheduled relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinkMode {
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    #[serde(rename = "SS")]
    StartToStart,
    #[serde(rename = "SF")]
    StartToFinish,
    #[serde(rename = "FF")]
    FinishToFinish,
}

impl LinkMode {
    pub fn all() -> &'static [LinkMode] {
        &[
            LinkMode::FinishToStart,
            LinkMode::StartToStart,
            LinkMode::StartToFinish,
            LinkMode::FinishToFinish,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkMode::FinishToStart => "FS",
            LinkMode::StartToStart => "SS",
            LinkMode::StartToFinish => "SF",
            LinkMode::FinishToFinish => "FF",
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LinkMode {
    type Err = crate::error::PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FS" => Ok(LinkMode::FinishToStart),
            "SS" => Ok(LinkMode::StartToStart),
            "SF" => Ok(LinkMode::StartToFinish),
            "FF" => Ok(LinkMode::FinishToFinish),
            _ => Err(crate::error::PlanError::InvalidLinkMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Clamp a numeric progress value into `[0, 100]`. NaN coerces to 0.
pub fn clamp_progress(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Coerce free-form text into a progress percentage; non-numeric input is 0.
pub fn coerce_progress(input: &str) -> u8 {
    input
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map(clamp_progress)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn link_mode_roundtrip() {
        for mode in LinkMode::all() {
            assert_eq!(LinkMode::from_str(mode.as_str()).unwrap(), *mode);
        }
        assert_eq!(LinkMode::from_str("ff").unwrap(), LinkMode::FinishToFinish);
        assert!(LinkMode::from_str("XX").is_err());
    }

    #[test]
    fn link_mode_serializes_as_short_code() {
        let yaml = serde_yaml::to_string(&LinkMode::StartToFinish).unwrap();
        assert_eq!(yaml.trim(), "SF");
        let back: LinkMode = serde_yaml::from_str("SS").unwrap();
        assert_eq!(back, LinkMode::StartToStart);
    }

    #[test]
    fn default_mode_is_finish_to_start() {
        assert_eq!(LinkMode::default(), LinkMode::FinishToStart);
    }

    #[test]
    fn kind_parse() {
        assert_eq!(ItemKind::from_str("Phase").unwrap(), ItemKind::Phase);
        assert_eq!(ItemKind::from_str("task").unwrap(), ItemKind::Task);
        assert!(ItemKind::from_str("milestone").is_err());
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(clamp_progress(-5.0), 0);
        assert_eq!(clamp_progress(150.0), 100);
        assert_eq!(clamp_progress(42.4), 42);
        assert_eq!(clamp_progress(f64::NAN), 0);
    }

    #[test]
    fn progress_coerces_text() {
        assert_eq!(coerce_progress("75"), 75);
        assert_eq!(coerce_progress(" 30% "), 30);
        assert_eq!(coerce_progress("lots"), 0);
        assert_eq!(coerce_progress(""), 0);
        assert_eq!(coerce_progress("250"), 100);
    }
}
