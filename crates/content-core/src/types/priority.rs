//! File download priority and tri-state check values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Download priority of a file, or the aggregate shown on a folder.
///
/// Serialized as the integer value the backing service uses. Unknown
/// integers deserialize to [`FilePriority::Normal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum FilePriority {
    /// Excluded from download.
    Ignored,
    /// Default priority.
    #[default]
    Normal,
    /// Downloaded ahead of normal files.
    High,
    /// Downloaded first.
    Maximum,
    /// Display-only folder value: children disagree. Never assigned to a file.
    Mixed,
}

impl FilePriority {
    /// Priorities a user may pick, in menu order.
    pub const ASSIGNABLE: [FilePriority; 4] =
        [Self::Ignored, Self::Normal, Self::High, Self::Maximum];

    /// Return the wire value.
    pub fn value(self) -> i64 {
        match self {
            Self::Ignored => 0,
            Self::Normal => 1,
            Self::High => 6,
            Self::Maximum => 7,
            Self::Mixed => -1,
        }
    }

    /// Map a wire value to a priority. Anything outside the known set is
    /// treated as `Normal`.
    pub fn normalize(value: i64) -> Self {
        match value {
            0 => Self::Ignored,
            1 => Self::Normal,
            6 => Self::High,
            7 => Self::Maximum,
            -1 => Self::Mixed,
            _ => Self::Normal,
        }
    }

    /// Normalize a loosely typed JSON value (number or numeric string).
    pub fn from_json(value: &serde_json::Value) -> Self {
        let raw = match value {
            serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        raw.map(Self::normalize).unwrap_or(Self::Normal)
    }

    /// Whether a user may assign this priority to a row.
    pub fn is_assignable(self) -> bool {
        !matches!(self, Self::Mixed)
    }

    /// Whether files with this priority are excluded from download.
    pub fn is_ignored(self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// The checkbox state that corresponds to this priority.
    pub fn tri_state(self) -> TriState {
        match self {
            Self::Ignored => TriState::Unchecked,
            Self::Normal | Self::High | Self::Maximum => TriState::Checked,
            Self::Mixed => TriState::Partial,
        }
    }

    /// Return the lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Maximum => "maximum",
            Self::Mixed => "mixed",
        }
    }
}

impl From<i64> for FilePriority {
    fn from(value: i64) -> Self {
        Self::normalize(value)
    }
}

impl From<FilePriority> for i64 {
    fn from(priority: FilePriority) -> i64 {
        priority.value()
    }
}

impl fmt::Display for FilePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilePriority {
    type Err = AppError;

    /// Parses a name (`"high"`) or a wire value (`"6"`). Unlike
    /// [`FilePriority::normalize`], unknown input is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<i64>() {
            return match value {
                0 | 1 | 6 | 7 | -1 => Ok(Self::normalize(value)),
                _ => Err(AppError::validation(format!("Invalid priority value: {value}"))),
            };
        }
        match s.to_lowercase().as_str() {
            "ignored" | "skip" => Ok(Self::Ignored),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "maximum" | "max" => Ok(Self::Maximum),
            "mixed" => Ok(Self::Mixed),
            _ => {
                let expected: Vec<&str> = Self::ASSIGNABLE.iter().map(|p| p.as_str()).collect();
                Err(AppError::validation(format!(
                    "Invalid priority: '{s}'. Expected one of: {}",
                    expected.join(", ")
                )))
            }
        }
    }
}

/// Checkbox state of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    /// Not selected for download.
    #[default]
    Unchecked,
    /// Selected for download.
    Checked,
    /// Some but not all descendants selected.
    Partial,
}

impl TriState {
    /// Return the lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Checked => "checked",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
