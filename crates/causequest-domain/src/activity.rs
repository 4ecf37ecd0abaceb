//! Activity domain types.

use serde::{Deserialize, Serialize};

/// Publication state of an activity.
///
/// Wire and storage format: lowercase string (`active` / `cancelled`).
/// Only `active` activities accept new participants; the lifecycle tracker
/// itself reads activities without ever changing their status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Active,
    Cancelled,
}

impl ActivityStatus {
    /// Convert from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}
