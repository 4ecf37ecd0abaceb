//! Points ledger domain types.

use serde::{Deserialize, Serialize};

/// Why a point award was appended to the ledger.
///
/// Together with the activity and user ids this forms the idempotency key of
/// an award event: appending the same (activity, user, reason) twice is a
/// no-op, which is what makes every credit path replay-safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardReason {
    /// Organizer credit when an activity is marked completed.
    OrganizerCompletion,
    /// Participant credit when their first review is accepted.
    ParticipantReview,
}

impl AwardReason {
    /// Convert from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "organizer_completion" => Some(Self::OrganizerCompletion),
            "participant_review" => Some(Self::ParticipantReview),
            _ => None,
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OrganizerCompletion => "organizer_completion",
            Self::ParticipantReview => "participant_review",
        }
    }
}
