use chrono::{DateTime, Utc};
use uuid::Uuid;

use causequest_domain::activity::ActivityStatus;
use causequest_domain::points::AwardReason;

/// User account. The points balance is not a field; it is derived from the
/// award ledger on read.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Community-service activity created by an organizer.
#[derive(Debug, Clone)]
pub struct Activity {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub min_participants: i32,
    pub max_participants: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub points_organizer: i32,
    pub points_participant: i32,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn is_active(&self) -> bool {
        self.status == ActivityStatus::Active
    }
}

/// Per-participant lifecycle record for one (activity, user) pair.
///
/// Flag transitions are one-way: `otp_verified` and `activity_started` flip
/// together on a successful validation, `activity_completed` flips for the
/// whole activity at once, `points_awarded` latches on the first review.
#[derive(Debug, Clone)]
pub struct Participation {
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub otp_verified: bool,
    pub activity_started: bool,
    pub activity_completed: bool,
    pub points_awarded: bool,
    pub created_at: DateTime<Utc>,
}

impl Participation {
    /// Whether this record holds a code that would still validate at `now`.
    pub fn otp_live(&self, now: DateTime<Utc>) -> bool {
        !self.otp_verified
            && self.otp_code.is_some()
            && self.otp_expires_at.is_some_and(|exp| exp > now)
    }
}

/// Participant review of a completed activity.
#[derive(Debug, Clone)]
pub struct Review {
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only award event; a user's balance is the sum of their events.
#[derive(Debug, Clone)]
pub struct PointAward {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_id: Uuid,
    pub reason: AwardReason,
    pub amount: i32,
    pub created_at: DateTime<Utc>,
}

/// One leaderboard row: a user and their ledger-derived balance.
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub name: String,
    pub points: i64,
}

/// OTP codes are uniform random in [100000, 999999] — always six digits.
pub const OTP_CODE_MIN: u32 = 100_000;
pub const OTP_CODE_MAX: u32 = 999_999;

/// OTP time-to-live in hours, recorded at issuance and enforced at validation.
pub const OTP_TTL_HOURS: i64 = 24;

/// Default and maximum number of leaderboard rows.
pub const LEADERBOARD_DEFAULT_LIMIT: u32 = 10;
pub const LEADERBOARD_MAX_LIMIT: u32 = 100;

/// Validate a review rating: integer 1–5.
pub fn validate_rating(rating: u8) -> bool {
    (1..=5).contains(&rating)
}
