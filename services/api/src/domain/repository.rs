#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use causequest_domain::activity::ActivityStatus;
use causequest_domain::pagination::PageRequest;

use crate::domain::types::{
    Activity, LeaderboardEntry, Participation, PointAward, Review, User,
};
use crate::error::ApiServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiServiceError>;

    /// Insert a user. Returns `false` when the name or email is already taken
    /// (detected via the unique constraints, not a pre-read).
    async fn create(&self, user: &User) -> Result<bool, ApiServiceError>;
}

/// Repository for activities. The lifecycle flows only ever read activities.
pub trait ActivityRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>, ApiServiceError>;
    async fn create(&self, activity: &Activity) -> Result<(), ApiServiceError>;
    async fn list(
        &self,
        status: Option<ActivityStatus>,
        page: PageRequest,
    ) -> Result<Vec<Activity>, ApiServiceError>;
}

/// Repository for per-participant lifecycle records.
///
/// Every mutation is a single conditional statement branched on the affected
/// row count, so check-then-act races cannot double-fire a transition.
pub trait ParticipationRepository: Send + Sync {
    /// Insert a fresh record (all flags false, no code). Returns `false` when
    /// the (activity, user) pair already exists.
    async fn create(&self, participation: &Participation) -> Result<bool, ApiServiceError>;

    async fn find(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Participation>, ApiServiceError>;

    async fn list_by_activity(
        &self,
        activity_id: Uuid,
    ) -> Result<Vec<Participation>, ApiServiceError>;

    async fn count_by_activity(&self, activity_id: Uuid) -> Result<u64, ApiServiceError>;

    /// Assign a code and expiry to a codeless, unverified record. Returns
    /// `false` when the record already holds a code or was verified meanwhile;
    /// a lost race counts as an existing code.
    async fn assign_otp(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, ApiServiceError>;

    /// Find the unverified record of this activity whose code matches and has
    /// not expired at `now`.
    async fn find_by_otp(
        &self,
        activity_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Participation>, ApiServiceError>;

    /// Flip `otp_verified` and `activity_started` together, guarded on the
    /// code still matching unverified. Returns `false` when a concurrent
    /// validation won the race.
    async fn mark_verified(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        code: &str,
    ) -> Result<bool, ApiServiceError>;

    /// Set `activity_completed` on every record of the activity in one
    /// statement. Returns the number of rows flipped or re-flipped.
    async fn complete_all(&self, activity_id: Uuid) -> Result<u64, ApiServiceError>;

    /// One-way `points_awarded` latch. Returns `true` only for the call that
    /// flipped it false→true.
    async fn latch_points_awarded(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, ApiServiceError>;
}

/// Repository for activity reviews.
pub trait ReviewRepository: Send + Sync {
    /// Insert-or-replace on the (activity, user) pair; resubmission overwrites
    /// rating, comment, and `updated_at` only.
    async fn upsert(&self, review: &Review) -> Result<(), ApiServiceError>;

    async fn exists(&self, activity_id: Uuid, user_id: Uuid) -> Result<bool, ApiServiceError>;

    async fn list_by_activity(&self, activity_id: Uuid) -> Result<Vec<Review>, ApiServiceError>;
}

/// Repository for the append-only point-award ledger.
pub trait PointAwardRepository: Send + Sync {
    /// Append an award event. Returns `false` when the idempotency key
    /// (activity, user, reason) already exists — nothing is credited then.
    async fn append(&self, award: &PointAward) -> Result<bool, ApiServiceError>;

    /// Sum of all award amounts for the user; zero when none exist.
    async fn balance(&self, user_id: Uuid) -> Result<i64, ApiServiceError>;

    /// Top `limit` users by balance, descending, name as tie-break.
    async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ApiServiceError>;
}
