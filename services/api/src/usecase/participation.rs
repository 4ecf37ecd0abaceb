use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{
    ActivityRepository, ParticipationRepository, ReviewRepository, UserRepository,
};
use crate::domain::types::Participation;
use crate::error::ApiServiceError;

// ── JoinActivity ─────────────────────────────────────────────────────────────

pub struct JoinActivityInput {
    pub activity_id: Uuid,
    pub user_id: Uuid,
}

pub struct JoinActivityUseCase<A, U, P>
where
    A: ActivityRepository,
    U: UserRepository,
    P: ParticipationRepository,
{
    pub activities: A,
    pub users: U,
    pub participations: P,
}

impl<A, U, P> JoinActivityUseCase<A, U, P>
where
    A: ActivityRepository,
    U: UserRepository,
    P: ParticipationRepository,
{
    pub async fn execute(&self, input: JoinActivityInput) -> Result<(), ApiServiceError> {
        let activity = self
            .activities
            .find_by_id(input.activity_id)
            .await?
            .ok_or(ApiServiceError::ActivityNotFound)?;
        if !activity.is_active() {
            return Err(ApiServiceError::ActivityNotActive);
        }
        self.users
            .find_by_id(input.user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;

        let joined = self.participations.count_by_activity(input.activity_id).await?;
        if joined >= activity.max_participants as u64 {
            return Err(ApiServiceError::ActivityFull);
        }

        // All flags start false; the composite primary key rejects a second
        // join of the same pair.
        let record = Participation {
            activity_id: input.activity_id,
            user_id: input.user_id,
            otp_code: None,
            otp_expires_at: None,
            otp_verified: false,
            activity_started: false,
            activity_completed: false,
            points_awarded: false,
            created_at: Utc::now(),
        };
        if !self.participations.create(&record).await? {
            return Err(ApiServiceError::DuplicateParticipant);
        }
        Ok(())
    }
}

// ── GetUserStatus ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UserStatusOutput {
    pub participation: Participation,
    pub has_reviewed: bool,
}

pub struct GetUserStatusUseCase<P, R>
where
    P: ParticipationRepository,
    R: ReviewRepository,
{
    pub participations: P,
    pub reviews: R,
}

impl<P, R> GetUserStatusUseCase<P, R>
where
    P: ParticipationRepository,
    R: ReviewRepository,
{
    pub async fn execute(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
    ) -> Result<UserStatusOutput, ApiServiceError> {
        let participation = self
            .participations
            .find(activity_id, user_id)
            .await?
            .ok_or(ApiServiceError::ParticipationNotFound)?;
        let has_reviewed = self.reviews.exists(activity_id, user_id).await?;
        Ok(UserStatusOutput {
            participation,
            has_reviewed,
        })
    }
}
