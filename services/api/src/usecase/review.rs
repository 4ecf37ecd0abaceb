use chrono::Utc;
use uuid::Uuid;

use causequest_domain::points::AwardReason;

use crate::domain::repository::{
    ActivityRepository, ParticipationRepository, PointAwardRepository, ReviewRepository,
};
use crate::domain::types::{PointAward, Review};
use crate::error::ApiServiceError;

pub struct SubmitReviewInput {
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug)]
pub struct SubmitReviewOutput {
    /// `Some(amount)` on the review that won the points latch, `None` on
    /// resubmissions.
    pub points_earned: Option<i32>,
}

/// Upsert a participant's review and settle their points.
///
/// The `points_awarded` latch decides who gets credited, not the review
/// upsert: only the call that flips the latch appends a ledger event, so
/// resubmitting (or two racing submissions) can never credit twice.
pub struct SubmitReviewUseCase<A, P, R, L>
where
    A: ActivityRepository,
    P: ParticipationRepository,
    R: ReviewRepository,
    L: PointAwardRepository,
{
    pub activities: A,
    pub participations: P,
    pub reviews: R,
    pub ledger: L,
}

impl<A, P, R, L> SubmitReviewUseCase<A, P, R, L>
where
    A: ActivityRepository,
    P: ParticipationRepository,
    R: ReviewRepository,
    L: PointAwardRepository,
{
    pub async fn execute(
        &self,
        input: SubmitReviewInput,
    ) -> Result<SubmitReviewOutput, ApiServiceError> {
        let activity = self
            .activities
            .find_by_id(input.activity_id)
            .await?
            .ok_or(ApiServiceError::ActivityNotFound)?;

        let record = self
            .participations
            .find(input.activity_id, input.user_id)
            .await?;
        let completed = record.is_some_and(|r| r.activity_completed);
        if !completed {
            return Err(ApiServiceError::NotEligible);
        }

        let now = Utc::now();
        self.reviews
            .upsert(&Review {
                activity_id: input.activity_id,
                user_id: input.user_id,
                rating: input.rating,
                comment: input.comment,
                created_at: now,
                updated_at: now,
            })
            .await?;

        let latched = self
            .participations
            .latch_points_awarded(input.activity_id, input.user_id)
            .await?;
        if !latched {
            return Ok(SubmitReviewOutput {
                points_earned: None,
            });
        }

        // The latch is the single-credit gate; the ledger key is only a
        // backstop, so the append result does not change the reported amount.
        self.ledger
            .append(&PointAward {
                id: Uuid::new_v4(),
                user_id: input.user_id,
                activity_id: input.activity_id,
                reason: AwardReason::ParticipantReview,
                amount: activity.points_participant,
                created_at: now,
            })
            .await?;

        Ok(SubmitReviewOutput {
            points_earned: Some(activity.points_participant),
        })
    }
}

// ── GetActivityReviews ───────────────────────────────────────────────────────

pub struct GetActivityReviewsUseCase<A, R>
where
    A: ActivityRepository,
    R: ReviewRepository,
{
    pub activities: A,
    pub reviews: R,
}

impl<A, R> GetActivityReviewsUseCase<A, R>
where
    A: ActivityRepository,
    R: ReviewRepository,
{
    pub async fn execute(&self, activity_id: Uuid) -> Result<Vec<Review>, ApiServiceError> {
        self.activities
            .find_by_id(activity_id)
            .await?
            .ok_or(ApiServiceError::ActivityNotFound)?;
        self.reviews.list_by_activity(activity_id).await
    }
}
