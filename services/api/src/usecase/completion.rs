use chrono::Utc;
use uuid::Uuid;

use causequest_domain::points::AwardReason;

use crate::domain::repository::{
    ActivityRepository, ParticipationRepository, PointAwardRepository,
};
use crate::domain::types::PointAward;
use crate::error::ApiServiceError;

pub struct CompleteActivityInput {
    pub activity_id: Uuid,
    pub caller_user_id: Uuid,
}

#[derive(Debug)]
pub struct CompleteActivityOutput {
    pub participants_completed: u64,
    pub points_earned: i32,
    pub first_completion: bool,
}

/// Mark every participant record of an activity completed and credit the
/// organizer points. Re-running is harmless: the fan-out statement re-flips
/// rows that are already completed, and the ledger's idempotency key rejects
/// the duplicate credit.
pub struct CompleteActivityUseCase<A, P, L>
where
    A: ActivityRepository,
    P: ParticipationRepository,
    L: PointAwardRepository,
{
    pub activities: A,
    pub participations: P,
    pub ledger: L,
}

impl<A, P, L> CompleteActivityUseCase<A, P, L>
where
    A: ActivityRepository,
    P: ParticipationRepository,
    L: PointAwardRepository,
{
    pub async fn execute(
        &self,
        input: CompleteActivityInput,
    ) -> Result<CompleteActivityOutput, ApiServiceError> {
        let activity = self
            .activities
            .find_by_id(input.activity_id)
            .await?
            .ok_or(ApiServiceError::ActivityNotFound)?;
        if activity.organizer_id != input.caller_user_id {
            return Err(ApiServiceError::NotAuthorized("complete this activity"));
        }

        let participant_count = self
            .participations
            .count_by_activity(input.activity_id)
            .await?;
        if participant_count == 0 {
            return Err(ApiServiceError::NoParticipants);
        }

        let participants_completed = self
            .participations
            .complete_all(input.activity_id)
            .await?;

        let credited = self
            .ledger
            .append(&PointAward {
                id: Uuid::new_v4(),
                user_id: activity.organizer_id,
                activity_id: activity.id,
                reason: AwardReason::OrganizerCompletion,
                amount: activity.points_organizer,
                created_at: Utc::now(),
            })
            .await?;

        Ok(CompleteActivityOutput {
            participants_completed,
            points_earned: if credited { activity.points_organizer } else { 0 },
            first_completion: credited,
        })
    }
}
