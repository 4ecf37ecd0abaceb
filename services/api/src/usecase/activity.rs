use chrono::{DateTime, Utc};
use uuid::Uuid;

use causequest_domain::activity::ActivityStatus;
use causequest_domain::pagination::PageRequest;

use crate::domain::repository::{ActivityRepository, ParticipationRepository, UserRepository};
use crate::domain::types::Activity;
use crate::error::ApiServiceError;

// ── CreateActivity ───────────────────────────────────────────────────────────

pub struct CreateActivityInput {
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
}

pub struct CreateActivityUseCase<A, U>
where
    A: ActivityRepository,
    U: UserRepository,
{
    pub activities: A,
    pub users: U,
}

impl<A, U> CreateActivityUseCase<A, U>
where
    A: ActivityRepository,
    U: UserRepository,
{
    pub async fn execute(&self, input: CreateActivityInput) -> Result<Uuid, ApiServiceError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(ApiServiceError::MissingData);
        }
        if input.min_participants < 1
            || input.max_participants < input.min_participants
            || input.ends_at <= input.starts_at
            || input.points_organizer < 0
            || input.points_participant < 0
        {
            return Err(ApiServiceError::InvalidActivity);
        }
        self.users
            .find_by_id(input.organizer_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;

        let activity = Activity {
            id: Uuid::now_v7(),
            organizer_id: input.organizer_id,
            title: title.to_owned(),
            description: input.description,
            location: input.location,
            min_participants: input.min_participants,
            max_participants: input.max_participants,
            starts_at: input.starts_at,
            ends_at: input.ends_at,
            points_organizer: input.points_organizer,
            points_participant: input.points_participant,
            status: ActivityStatus::Active,
            created_at: Utc::now(),
        };
        self.activities.create(&activity).await?;
        Ok(activity.id)
    }
}

// ── GetActivities ────────────────────────────────────────────────────────────

pub struct GetActivitiesUseCase<A: ActivityRepository> {
    pub activities: A,
}

impl<A: ActivityRepository> GetActivitiesUseCase<A> {
    pub async fn execute(
        &self,
        status: Option<ActivityStatus>,
        page: PageRequest,
    ) -> Result<Vec<Activity>, ApiServiceError> {
        self.activities.list(status, page.clamped()).await
    }
}

// ── GetActivity ──────────────────────────────────────────────────────────────

pub struct GetActivityOutput {
    pub activity: Activity,
    pub participant_count: u64,
}

pub struct GetActivityUseCase<A, P>
where
    A: ActivityRepository,
    P: ParticipationRepository,
{
    pub activities: A,
    pub participations: P,
}

impl<A, P> GetActivityUseCase<A, P>
where
    A: ActivityRepository,
    P: ParticipationRepository,
{
    pub async fn execute(&self, activity_id: Uuid) -> Result<GetActivityOutput, ApiServiceError> {
        let activity = self
            .activities
            .find_by_id(activity_id)
            .await?
            .ok_or(ApiServiceError::ActivityNotFound)?;
        let participant_count = self.participations.count_by_activity(activity_id).await?;
        Ok(GetActivityOutput {
            activity,
            participant_count,
        })
    }
}
