use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use causequest_domain::activity::ActivityStatus;
use causequest_domain::pagination::PageRequest;

use crate::error::ApiServiceError;
use crate::state::AppState;
use crate::usecase::activity::{
    CreateActivityInput, CreateActivityUseCase, GetActivitiesUseCase, GetActivityUseCase,
};

// ── POST /api/activities ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub organizer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default = "default_min_participants")]
    pub min_participants: i32,
    pub max_participants: i32,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub ends_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub points_organizer: i32,
    #[serde(default)]
    pub points_participant: i32,
}

fn default_min_participants() -> i32 {
    1
}

#[derive(Serialize)]
pub struct CreateActivityResponse {
    pub success: bool,
    pub id: String,
}

pub async fn create_activity(
    State(state): State<AppState>,
    Json(body): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<CreateActivityResponse>), ApiServiceError> {
    let usecase = CreateActivityUseCase {
        activities: state.activity_repo(),
        users: state.user_repo(),
    };
    let id = usecase
        .execute(CreateActivityInput {
            organizer_id: body.organizer_id,
            title: body.title,
            description: body.description,
            location: body.location,
            min_participants: body.min_participants,
            max_participants: body.max_participants,
            starts_at: body.starts_at,
            ends_at: body.ends_at,
            points_organizer: body.points_organizer,
            points_participant: body.points_participant,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateActivityResponse {
            success: true,
            id: id.to_string(),
        }),
    ))
}

// ── GET /api/activities ──────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ActivityListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub id: String,
    pub organizer_id: String,
    pub title: String,
    pub location: Option<String>,
    pub status: ActivityStatus,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub starts_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub ends_at: chrono::DateTime<chrono::Utc>,
    pub points_participant: i32,
}

#[derive(Serialize)]
pub struct ActivityListResponse {
    pub success: bool,
    pub activities: Vec<ActivitySummary>,
}

pub async fn get_activities(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<ActivityListQuery>,
) -> Result<Json<ActivityListResponse>, ApiServiceError> {
    let status = match query.status.as_deref() {
        Some(value) => Some(
            ActivityStatus::from_str_value(value).ok_or(ApiServiceError::MissingData)?,
        ),
        None => None,
    };
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let usecase = GetActivitiesUseCase {
        activities: state.activity_repo(),
    };
    let activities = usecase.execute(status, page).await?;
    let items = activities
        .into_iter()
        .map(|activity| ActivitySummary {
            id: activity.id.to_string(),
            organizer_id: activity.organizer_id.to_string(),
            title: activity.title,
            location: activity.location,
            status: activity.status,
            starts_at: activity.starts_at,
            ends_at: activity.ends_at,
            points_participant: activity.points_participant,
        })
        .collect();
    Ok(Json(ActivityListResponse {
        success: true,
        activities: items,
    }))
}

// ── GET /api/activities/{id} ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetail {
    pub id: String,
    pub organizer_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub min_participants: i32,
    pub max_participants: i32,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub starts_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub ends_at: chrono::DateTime<chrono::Utc>,
    pub points_organizer: i32,
    pub points_participant: i32,
    pub status: ActivityStatus,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub participant_count: u64,
}

#[derive(Serialize)]
pub struct ActivityResponse {
    pub success: bool,
    pub activity: ActivityDetail,
}

pub async fn get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
) -> Result<Json<ActivityResponse>, ApiServiceError> {
    let usecase = GetActivityUseCase {
        activities: state.activity_repo(),
        participations: state.participation_repo(),
    };
    let out = usecase.execute(activity_id).await?;
    let activity = out.activity;
    Ok(Json(ActivityResponse {
        success: true,
        activity: ActivityDetail {
            id: activity.id.to_string(),
            organizer_id: activity.organizer_id.to_string(),
            title: activity.title,
            description: activity.description,
            location: activity.location,
            min_participants: activity.min_participants,
            max_participants: activity.max_participants,
            starts_at: activity.starts_at,
            ends_at: activity.ends_at,
            points_organizer: activity.points_organizer,
            points_participant: activity.points_participant,
            status: activity.status,
            created_at: activity.created_at,
            participant_count: out.participant_count,
        },
    }))
}
