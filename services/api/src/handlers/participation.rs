use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiServiceError;
use crate::state::AppState;
use crate::usecase::participation::{
    GetUserStatusUseCase, JoinActivityInput, JoinActivityUseCase,
};

// ── POST /api/activities/{id}/join ───────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinActivityRequest {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct JoinActivityResponse {
    pub success: bool,
    pub message: String,
}

pub async fn join_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
    Json(body): Json<JoinActivityRequest>,
) -> Result<(StatusCode, Json<JoinActivityResponse>), ApiServiceError> {
    let usecase = JoinActivityUseCase {
        activities: state.activity_repo(),
        users: state.user_repo(),
        participations: state.participation_repo(),
    };
    usecase
        .execute(JoinActivityInput {
            activity_id,
            user_id: body.user_id,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(JoinActivityResponse {
            success: true,
            message: "joined activity".to_owned(),
        }),
    ))
}

// ── GET /api/activities/{id}/user-status/{user_id} ───────────────────────────

/// Raw participation record fields, snake_case as stored.
#[derive(Serialize)]
pub struct UserStatusResponse {
    pub success: bool,
    pub activity_id: String,
    pub user_id: String,
    pub otp_code: Option<String>,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms_opt")]
    pub otp_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub otp_verified: bool,
    pub activity_started: bool,
    pub activity_completed: bool,
    pub points_awarded: bool,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub has_reviewed: bool,
}

pub async fn get_user_status(
    State(state): State<AppState>,
    Path((activity_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<UserStatusResponse>, ApiServiceError> {
    let usecase = GetUserStatusUseCase {
        participations: state.participation_repo(),
        reviews: state.review_repo(),
    };
    let out = usecase.execute(activity_id, user_id).await?;
    let record = out.participation;
    Ok(Json(UserStatusResponse {
        success: true,
        activity_id: record.activity_id.to_string(),
        user_id: record.user_id.to_string(),
        otp_code: record.otp_code,
        otp_expires_at: record.otp_expires_at,
        otp_verified: record.otp_verified,
        activity_started: record.activity_started,
        activity_completed: record.activity_completed,
        points_awarded: record.points_awarded,
        created_at: record.created_at,
        has_reviewed: out.has_reviewed,
    }))
}
