use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiServiceError;
use crate::state::AppState;
use crate::usecase::completion::{CompleteActivityInput, CompleteActivityUseCase};

// ── POST /api/activities/{id}/complete ───────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteActivityRequest {
    pub user_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteActivityResponse {
    pub success: bool,
    pub message: String,
    pub points_earned: i32,
}

pub async fn complete_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
    Json(body): Json<CompleteActivityRequest>,
) -> Result<Json<CompleteActivityResponse>, ApiServiceError> {
    let usecase = CompleteActivityUseCase {
        activities: state.activity_repo(),
        participations: state.participation_repo(),
        ledger: state.point_award_repo(),
    };
    let out = usecase
        .execute(CompleteActivityInput {
            activity_id,
            caller_user_id: body.user_id,
        })
        .await?;
    let message = if out.first_completion {
        "activity completed".to_owned()
    } else {
        "activity already completed".to_owned()
    };
    Ok(Json(CompleteActivityResponse {
        success: true,
        message,
        points_earned: out.points_earned,
    }))
}
