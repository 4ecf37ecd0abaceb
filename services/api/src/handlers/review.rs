use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::validate_rating;
use crate::error::ApiServiceError;
use crate::state::AppState;
use crate::usecase::review::{
    GetActivityReviewsUseCase, SubmitReviewInput, SubmitReviewUseCase,
};

// ── POST /api/activities/{id}/review ─────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub user_id: Uuid,
    pub rating: u8,
    pub review: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<i32>,
}

pub async fn submit_review(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
    Json(body): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>, ApiServiceError> {
    if !validate_rating(body.rating) {
        return Err(ApiServiceError::InvalidRating);
    }
    let usecase = SubmitReviewUseCase {
        activities: state.activity_repo(),
        participations: state.participation_repo(),
        reviews: state.review_repo(),
        ledger: state.point_award_repo(),
    };
    let out = usecase
        .execute(SubmitReviewInput {
            activity_id,
            user_id: body.user_id,
            rating: body.rating,
            comment: body.review,
        })
        .await?;
    let message = if out.points_earned.is_some() {
        "review submitted".to_owned()
    } else {
        "review updated".to_owned()
    };
    Ok(Json(SubmitReviewResponse {
        success: true,
        message,
        points_earned: out.points_earned,
    }))
}

// ── GET /api/activities/{id}/reviews ─────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    pub user_id: String,
    pub rating: u8,
    pub review: String,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct ReviewListResponse {
    pub success: bool,
    pub reviews: Vec<ReviewBody>,
}

pub async fn get_reviews(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
) -> Result<Json<ReviewListResponse>, ApiServiceError> {
    let usecase = GetActivityReviewsUseCase {
        activities: state.activity_repo(),
        reviews: state.review_repo(),
    };
    let reviews = usecase.execute(activity_id).await?;
    let items = reviews
        .into_iter()
        .map(|review| ReviewBody {
            user_id: review.user_id.to_string(),
            rating: review.rating,
            review: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
        })
        .collect();
    Ok(Json(ReviewListResponse {
        success: true,
        reviews: items,
    }))
}
