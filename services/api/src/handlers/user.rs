use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetLeaderboardUseCase, GetUserUseCase,
};

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct CreateUserResponse {
    pub success: bool,
    pub id: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiServiceError> {
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
    };
    let id = usecase
        .execute(CreateUserInput {
            name: body.name,
            email: body.email,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            success: true,
            id: id.to_string(),
        }),
    ))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub points: i64,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserBody,
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
        ledger: state.point_award_repo(),
    };
    let out = usecase.execute(user_id).await?;
    Ok(Json(UserResponse {
        success: true,
        user: UserBody {
            id: out.user.id.to_string(),
            name: out.user.name,
            email: out.user.email,
            points: out.points,
            created_at: out.user.created_at,
            updated_at: out.user.updated_at,
        },
    }))
}

// ── GET /api/leaderboard ─────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub user_id: String,
    pub name: String,
    pub points: i64,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub leaderboard: Vec<LeaderboardRow>,
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiServiceError> {
    let usecase = GetLeaderboardUseCase {
        ledger: state.point_award_repo(),
    };
    let entries = usecase.execute(query.limit).await?;
    let leaderboard = entries
        .into_iter()
        .map(|entry| LeaderboardRow {
            user_id: entry.user_id.to_string(),
            name: entry.name,
            points: entry.points,
        })
        .collect();
    Ok(Json(LeaderboardResponse {
        success: true,
        leaderboard,
    }))
}
