use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{PointAwardRepository, UserRepository};
use crate::domain::types::{
    LEADERBOARD_DEFAULT_LIMIT, LEADERBOARD_MAX_LIMIT, LeaderboardEntry, User,
};
use crate::error::ApiServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub email: String,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<Uuid, ApiServiceError> {
        let name = input.name.trim();
        let email = input.email.trim();
        if name.is_empty() || email.is_empty() || !email.contains('@') {
            return Err(ApiServiceError::MissingData);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            email: email.to_owned(),
            created_at: now,
            updated_at: now,
        };
        if !self.users.create(&user).await? {
            return Err(ApiServiceError::UserAlreadyExists);
        }
        Ok(user.id)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserOutput {
    pub user: User,
    pub points: i64,
}

pub struct GetUserUseCase<U, L>
where
    U: UserRepository,
    L: PointAwardRepository,
{
    pub users: U,
    pub ledger: L,
}

impl<U, L> GetUserUseCase<U, L>
where
    U: UserRepository,
    L: PointAwardRepository,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<GetUserOutput, ApiServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        let points = self.ledger.balance(user_id).await?;
        Ok(GetUserOutput { user, points })
    }
}

// ── GetLeaderboard ───────────────────────────────────────────────────────────

pub struct GetLeaderboardUseCase<L: PointAwardRepository> {
    pub ledger: L,
}

impl<L: PointAwardRepository> GetLeaderboardUseCase<L> {
    pub async fn execute(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<LeaderboardEntry>, ApiServiceError> {
        let limit = limit
            .unwrap_or(LEADERBOARD_DEFAULT_LIMIT)
            .clamp(1, LEADERBOARD_MAX_LIMIT);
        self.ledger.leaderboard(limit).await
    }
}
