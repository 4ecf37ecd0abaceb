use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbActivityRepository, DbParticipationRepository, DbPointAwardRepository, DbReviewRepository,
    DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn activity_repo(&self) -> DbActivityRepository {
        DbActivityRepository {
            db: self.db.clone(),
        }
    }

    pub fn participation_repo(&self) -> DbParticipationRepository {
        DbParticipationRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }

    pub fn point_award_repo(&self) -> DbPointAwardRepository {
        DbPointAwardRepository {
            db: self.db.clone(),
        }
    }
}
