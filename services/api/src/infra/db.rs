use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use causequest_api_schema::{activities, participations, point_awards, reviews, users};
use causequest_domain::activity::ActivityStatus;
use causequest_domain::pagination::PageRequest;

use crate::domain::repository::{
    ActivityRepository, ParticipationRepository, PointAwardRepository, ReviewRepository,
    UserRepository,
};
use crate::domain::types::{Activity, LeaderboardEntry, Participation, PointAward, Review, User};
use crate::error::ApiServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<bool, ApiServiceError> {
        // Name and email each carry a unique constraint; DO NOTHING without a
        // target covers whichever one the insert trips.
        let record = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };
        let rows = users::Entity::insert(record)
            .on_conflict(OnConflict::new().do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
            .context("create user")?;
        Ok(rows > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Activity repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActivityRepository {
    pub db: DatabaseConnection,
}

impl ActivityRepository for DbActivityRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>, ApiServiceError> {
        let model = activities::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find activity by id")?;
        Ok(model.map(activity_from_model).transpose()?)
    }

    async fn create(&self, activity: &Activity) -> Result<(), ApiServiceError> {
        activities::ActiveModel {
            id: Set(activity.id),
            organizer_id: Set(activity.organizer_id),
            title: Set(activity.title.clone()),
            description: Set(activity.description.clone()),
            location: Set(activity.location.clone()),
            min_participants: Set(activity.min_participants),
            max_participants: Set(activity.max_participants),
            starts_at: Set(activity.starts_at),
            ends_at: Set(activity.ends_at),
            points_organizer: Set(activity.points_organizer),
            points_participant: Set(activity.points_participant),
            status: Set(activity.status.as_str().to_owned()),
            created_at: Set(activity.created_at),
        }
        .insert(&self.db)
        .await
        .context("create activity")?;
        Ok(())
    }

    async fn list(
        &self,
        status: Option<ActivityStatus>,
        page: PageRequest,
    ) -> Result<Vec<Activity>, ApiServiceError> {
        let page = page.clamped();
        let mut query = activities::Entity::find();
        if let Some(status) = status {
            query = query.filter(activities::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(activities::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list activities")?;
        let activities = models
            .into_iter()
            .map(activity_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(activities)
    }
}

fn activity_from_model(model: activities::Model) -> Result<Activity, anyhow::Error> {
    let status = ActivityStatus::from_str_value(&model.status)
        .ok_or_else(|| anyhow::anyhow!("unknown activity status: {}", model.status))?;
    Ok(Activity {
        id: model.id,
        organizer_id: model.organizer_id,
        title: model.title,
        description: model.description,
        location: model.location,
        min_participants: model.min_participants,
        max_participants: model.max_participants,
        starts_at: model.starts_at,
        ends_at: model.ends_at,
        points_organizer: model.points_organizer,
        points_participant: model.points_participant,
        status,
        created_at: model.created_at,
    })
}

// ── Participation repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbParticipationRepository {
    pub db: DatabaseConnection,
}

impl ParticipationRepository for DbParticipationRepository {
    async fn create(&self, participation: &Participation) -> Result<bool, ApiServiceError> {
        let record = participations::ActiveModel {
            activity_id: Set(participation.activity_id),
            user_id: Set(participation.user_id),
            otp_code: Set(participation.otp_code.clone()),
            otp_expires_at: Set(participation.otp_expires_at),
            otp_verified: Set(participation.otp_verified),
            activity_started: Set(participation.activity_started),
            activity_completed: Set(participation.activity_completed),
            points_awarded: Set(participation.points_awarded),
            created_at: Set(participation.created_at),
        };
        let rows = participations::Entity::insert(record)
            .on_conflict(
                OnConflict::columns([
                    participations::Column::ActivityId,
                    participations::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("create participation")?;
        Ok(rows > 0)
    }

    async fn find(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Participation>, ApiServiceError> {
        let model = participations::Entity::find_by_id((activity_id, user_id))
            .one(&self.db)
            .await
            .context("find participation")?;
        Ok(model.map(participation_from_model))
    }

    async fn list_by_activity(
        &self,
        activity_id: Uuid,
    ) -> Result<Vec<Participation>, ApiServiceError> {
        let models = participations::Entity::find()
            .filter(participations::Column::ActivityId.eq(activity_id))
            .order_by_asc(participations::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list participations by activity")?;
        Ok(models.into_iter().map(participation_from_model).collect())
    }

    async fn count_by_activity(&self, activity_id: Uuid) -> Result<u64, ApiServiceError> {
        use sea_orm::PaginatorTrait;
        let count = participations::Entity::find()
            .filter(participations::Column::ActivityId.eq(activity_id))
            .count(&self.db)
            .await
            .context("count participations by activity")?;
        Ok(count)
    }

    async fn assign_otp(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, ApiServiceError> {
        // Guarded on the record still being codeless and unverified, so two
        // racing issuers cannot overwrite each other's code.
        let result = participations::Entity::update_many()
            .filter(participations::Column::ActivityId.eq(activity_id))
            .filter(participations::Column::UserId.eq(user_id))
            .filter(participations::Column::OtpCode.is_null())
            .filter(participations::Column::OtpVerified.eq(false))
            .col_expr(participations::Column::OtpCode, Expr::value(code))
            .col_expr(participations::Column::OtpExpiresAt, Expr::value(expires_at))
            .exec(&self.db)
            .await
            .context("assign otp code")?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_otp(
        &self,
        activity_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Participation>, ApiServiceError> {
        let model = participations::Entity::find()
            .filter(participations::Column::ActivityId.eq(activity_id))
            .filter(participations::Column::OtpCode.eq(code))
            .filter(participations::Column::OtpVerified.eq(false))
            .filter(participations::Column::OtpExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find participation by otp")?;
        Ok(model.map(participation_from_model))
    }

    async fn mark_verified(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        code: &str,
    ) -> Result<bool, ApiServiceError> {
        // Both flags flip in one statement; zero rows means a concurrent
        // validation already spent the code.
        let result = participations::Entity::update_many()
            .filter(participations::Column::ActivityId.eq(activity_id))
            .filter(participations::Column::UserId.eq(user_id))
            .filter(participations::Column::OtpCode.eq(code))
            .filter(participations::Column::OtpVerified.eq(false))
            .col_expr(participations::Column::OtpVerified, Expr::value(true))
            .col_expr(participations::Column::ActivityStarted, Expr::value(true))
            .exec(&self.db)
            .await
            .context("mark participation verified")?;
        Ok(result.rows_affected > 0)
    }

    async fn complete_all(&self, activity_id: Uuid) -> Result<u64, ApiServiceError> {
        let result = participations::Entity::update_many()
            .filter(participations::Column::ActivityId.eq(activity_id))
            .col_expr(participations::Column::ActivityCompleted, Expr::value(true))
            .exec(&self.db)
            .await
            .context("complete all participations")?;
        Ok(result.rows_affected)
    }

    async fn latch_points_awarded(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, ApiServiceError> {
        let result = participations::Entity::update_many()
            .filter(participations::Column::ActivityId.eq(activity_id))
            .filter(participations::Column::UserId.eq(user_id))
            .filter(participations::Column::PointsAwarded.eq(false))
            .col_expr(participations::Column::PointsAwarded, Expr::value(true))
            .exec(&self.db)
            .await
            .context("latch points awarded")?;
        Ok(result.rows_affected > 0)
    }
}

fn participation_from_model(model: participations::Model) -> Participation {
    Participation {
        activity_id: model.activity_id,
        user_id: model.user_id,
        otp_code: model.otp_code,
        otp_expires_at: model.otp_expires_at,
        otp_verified: model.otp_verified,
        activity_started: model.activity_started,
        activity_completed: model.activity_completed,
        points_awarded: model.points_awarded,
        created_at: model.created_at,
    }
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn upsert(&self, review: &Review) -> Result<(), ApiServiceError> {
        let record = reviews::ActiveModel {
            activity_id: Set(review.activity_id),
            user_id: Set(review.user_id),
            rating: Set(review.rating as i16),
            comment: Set(review.comment.clone()),
            created_at: Set(review.created_at),
            updated_at: Set(review.updated_at),
        };
        reviews::Entity::insert(record)
            .on_conflict(
                OnConflict::columns([reviews::Column::ActivityId, reviews::Column::UserId])
                    .update_columns([
                        reviews::Column::Rating,
                        reviews::Column::Comment,
                        reviews::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert review")?;
        Ok(())
    }

    async fn exists(&self, activity_id: Uuid, user_id: Uuid) -> Result<bool, ApiServiceError> {
        let model = reviews::Entity::find_by_id((activity_id, user_id))
            .one(&self.db)
            .await
            .context("find review")?;
        Ok(model.is_some())
    }

    async fn list_by_activity(&self, activity_id: Uuid) -> Result<Vec<Review>, ApiServiceError> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::ActivityId.eq(activity_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list reviews by activity")?;
        Ok(models.into_iter().map(review_from_model).collect())
    }
}

fn review_from_model(model: reviews::Model) -> Review {
    Review {
        activity_id: model.activity_id,
        user_id: model.user_id,
        rating: model.rating as u8,
        comment: model.comment,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Point award repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPointAwardRepository {
    pub db: DatabaseConnection,
}

impl PointAwardRepository for DbPointAwardRepository {
    async fn append(&self, award: &PointAward) -> Result<bool, ApiServiceError> {
        // (activity_id, user_id, reason) is the idempotency key; a replay
        // inserts zero rows and credits nothing.
        let record = point_awards::ActiveModel {
            id: Set(award.id),
            user_id: Set(award.user_id),
            activity_id: Set(award.activity_id),
            reason: Set(award.reason.as_str().to_owned()),
            amount: Set(award.amount),
            created_at: Set(award.created_at),
        };
        let rows = point_awards::Entity::insert(record)
            .on_conflict(
                OnConflict::columns([
                    point_awards::Column::ActivityId,
                    point_awards::Column::UserId,
                    point_awards::Column::Reason,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("append point award")?;
        Ok(rows > 0)
    }

    async fn balance(&self, user_id: Uuid) -> Result<i64, ApiServiceError> {
        use sea_orm::FromQueryResult;

        #[derive(FromQueryResult)]
        struct BalanceRow {
            total: Option<i64>,
        }

        let row = point_awards::Entity::find()
            .select_only()
            .column_as(point_awards::Column::Amount.sum(), "total")
            .filter(point_awards::Column::UserId.eq(user_id))
            .into_model::<BalanceRow>()
            .one(&self.db)
            .await
            .context("sum point awards")?;
        Ok(row.and_then(|r| r.total).unwrap_or(0))
    }

    async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ApiServiceError> {
        use sea_orm::{ConnectionTrait, FromQueryResult, Statement};

        let sql = r#"
            SELECT u.id AS user_id, u.name, COALESCE(SUM(p.amount), 0)::BIGINT AS points
                FROM users u
                LEFT JOIN point_awards p ON p.user_id = u.id
                GROUP BY u.id, u.name
                ORDER BY points DESC, u.name ASC
                LIMIT $1
        "#;

        #[derive(Debug, FromQueryResult)]
        struct LeaderboardRow {
            user_id: Uuid,
            name: String,
            points: i64,
        }

        let rows = LeaderboardRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [(limit as i64).into()],
        ))
        .all(&self.db)
        .await
        .context("leaderboard query")?;

        Ok(rows
            .into_iter()
            .map(|row| LeaderboardEntry {
                user_id: row.user_id,
                name: row.name,
                points: row.points,
            })
            .collect())
    }
}
