use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use causequest_api::domain::repository::{
    ActivityRepository, ParticipationRepository, PointAwardRepository, ReviewRepository,
    UserRepository,
};
use causequest_api::domain::types::{
    Activity, LeaderboardEntry, Participation, PointAward, Review, User,
};
use causequest_api::error::ApiServiceError;
use causequest_domain::activity::ActivityStatus;
use causequest_domain::pagination::PageRequest;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &User) -> Result<bool, ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.name == user.name || u.email == user.email)
        {
            return Ok(false);
        }
        users.push(user.clone());
        Ok(true)
    }
}

// ── MockActivityRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockActivityRepo {
    pub activities: Arc<Mutex<Vec<Activity>>>,
}

impl MockActivityRepo {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            activities: Arc::new(Mutex::new(activities)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl ActivityRepository for MockActivityRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>, ApiServiceError> {
        Ok(self
            .activities
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, activity: &Activity) -> Result<(), ApiServiceError> {
        self.activities.lock().unwrap().push(activity.clone());
        Ok(())
    }

    async fn list(
        &self,
        status: Option<ActivityStatus>,
        page: PageRequest,
    ) -> Result<Vec<Activity>, ApiServiceError> {
        let page = page.clamped();
        let mut items: Vec<Activity> = self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|a| status.is_none_or(|s| a.status == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect())
    }
}

// ── MockParticipationRepo ────────────────────────────────────────────────────

/// In-memory participation store with the same conditional-update semantics
/// as the database repository: every mutation checks its guard under the lock
/// and reports whether it changed anything.
#[derive(Clone)]
pub struct MockParticipationRepo {
    pub records: Arc<Mutex<Vec<Participation>>>,
}

impl MockParticipationRepo {
    pub fn new(records: Vec<Participation>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the record list for post-execution inspection.
    pub fn records_handle(&self) -> Arc<Mutex<Vec<Participation>>> {
        Arc::clone(&self.records)
    }
}

impl ParticipationRepository for MockParticipationRepo {
    async fn create(&self, participation: &Participation) -> Result<bool, ApiServiceError> {
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.activity_id == participation.activity_id && r.user_id == participation.user_id)
        {
            return Ok(false);
        }
        records.push(participation.clone());
        Ok(true)
    }

    async fn find(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Participation>, ApiServiceError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.activity_id == activity_id && r.user_id == user_id)
            .cloned())
    }

    async fn list_by_activity(
        &self,
        activity_id: Uuid,
    ) -> Result<Vec<Participation>, ApiServiceError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.activity_id == activity_id)
            .cloned()
            .collect())
    }

    async fn count_by_activity(&self, activity_id: Uuid) -> Result<u64, ApiServiceError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.activity_id == activity_id)
            .count() as u64)
    }

    async fn assign_otp(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, ApiServiceError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| {
            r.activity_id == activity_id
                && r.user_id == user_id
                && r.otp_code.is_none()
                && !r.otp_verified
        }) {
            Some(record) => {
                record.otp_code = Some(code.to_owned());
                record.otp_expires_at = Some(expires_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_otp(
        &self,
        activity_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Participation>, ApiServiceError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                r.activity_id == activity_id
                    && r.otp_code.as_deref() == Some(code)
                    && r.otp_live(now)
            })
            .cloned())
    }

    async fn mark_verified(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        code: &str,
    ) -> Result<bool, ApiServiceError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| {
            r.activity_id == activity_id
                && r.user_id == user_id
                && r.otp_code.as_deref() == Some(code)
                && !r.otp_verified
        }) {
            Some(record) => {
                record.otp_verified = true;
                record.activity_started = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn complete_all(&self, activity_id: Uuid) -> Result<u64, ApiServiceError> {
        let mut records = self.records.lock().unwrap();
        let mut rows = 0u64;
        for record in records.iter_mut().filter(|r| r.activity_id == activity_id) {
            record.activity_completed = true;
            rows += 1;
        }
        Ok(rows)
    }

    async fn latch_points_awarded(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, ApiServiceError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| {
            r.activity_id == activity_id && r.user_id == user_id && !r.points_awarded
        }) {
            Some(record) => {
                record.points_awarded = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockReviewRepo ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockReviewRepo {
    pub reviews: Arc<Mutex<Vec<Review>>>,
}

impl MockReviewRepo {
    pub fn empty() -> Self {
        Self {
            reviews: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn reviews_handle(&self) -> Arc<Mutex<Vec<Review>>> {
        Arc::clone(&self.reviews)
    }
}

impl ReviewRepository for MockReviewRepo {
    async fn upsert(&self, review: &Review) -> Result<(), ApiServiceError> {
        let mut reviews = self.reviews.lock().unwrap();
        match reviews
            .iter_mut()
            .find(|r| r.activity_id == review.activity_id && r.user_id == review.user_id)
        {
            Some(existing) => {
                existing.rating = review.rating;
                existing.comment = review.comment.clone();
                existing.updated_at = review.updated_at;
            }
            None => reviews.push(review.clone()),
        }
        Ok(())
    }

    async fn exists(&self, activity_id: Uuid, user_id: Uuid) -> Result<bool, ApiServiceError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.activity_id == activity_id && r.user_id == user_id))
    }

    async fn list_by_activity(&self, activity_id: Uuid) -> Result<Vec<Review>, ApiServiceError> {
        let mut items: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.activity_id == activity_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

// ── MockPointAwardRepo ───────────────────────────────────────────────────────

/// In-memory award ledger. `names` stands in for the users table the real
/// leaderboard joins against; users without awards rank with zero points.
#[derive(Clone)]
pub struct MockPointAwardRepo {
    pub awards: Arc<Mutex<Vec<PointAward>>>,
    pub names: Vec<(Uuid, String)>,
}

impl MockPointAwardRepo {
    pub fn new(names: Vec<(Uuid, String)>) -> Self {
        Self {
            awards: Arc::new(Mutex::new(vec![])),
            names,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the appended events for post-execution inspection.
    pub fn awards_handle(&self) -> Arc<Mutex<Vec<PointAward>>> {
        Arc::clone(&self.awards)
    }
}

impl PointAwardRepository for MockPointAwardRepo {
    async fn append(&self, award: &PointAward) -> Result<bool, ApiServiceError> {
        let mut awards = self.awards.lock().unwrap();
        if awards.iter().any(|a| {
            a.activity_id == award.activity_id
                && a.user_id == award.user_id
                && a.reason == award.reason
        }) {
            return Ok(false);
        }
        awards.push(award.clone());
        Ok(true)
    }

    async fn balance(&self, user_id: Uuid) -> Result<i64, ApiServiceError> {
        Ok(self
            .awards
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.amount as i64)
            .sum())
    }

    async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ApiServiceError> {
        let awards = self.awards.lock().unwrap();
        let mut entries: Vec<LeaderboardEntry> = self
            .names
            .iter()
            .map(|(user_id, name)| LeaderboardEntry {
                user_id: *user_id,
                name: name.clone(),
                points: awards
                    .iter()
                    .filter(|a| a.user_id == *user_id)
                    .map(|a| a.amount as i64)
                    .sum(),
            })
            .collect();
        entries.sort_by(|a, b| b.points.cmp(&a.points).then(a.name.cmp(&b.name)));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_user(name: &str) -> User {
    User {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        email: format!("{name}@example.com"),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_activity(organizer_id: Uuid) -> Activity {
    Activity {
        id: Uuid::now_v7(),
        organizer_id,
        title: "beach cleanup".to_owned(),
        description: Some("bring gloves".to_owned()),
        location: Some("north pier".to_owned()),
        min_participants: 1,
        max_participants: 10,
        starts_at: Utc::now() + Duration::hours(1),
        ends_at: Utc::now() + Duration::hours(3),
        points_organizer: 60,
        points_participant: 25,
        status: ActivityStatus::Active,
        created_at: Utc::now(),
    }
}

pub fn test_award(
    activity_id: Uuid,
    user_id: Uuid,
    reason: causequest_domain::points::AwardReason,
    amount: i32,
) -> PointAward {
    PointAward {
        id: Uuid::new_v4(),
        user_id,
        activity_id,
        reason,
        amount,
        created_at: Utc::now(),
    }
}

pub fn joined_record(activity_id: Uuid, user_id: Uuid) -> Participation {
    Participation {
        activity_id,
        user_id,
        otp_code: None,
        otp_expires_at: None,
        otp_verified: false,
        activity_started: false,
        activity_completed: false,
        points_awarded: false,
        created_at: Utc::now(),
    }
}
