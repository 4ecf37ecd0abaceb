use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{ActivityRepository, ParticipationRepository, UserRepository};
use crate::domain::types::{OTP_CODE_MAX, OTP_CODE_MIN, OTP_TTL_HOURS};
use crate::error::ApiServiceError;

/// Generate a 6-digit attendance code. Codes are not deduplicated across
/// participants of one issuance pass; collisions are accepted and the
/// validator simply verifies whichever matching record it finds first.
pub fn generate_otp_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(OTP_CODE_MIN..=OTP_CODE_MAX).to_string()
}

// ── IssueOtps ────────────────────────────────────────────────────────────────

pub struct IssueOtpsInput {
    pub activity_id: Uuid,
    pub caller_user_id: Uuid,
}

#[derive(Debug)]
pub struct IssueOtpsOutput {
    pub participant_count: usize,
    pub new_codes: u32,
    pub existing_codes: u32,
    pub expires_at: DateTime<Utc>,
}

pub struct IssueOtpsUseCase<A, P>
where
    A: ActivityRepository,
    P: ParticipationRepository,
{
    pub activities: A,
    pub participations: P,
}

impl<A, P> IssueOtpsUseCase<A, P>
where
    A: ActivityRepository,
    P: ParticipationRepository,
{
    pub async fn execute(&self, input: IssueOtpsInput) -> Result<IssueOtpsOutput, ApiServiceError> {
        let activity = self
            .activities
            .find_by_id(input.activity_id)
            .await?
            .ok_or(ApiServiceError::ActivityNotFound)?;
        if activity.organizer_id != input.caller_user_id {
            return Err(ApiServiceError::NotAuthorized("issue attendance codes"));
        }

        let records = self
            .participations
            .list_by_activity(input.activity_id)
            .await?;
        if records.is_empty() {
            return Err(ApiServiceError::NoParticipants);
        }

        let expires_at = Utc::now() + Duration::hours(OTP_TTL_HOURS);
        let mut new_codes = 0u32;
        let mut existing_codes = 0u32;
        for record in &records {
            if record.otp_verified {
                continue;
            }
            if record.otp_code.is_some() {
                existing_codes += 1;
                continue;
            }
            let code = generate_otp_code();
            let assigned = self
                .participations
                .assign_otp(input.activity_id, record.user_id, &code, expires_at)
                .await?;
            if assigned {
                new_codes += 1;
            } else {
                existing_codes += 1;
            }
        }

        Ok(IssueOtpsOutput {
            participant_count: records.len(),
            new_codes,
            existing_codes,
            expires_at,
        })
    }
}

// ── ValidateOtp ──────────────────────────────────────────────────────────────

pub struct ValidateOtpInput {
    pub activity_id: Uuid,
    pub caller_user_id: Uuid,
    pub otp_code: String,
}

#[derive(Debug)]
pub struct ValidateOtpOutput {
    pub participant_id: Uuid,
    pub participant_name: String,
}

pub struct ValidateOtpUseCase<A, P, U>
where
    A: ActivityRepository,
    P: ParticipationRepository,
    U: UserRepository,
{
    pub activities: A,
    pub participations: P,
    pub users: U,
}

impl<A, P, U> ValidateOtpUseCase<A, P, U>
where
    A: ActivityRepository,
    P: ParticipationRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        input: ValidateOtpInput,
    ) -> Result<ValidateOtpOutput, ApiServiceError> {
        let activity = self
            .activities
            .find_by_id(input.activity_id)
            .await?
            .ok_or(ApiServiceError::ActivityNotFound)?;
        if activity.organizer_id != input.caller_user_id {
            return Err(ApiServiceError::NotAuthorized("validate attendance codes"));
        }

        // Wrong code, already-verified code, and expired code all collapse
        // into the same error on purpose: the organizer reads codes aloud and
        // gets one retryable failure mode.
        let record = self
            .participations
            .find_by_otp(input.activity_id, &input.otp_code, Utc::now())
            .await?
            .ok_or(ApiServiceError::InvalidOrExpiredOtp)?;

        let flipped = self
            .participations
            .mark_verified(input.activity_id, record.user_id, &input.otp_code)
            .await?;
        if !flipped {
            // A concurrent validation of the same code won the conditional
            // update; for this caller the code is spent.
            return Err(ApiServiceError::InvalidOrExpiredOtp);
        }

        let participant = self
            .users
            .find_by_id(record.user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        Ok(ValidateOtpOutput {
            participant_id: participant.id,
            participant_name: participant.name,
        })
    }
}
