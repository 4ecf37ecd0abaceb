use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiServiceError;
use crate::state::AppState;
use crate::usecase::otp::{
    IssueOtpsInput, IssueOtpsUseCase, ValidateOtpInput, ValidateOtpUseCase,
};

// ── POST /api/activities/{id}/generate-otp ───────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOtpRequest {
    pub user_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOtpResponse {
    pub success: bool,
    pub participant_count: usize,
    #[serde(rename = "newOTPs")]
    pub new_otps: u32,
    #[serde(rename = "existingOTPs")]
    pub existing_otps: u32,
    #[serde(serialize_with = "causequest_domain::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub message: String,
}

pub async fn generate_otp(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
    Json(body): Json<GenerateOtpRequest>,
) -> Result<Json<GenerateOtpResponse>, ApiServiceError> {
    let usecase = IssueOtpsUseCase {
        activities: state.activity_repo(),
        participations: state.participation_repo(),
    };
    let out = usecase
        .execute(IssueOtpsInput {
            activity_id,
            caller_user_id: body.user_id,
        })
        .await?;
    Ok(Json(GenerateOtpResponse {
        success: true,
        participant_count: out.participant_count,
        new_otps: out.new_codes,
        existing_otps: out.existing_codes,
        expires_at: out.expires_at,
        message: format!(
            "generated {} new OTP codes ({} already issued)",
            out.new_codes, out.existing_codes
        ),
    }))
}

// ── POST /api/activities/{id}/validate-otp ───────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOtpRequest {
    pub user_id: Uuid,
    pub otp_code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOtpResponse {
    pub success: bool,
    pub message: String,
    pub participant_name: String,
}

pub async fn validate_otp(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
    Json(body): Json<ValidateOtpRequest>,
) -> Result<Json<ValidateOtpResponse>, ApiServiceError> {
    let usecase = ValidateOtpUseCase {
        activities: state.activity_repo(),
        participations: state.participation_repo(),
        users: state.user_repo(),
    };
    let out = usecase
        .execute(ValidateOtpInput {
            activity_id,
            caller_user_id: body.user_id,
            otp_code: body.otp_code,
        })
        .await?;
    Ok(Json(ValidateOtpResponse {
        success: true,
        message: format!("attendance verified for {}", out.participant_name),
        participant_name: out.participant_name,
    }))
}
