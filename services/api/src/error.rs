use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service domain error variants.
///
/// `NotAuthorized` carries the action the caller attempted so the message
/// reads "only the organizer can validate attendance codes" and so on.
#[derive(Debug, thiserror::Error)]
pub enum ApiServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("activity not found")]
    ActivityNotFound,
    #[error("participation not found")]
    ParticipationNotFound,
    #[error("activity has no participants")]
    NoParticipants,
    #[error("only the organizer can {0}")]
    NotAuthorized(&'static str),
    #[error("invalid OTP or participant already verified")]
    InvalidOrExpiredOtp,
    #[error("you can only review activities you have completed")]
    NotEligible,
    #[error("user has already joined this activity")]
    DuplicateParticipant,
    #[error("activity is already full")]
    ActivityFull,
    #[error("activity is not active")]
    ActivityNotActive,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("rating must be between 1 and 5")]
    InvalidRating,
    #[error("invalid activity definition")]
    InvalidActivity,
    #[error("missing or invalid data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ActivityNotFound => "ACTIVITY_NOT_FOUND",
            Self::ParticipationNotFound => "PARTICIPATION_NOT_FOUND",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::NotAuthorized(_) => "NOT_AUTHORIZED",
            Self::InvalidOrExpiredOtp => "INVALID_OR_EXPIRED_OTP",
            Self::NotEligible => "NOT_ELIGIBLE",
            Self::DuplicateParticipant => "DUPLICATE_PARTICIPANT",
            Self::ActivityFull => "ACTIVITY_FULL",
            Self::ActivityNotActive => "ACTIVITY_NOT_ACTIVE",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidRating => "INVALID_RATING",
            Self::InvalidActivity => "INVALID_ACTIVITY",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::ActivityNotFound
            | Self::ParticipationNotFound
            | Self::NoParticipants => StatusCode::NOT_FOUND,
            Self::NotAuthorized(_) | Self::NotEligible => StatusCode::FORBIDDEN,
            Self::DuplicateParticipant
            | Self::ActivityFull
            | Self::ActivityNotActive
            | Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidOrExpiredOtp
            | Self::InvalidRating
            | Self::InvalidActivity
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests, and 4xx are expected client errors. Internal errors
        // need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        (status, axum::Json(body)).into_response()
    }
}
