use chrono::{Duration, Utc};
use uuid::Uuid;

use causequest_api::domain::types::{Activity, User};
use causequest_api::error::ApiServiceError;
use causequest_api::usecase::otp::{
    IssueOtpsInput, IssueOtpsUseCase, ValidateOtpInput, ValidateOtpUseCase,
};

use crate::helpers::{
    MockActivityRepo, MockParticipationRepo, MockUserRepo, joined_record, test_activity,
    test_user,
};

fn setup() -> (User, User, Activity, MockParticipationRepo) {
    let organizer = test_user("organizer");
    let participant = test_user("alice");
    let activity = test_activity(organizer.id);
    let participations =
        MockParticipationRepo::new(vec![joined_record(activity.id, participant.id)]);
    (organizer, participant, activity, participations)
}

async fn issue(
    activity: &Activity,
    caller: Uuid,
    participations: MockParticipationRepo,
) -> Result<causequest_api::usecase::otp::IssueOtpsOutput, ApiServiceError> {
    let uc = IssueOtpsUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations,
    };
    uc.execute(IssueOtpsInput {
        activity_id: activity.id,
        caller_user_id: caller,
    })
    .await
}

#[tokio::test]
async fn should_issue_six_digit_code_to_joined_participant() {
    let (organizer, _participant, activity, participations) = setup();
    let records = participations.records_handle();

    let out = issue(&activity, organizer.id, participations).await.unwrap();

    assert_eq!(out.participant_count, 1);
    assert_eq!(out.new_codes, 1);
    assert_eq!(out.existing_codes, 0);
    assert!(out.expires_at > Utc::now(), "expiry lies in the future");

    let records = records.lock().unwrap();
    let code = records[0].otp_code.as_deref().expect("code assigned");
    assert_eq!(code.len(), 6);
    assert!(
        code.chars().all(|c| c.is_ascii_digit()),
        "code should be numeric, got {code:?}"
    );
    assert_eq!(records[0].otp_expires_at, Some(out.expires_at));
}

#[tokio::test]
async fn should_count_already_issued_code_on_reissue() {
    let (organizer, _participant, activity, participations) = setup();
    let records = participations.records_handle();

    issue(&activity, organizer.id, participations.clone())
        .await
        .unwrap();
    let first_code = records.lock().unwrap()[0].otp_code.clone();

    let out = issue(&activity, organizer.id, participations).await.unwrap();
    assert_eq!(out.new_codes, 0);
    assert_eq!(out.existing_codes, 1);
    assert_eq!(
        records.lock().unwrap()[0].otp_code,
        first_code,
        "reissue must not replace an existing code"
    );
}

#[tokio::test]
async fn should_skip_verified_participants_on_issue() {
    let organizer = test_user("organizer");
    let alice = test_user("alice");
    let bob = test_user("bob");
    let activity = test_activity(organizer.id);

    let mut verified = joined_record(activity.id, alice.id);
    verified.otp_code = Some("123456".to_owned());
    verified.otp_expires_at = Some(Utc::now() + Duration::hours(1));
    verified.otp_verified = true;
    verified.activity_started = true;
    let fresh = joined_record(activity.id, bob.id);

    let participations = MockParticipationRepo::new(vec![verified, fresh]);
    let records = participations.records_handle();

    let out = issue(&activity, organizer.id, participations).await.unwrap();
    assert_eq!(out.participant_count, 2);
    assert_eq!(out.new_codes, 1, "only the unverified participant gets a code");
    assert_eq!(out.existing_codes, 0);

    let records = records.lock().unwrap();
    assert_eq!(
        records[0].otp_code.as_deref(),
        Some("123456"),
        "verified record keeps its code"
    );
    assert!(records[1].otp_code.is_some());
}

#[tokio::test]
async fn should_fail_issue_for_non_organizer() {
    let (_organizer, participant, activity, participations) = setup();
    let result = issue(&activity, participant.id, participations).await;
    assert!(
        matches!(result, Err(ApiServiceError::NotAuthorized(_))),
        "expected NotAuthorized, got {result:?}"
    );
}

#[tokio::test]
async fn should_fail_issue_with_no_participants() {
    let organizer = test_user("organizer");
    let activity = test_activity(organizer.id);
    let result = issue(&activity, organizer.id, MockParticipationRepo::empty()).await;
    assert!(
        matches!(result, Err(ApiServiceError::NoParticipants)),
        "expected NoParticipants, got {result:?}"
    );
}

#[tokio::test]
async fn should_verify_attendance_and_flip_both_start_flags() {
    let (organizer, participant, activity, participations) = setup();
    let records = participations.records_handle();
    issue(&activity, organizer.id, participations.clone())
        .await
        .unwrap();
    let code = records.lock().unwrap()[0].otp_code.clone().unwrap();

    let uc = ValidateOtpUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations,
        users: MockUserRepo::new(vec![organizer.clone(), participant.clone()]),
    };
    let out = uc
        .execute(ValidateOtpInput {
            activity_id: activity.id,
            caller_user_id: organizer.id,
            otp_code: code,
        })
        .await
        .unwrap();

    assert_eq!(out.participant_id, participant.id);
    assert_eq!(out.participant_name, "alice");

    let records = records.lock().unwrap();
    assert!(records[0].otp_verified);
    assert!(
        records[0].activity_started,
        "verification and start flip together"
    );
}

#[tokio::test]
async fn should_reject_second_validation_of_same_code() {
    let (organizer, participant, activity, participations) = setup();
    let records = participations.records_handle();
    issue(&activity, organizer.id, participations.clone())
        .await
        .unwrap();
    let code = records.lock().unwrap()[0].otp_code.clone().unwrap();

    let uc = ValidateOtpUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations,
        users: MockUserRepo::new(vec![organizer.clone(), participant]),
    };
    uc.execute(ValidateOtpInput {
        activity_id: activity.id,
        caller_user_id: organizer.id,
        otp_code: code.clone(),
    })
    .await
    .unwrap();

    let result = uc
        .execute(ValidateOtpInput {
            activity_id: activity.id,
            caller_user_id: organizer.id,
            otp_code: code,
        })
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidOrExpiredOtp)),
        "expected InvalidOrExpiredOtp, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_code() {
    let (organizer, participant, activity, participations) = setup();
    issue(&activity, organizer.id, participations.clone())
        .await
        .unwrap();

    let uc = ValidateOtpUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations,
        users: MockUserRepo::new(vec![organizer.clone(), participant]),
    };
    // Generated codes never start with 0, so this cannot collide.
    let result = uc
        .execute(ValidateOtpInput {
            activity_id: activity.id,
            caller_user_id: organizer.id,
            otp_code: "000000".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidOrExpiredOtp)),
        "expected InvalidOrExpiredOtp, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_code() {
    let organizer = test_user("organizer");
    let participant = test_user("alice");
    let activity = test_activity(organizer.id);
    let mut record = joined_record(activity.id, participant.id);
    record.otp_code = Some("123456".to_owned());
    record.otp_expires_at = Some(Utc::now() - Duration::hours(1));

    let uc = ValidateOtpUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations: MockParticipationRepo::new(vec![record]),
        users: MockUserRepo::new(vec![organizer.clone(), participant]),
    };
    let result = uc
        .execute(ValidateOtpInput {
            activity_id: activity.id,
            caller_user_id: organizer.id,
            otp_code: "123456".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::InvalidOrExpiredOtp)),
        "expected InvalidOrExpiredOtp, got {result:?}"
    );
}

#[tokio::test]
async fn should_fail_validation_for_non_organizer_even_with_valid_code() {
    let (organizer, participant, activity, participations) = setup();
    let records = participations.records_handle();
    issue(&activity, organizer.id, participations.clone())
        .await
        .unwrap();
    let code = records.lock().unwrap()[0].otp_code.clone().unwrap();

    let uc = ValidateOtpUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations,
        users: MockUserRepo::new(vec![organizer, participant.clone()]),
    };
    let result = uc
        .execute(ValidateOtpInput {
            activity_id: activity.id,
            caller_user_id: participant.id,
            otp_code: code,
        })
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::NotAuthorized(_))),
        "expected NotAuthorized, got {result:?}"
    );
}
