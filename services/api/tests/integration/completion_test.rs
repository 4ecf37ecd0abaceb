use causequest_api::error::ApiServiceError;
use causequest_api::usecase::completion::{CompleteActivityInput, CompleteActivityUseCase};
use causequest_domain::points::AwardReason;

use crate::helpers::{
    MockActivityRepo, MockParticipationRepo, MockPointAwardRepo, joined_record, test_activity,
    test_user,
};

#[tokio::test]
async fn should_complete_all_records_and_credit_organizer() {
    let organizer = test_user("organizer");
    let alice = test_user("alice");
    let bob = test_user("bob");
    let activity = test_activity(organizer.id);

    let mut verified = joined_record(activity.id, alice.id);
    verified.otp_verified = true;
    verified.activity_started = true;
    let fresh = joined_record(activity.id, bob.id);

    let participations = MockParticipationRepo::new(vec![verified, fresh]);
    let ledger = MockPointAwardRepo::empty();
    let records = participations.records_handle();
    let awards = ledger.awards_handle();

    let uc = CompleteActivityUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations,
        ledger,
    };
    let out = uc
        .execute(CompleteActivityInput {
            activity_id: activity.id,
            caller_user_id: organizer.id,
        })
        .await
        .unwrap();

    assert_eq!(out.participants_completed, 2);
    assert_eq!(out.points_earned, activity.points_organizer);
    assert!(out.first_completion);

    // Completion covers every participant, attended or not.
    let records = records.lock().unwrap();
    assert!(records.iter().all(|r| r.activity_completed));

    let awards = awards.lock().unwrap();
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].user_id, organizer.id);
    assert_eq!(awards[0].reason, AwardReason::OrganizerCompletion);
    assert_eq!(awards[0].amount, activity.points_organizer);
}

#[tokio::test]
async fn should_credit_organizer_once_on_repeat_completion() {
    let organizer = test_user("organizer");
    let alice = test_user("alice");
    let activity = test_activity(organizer.id);

    let ledger = MockPointAwardRepo::empty();
    let awards = ledger.awards_handle();

    let uc = CompleteActivityUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations: MockParticipationRepo::new(vec![joined_record(activity.id, alice.id)]),
        ledger,
    };
    let first = uc
        .execute(CompleteActivityInput {
            activity_id: activity.id,
            caller_user_id: organizer.id,
        })
        .await
        .unwrap();
    let second = uc
        .execute(CompleteActivityInput {
            activity_id: activity.id,
            caller_user_id: organizer.id,
        })
        .await
        .unwrap();

    assert!(first.first_completion);
    assert_eq!(first.points_earned, activity.points_organizer);

    assert!(!second.first_completion);
    assert_eq!(second.points_earned, 0, "repeat completion earns nothing");

    assert_eq!(awards.lock().unwrap().len(), 1, "ledger holds a single credit");
}

#[tokio::test]
async fn should_fail_completion_for_non_organizer() {
    let organizer = test_user("organizer");
    let alice = test_user("alice");
    let activity = test_activity(organizer.id);

    let uc = CompleteActivityUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations: MockParticipationRepo::new(vec![joined_record(activity.id, alice.id)]),
        ledger: MockPointAwardRepo::empty(),
    };
    let result = uc
        .execute(CompleteActivityInput {
            activity_id: activity.id,
            caller_user_id: alice.id,
        })
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::NotAuthorized(_))),
        "expected NotAuthorized, got {result:?}"
    );
}

#[tokio::test]
async fn should_fail_completion_with_no_participants() {
    let organizer = test_user("organizer");
    let activity = test_activity(organizer.id);

    let uc = CompleteActivityUseCase {
        activities: MockActivityRepo::new(vec![activity.clone()]),
        participations: MockParticipationRepo::empty(),
        ledger: MockPointAwardRepo::empty(),
    };
    let result = uc
        .execute(CompleteActivityInput {
            activity_id: activity.id,
            caller_user_id: organizer.id,
        })
        .await;
    assert!(
        matches!(result, Err(ApiServiceError::NoParticipants)),
        "expected NoParticipants, got {result:?}"
    );
}
