use causequest_api::error::ApiServiceError;
use causequest_api::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetLeaderboardUseCase, GetUserUseCase,
};
use causequest_domain::points::AwardReason;
use uuid::Uuid;

use crate::helpers::{MockPointAwardRepo, MockUserRepo, test_award, test_user};

#[tokio::test]
async fn should_create_user_and_read_profile_with_zero_points() {
    let users = MockUserRepo::empty();
    let uc = CreateUserUseCase {
        users: users.clone(),
    };

    let id = uc
        .execute(CreateUserInput {
            name: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
        })
        .await
        .unwrap();

    let get = GetUserUseCase {
        users,
        ledger: MockPointAwardRepo::empty(),
    };
    let out = get.execute(id).await.unwrap();
    assert_eq!(out.user.name, "alice");
    assert_eq!(out.user.email, "alice@example.com");
    assert_eq!(out.points, 0, "a fresh user has no ledger events");
}

#[tokio::test]
async fn should_reject_second_user_with_same_name() {
    let uc = CreateUserUseCase {
        users: MockUserRepo::empty(),
    };
    uc.execute(CreateUserInput {
        name: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
    })
    .await
    .unwrap();

    let result = uc
        .execute(CreateUserInput {
            name: "alice".to_owned(),
            email: "other@example.com".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(ApiServiceError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_sum_profile_points_from_ledger_events() {
    let user = test_user("alice");
    let users = MockUserRepo::new(vec![user.clone()]);
    let ledger = MockPointAwardRepo::empty();
    let awards = ledger.awards_handle();
    awards.lock().unwrap().extend([
        test_award(Uuid::now_v7(), user.id, AwardReason::OrganizerCompletion, 60),
        test_award(Uuid::now_v7(), user.id, AwardReason::ParticipantReview, 25),
    ]);

    let out = GetUserUseCase { users, ledger }.execute(user.id).await.unwrap();
    assert_eq!(out.points, 85);
}

#[tokio::test]
async fn should_rank_leaderboard_by_balance_descending() {
    let alice = test_user("alice");
    let bob = test_user("bob");
    let carol = test_user("carol");

    let ledger = MockPointAwardRepo::new(vec![
        (alice.id, "alice".to_owned()),
        (bob.id, "bob".to_owned()),
        (carol.id, "carol".to_owned()),
    ]);
    let activity_id = Uuid::now_v7();
    let awards = ledger.awards_handle();
    awards.lock().unwrap().extend([
        test_award(activity_id, bob.id, AwardReason::OrganizerCompletion, 60),
        test_award(activity_id, alice.id, AwardReason::ParticipantReview, 25),
    ]);

    let entries = GetLeaderboardUseCase { ledger }.execute(None).await.unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["bob", "alice", "carol"]);
    assert_eq!(entries[0].points, 60);
    assert_eq!(entries[1].points, 25);
    assert_eq!(entries[2].points, 0, "users without awards rank with zero");
}

#[tokio::test]
async fn should_truncate_leaderboard_to_requested_limit() {
    let alice = test_user("alice");
    let bob = test_user("bob");
    let ledger = MockPointAwardRepo::new(vec![
        (alice.id, "alice".to_owned()),
        (bob.id, "bob".to_owned()),
    ]);

    let entries = GetLeaderboardUseCase { ledger }
        .execute(Some(1))
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
}
