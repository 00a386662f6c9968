mod common;

use libris::{
    error::AppError,
    models::{
        notification::NotificationKind,
        request::{NewRequest, RequestDecision, RequestStatus},
    },
};

fn new_request(user_id: &str, user_name: &str, title: &str) -> NewRequest {
    NewRequest {
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        book_title: title.to_string(),
        author: "Some Author".to_string(),
        reason: "Course reading".to_string(),
    }
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let app = common::setup().await;
    let student = app.register_student("Alice", "alice@lib.com").await;

    let err = app
        .services
        .requests
        .submit(new_request(&student.id, "Alice", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.to_string(), "Book title is required.");
}

#[tokio::test]
async fn submit_starts_pending_and_notifies_every_admin() {
    let app = common::setup().await;
    let admin_a = app.register_admin("Admin A", "a@lib.com").await;
    let admin_b = app.register_admin("Admin B", "b@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;

    let request = app
        .services
        .requests
        .submit(new_request(&student.id, "Alice", "Hyperion"))
        .await
        .expect("submit failed");

    assert!(request.id.starts_with("REQ-"));
    assert_eq!(request.status, RequestStatus::Pending);
    assert!(request.admin_note.is_empty());

    for admin in [&admin_a, &admin_b] {
        let feed = app
            .services
            .notifications
            .feed_for_user(&admin.id)
            .await
            .expect("feed failed");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].message, "New request from Alice: 'Hyperion'");
        assert_eq!(feed[0].kind, NotificationKind::Info);
    }

    // The requester is not notified about their own submission.
    let student_feed = app
        .services
        .notifications
        .feed_for_user(&student.id)
        .await
        .expect("feed failed");
    assert!(student_feed.is_empty());

    assert_eq!(
        app.services.requests.pending_count().await.expect("count failed"),
        1
    );
}

#[tokio::test]
async fn approval_notifies_the_requester_exactly_once_with_the_note() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;

    let request = app
        .services
        .requests
        .submit(new_request(&student.id, "Alice", "Hyperion"))
        .await
        .expect("submit failed");

    let outcome = app
        .services
        .requests
        .respond(&request.id, RequestDecision::Approved, "Ordering 2 copies", &admin.name)
        .await
        .expect("respond failed");
    assert_eq!(outcome, "Request approved and requester notified.");

    let feed = app
        .services
        .notifications
        .feed_for_user(&student.id)
        .await
        .expect("feed failed");
    assert_eq!(feed.len(), 1);
    assert_eq!(
        feed[0].message,
        "Your request for 'Hyperion' was approved. Admin note: Ordering 2 copies"
    );
    assert_eq!(feed[0].kind, NotificationKind::Success);

    let stored = app
        .services
        .requests
        .requests_for_user(&student.id)
        .await
        .expect("list failed");
    assert_eq!(stored[0].status, RequestStatus::Approved);
    assert_eq!(stored[0].admin_note, "Ordering 2 copies");

    assert_eq!(
        app.services.requests.pending_count().await.expect("count failed"),
        0
    );
}

#[tokio::test]
async fn rejection_sends_a_warning_without_note_suffix() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;

    let request = app
        .services
        .requests
        .submit(new_request(&student.id, "Alice", "Hyperion"))
        .await
        .expect("submit failed");

    app.services
        .requests
        .respond(&request.id, RequestDecision::Rejected, "  ", &admin.name)
        .await
        .expect("respond failed");

    let feed = app
        .services
        .notifications
        .feed_for_user(&student.id)
        .await
        .expect("feed failed");
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].message, "Your request for 'Hyperion' was rejected.");
    assert_eq!(feed[0].kind, NotificationKind::Warning);
}

#[tokio::test]
async fn responding_to_an_unknown_request_is_not_found() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;

    let err = app
        .services
        .requests
        .respond("REQ-MISSING", RequestDecision::Approved, "", &admin.name)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn re_resolution_overwrites_the_decision() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;

    let request = app
        .services
        .requests
        .submit(new_request(&student.id, "Alice", "Hyperion"))
        .await
        .expect("submit failed");

    app.services
        .requests
        .respond(&request.id, RequestDecision::Rejected, "Out of budget", &admin.name)
        .await
        .expect("respond failed");
    app.services
        .requests
        .respond(&request.id, RequestDecision::Approved, "Budget found", &admin.name)
        .await
        .expect("respond failed");

    let stored = app
        .services
        .requests
        .requests_for_user(&student.id)
        .await
        .expect("list failed");
    assert_eq!(stored[0].status, RequestStatus::Approved);
    assert_eq!(stored[0].admin_note, "Budget found");

    // One notification per resolution.
    let feed = app
        .services
        .notifications
        .feed_for_user(&student.id)
        .await
        .expect("feed failed");
    assert_eq!(feed.len(), 2);
}
