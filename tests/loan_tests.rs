mod common;

use chrono::Duration;
use libris::error::AppError;

#[tokio::test]
async fn issue_decrements_availability_and_notifies_borrower() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 3).await;

    let receipt = app
        .services
        .loans
        .issue(&book.id, &student.id)
        .await
        .expect("issue failed");

    assert_eq!(receipt.due_date, common::start_of_term() + Duration::days(7));
    assert!(receipt.message.contains("'Dune' issued!"));

    let book = app.book(&book.id).await;
    assert_eq!(book.available_copies, 2);
    assert_eq!(book.borrow_count, 1);

    let feed = app
        .services
        .notifications
        .feed_for_user(&student.id)
        .await
        .expect("feed failed");
    assert_eq!(feed.len(), 1);
    assert!(feed[0].message.contains("'Dune' issued."));
    assert!(!feed[0].is_read);
}

#[tokio::test]
async fn issue_rejects_unknown_book_and_unknown_user() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 1).await;

    let err = app
        .services
        .loans
        .issue("BK-MISSING", &student.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = app
        .services
        .loans
        .issue(&book.id, "USR-MISSING")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Nothing changed.
    assert_eq!(app.book(&book.id).await.available_copies, 1);
}

#[tokio::test]
async fn duplicate_issue_conflicts_and_leaves_state_unchanged() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 3).await;

    app.services
        .loans
        .issue(&book.id, &student.id)
        .await
        .expect("first issue failed");

    let err = app
        .services
        .loans
        .issue(&book.id, &student.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.to_string().contains("already have this book"));

    let book = app.book(&book.id).await;
    assert_eq!(book.available_copies, 2);
    assert_eq!(book.borrow_count, 1);
}

#[tokio::test]
async fn reissuing_the_last_copy_you_hold_is_out_of_stock() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 1).await;

    app.services
        .loans
        .issue(&book.id, &student.id)
        .await
        .expect("first issue failed");

    // No copy left on the shelf, so availability wins over the
    // duplicate-loan conflict.
    let err = app
        .services
        .loans
        .issue(&book.id, &student.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::OutOfStock(_)));
    assert!(err.to_string().contains("fully issued"));

    let book = app.book(&book.id).await;
    assert_eq!(book.available_copies, 0);
    assert_eq!(book.borrow_count, 1);
}

#[tokio::test]
async fn last_copy_contention_resolves_after_return() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let alice = app.register_student("Alice", "alice@lib.com").await;
    let bob = app.register_student("Bob", "bob@lib.com").await;
    let book = app.add_book(&admin, "Neuromancer", 1).await;

    app.services
        .loans
        .issue(&book.id, &alice.id)
        .await
        .expect("issue to alice failed");

    let err = app
        .services
        .loans
        .issue(&book.id, &bob.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::OutOfStock(_)));
    assert!(err.to_string().contains("fully issued"));

    app.services
        .loans
        .return_book(&book.id, &alice.id)
        .await
        .expect("return failed");

    app.services
        .loans
        .issue(&book.id, &bob.id)
        .await
        .expect("issue to bob should succeed after return");

    let book = app.book(&book.id).await;
    assert_eq!(book.available_copies, 0);
    assert_eq!(book.borrow_count, 2);
}

#[tokio::test]
async fn issue_return_cycles_restore_availability() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Sapiens", 2).await;

    for _ in 0..3 {
        app.services
            .loans
            .issue(&book.id, &student.id)
            .await
            .expect("issue failed");
        app.services
            .loans
            .return_book(&book.id, &student.id)
            .await
            .expect("return failed");
    }

    let book = app.book(&book.id).await;
    assert_eq!(book.available_copies, book.total_copies);
    assert_eq!(book.borrow_count, 3);
}

#[tokio::test]
async fn on_time_return_records_history_without_fine() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 1).await;

    app.services
        .loans
        .issue(&book.id, &student.id)
        .await
        .expect("issue failed");
    app.clock.advance_days(5);

    let receipt = app
        .services
        .loans
        .return_book(&book.id, &student.id)
        .await
        .expect("return failed");

    assert_eq!(receipt.days_late, 0);
    assert_eq!(receipt.fine, 0.0);
    assert!(receipt.message.contains("returned on time"));

    let history = app
        .services
        .history
        .history_for_user(&student.id)
        .await
        .expect("history failed");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].days_kept, 5);
    assert_eq!(history[0].rating, 0);

    let (fines, total) = app
        .services
        .fines
        .fines_for_user(&student.id)
        .await
        .expect("fines failed");
    assert!(fines.is_empty());
    assert_eq!(total, 0.0);
}

#[tokio::test]
async fn late_return_creates_fine_per_day() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "1984", 1).await;

    app.services
        .loans
        .issue(&book.id, &student.id)
        .await
        .expect("issue failed");

    // Due in 7 days; return on day 10 is 3 days late.
    app.clock.advance_days(10);

    let receipt = app
        .services
        .loans
        .return_book(&book.id, &student.id)
        .await
        .expect("return failed");

    assert_eq!(receipt.days_late, 3);
    assert_eq!(receipt.fine, 15.0);
    assert!(receipt.message.contains("3 day(s) late"));

    let (fines, total) = app
        .services
        .fines
        .fines_for_user(&student.id)
        .await
        .expect("fines failed");
    assert_eq!(fines.len(), 1);
    assert_eq!(fines[0].days_late, 3);
    assert_eq!(fines[0].amount, 15.0);
    assert!(!fines[0].paid);
    assert_eq!(fines[0].title.as_deref(), Some("1984"));
    assert_eq!(total, 15.0);

    let history = app
        .services
        .history
        .history_for_user(&student.id)
        .await
        .expect("history failed");
    assert_eq!(history[0].days_kept, 10);
}

#[tokio::test]
async fn same_day_return_keeps_at_least_one_day() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 1).await;

    app.services
        .loans
        .issue(&book.id, &student.id)
        .await
        .expect("issue failed");

    let receipt = app
        .services
        .loans
        .return_book(&book.id, &student.id)
        .await
        .expect("return failed");
    assert_eq!(receipt.days_late, 0);

    let history = app
        .services
        .history
        .history_for_user(&student.id)
        .await
        .expect("history failed");
    assert_eq!(history[0].days_kept, 1);
}

#[tokio::test]
async fn return_without_loan_is_not_found() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 1).await;

    let err = app
        .services
        .loans
        .return_book(&book.id, &student.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(err.to_string().contains("No active loan"));
}

#[tokio::test]
async fn loan_view_derives_lateness_and_projected_fine() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 1).await;

    app.services
        .loans
        .issue(&book.id, &student.id)
        .await
        .expect("issue failed");

    let views = app
        .services
        .loans
        .loans_for_user(&student.id)
        .await
        .expect("loans failed");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].days_left, 7);
    assert!(!views[0].is_overdue);
    assert_eq!(views[0].projected_fine, 0.0);
    assert_eq!(views[0].loan.title, "Dune");

    app.clock.advance_days(9);

    let views = app
        .services
        .loans
        .loans_for_user(&student.id)
        .await
        .expect("loans failed");
    assert_eq!(views[0].days_left, -2);
    assert!(views[0].is_overdue);
    assert_eq!(views[0].projected_fine, 10.0);
}

#[tokio::test]
async fn admin_overview_lists_borrower_details() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let alice = app.register_student("Alice", "alice@lib.com").await;
    let bob = app.register_student("Bob", "bob@lib.com").await;
    let book = app.add_book(&admin, "Sapiens", 2).await;

    app.services
        .loans
        .issue(&book.id, &alice.id)
        .await
        .expect("issue failed");
    app.services
        .loans
        .issue(&book.id, &bob.id)
        .await
        .expect("issue failed");

    let all = app.services.loans.list_all().await.expect("list failed");
    assert_eq!(all.len(), 2);
    let names: Vec<&str> = all.iter().map(|l| l.borrower_name.as_str()).collect();
    assert!(names.contains(&"Alice"));
    assert!(names.contains(&"Bob"));
    assert!(all.iter().all(|l| l.title == "Sapiens"));
}

#[tokio::test]
async fn mark_paid_settles_a_fine() {
    let app = common::setup().await;
    let admin = app.register_admin("Admin", "admin@lib.com").await;
    let student = app.register_student("Alice", "alice@lib.com").await;
    let book = app.add_book(&admin, "Dune", 1).await;

    app.services
        .loans
        .issue(&book.id, &student.id)
        .await
        .expect("issue failed");
    app.clock.advance_days(9);
    app.services
        .loans
        .return_book(&book.id, &student.id)
        .await
        .expect("return failed");

    let (fines, total) = app
        .services
        .fines
        .fines_for_user(&student.id)
        .await
        .expect("fines failed");
    assert_eq!(total, 10.0);

    app.services
        .fines
        .mark_paid(&fines[0].id)
        .await
        .expect("mark_paid failed");

    let (fines, total) = app
        .services
        .fines
        .fines_for_user(&student.id)
        .await
        .expect("fines failed");
    assert!(fines[0].paid);
    assert_eq!(total, 0.0);

    let err = app.services.fines.mark_paid("FIN-MISSING").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
