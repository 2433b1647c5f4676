use sea_orm::{EntityTrait, PaginatorTrait};

use scansheet::entity::student;

use crate::common::TestApp;

const SCAN_A: &[u8] = b"first fake scan";
const SCAN_B: &[u8] = b"second fake scan";

#[tokio::test]
async fn add_stores_the_scan_and_the_record() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = app
        .post_student("/admin/add", "Ravi", "S100", "ravi@example.com", Some(("scan.png", SCAN_A)))
        .await;
    assert_eq!(res.url().path(), "/admin");
    let body = res.text().await.unwrap();
    assert!(body.contains("Student added successfully."));

    let saved = app.student_by_roll("S100").await;
    assert!(saved.image_file.ends_with("_scan.png"));
    let on_disk = std::fs::read(app.uploads_dir().join(&saved.image_file)).unwrap();
    assert_eq!(on_disk, SCAN_A);
}

#[tokio::test]
async fn missing_upload_rejects_the_add_without_a_record() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = app
        .post_student("/admin/add", "Ravi", "S101", "ravi@example.com", None)
        .await;
    assert_eq!(res.url().path(), "/admin/add");
    let body = res.text().await.unwrap();
    assert!(body.contains("Please choose a result image to upload."));

    let count = student::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn identical_original_filenames_store_distinct_files() {
    let app = TestApp::spawn().await;
    app.login().await;

    app.post_student("/admin/add", "Ravi", "S102", "ravi@example.com", Some(("scan.png", SCAN_A)))
        .await;
    app.post_student("/admin/add", "Mina", "S103", "mina@example.com", Some(("scan.png", SCAN_B)))
        .await;

    let first = app.student_by_roll("S102").await.image_file;
    let second = app.student_by_roll("S103").await.image_file;
    assert_ne!(first, second);

    assert_eq!(std::fs::read(app.uploads_dir().join(&first)).unwrap(), SCAN_A);
    assert_eq!(std::fs::read(app.uploads_dir().join(&second)).unwrap(), SCAN_B);
}

#[tokio::test]
async fn edit_without_a_new_file_keeps_the_previous_scan() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.post_student("/admin/add", "Ravi", "S104", "ravi@example.com", Some(("scan.png", SCAN_A)))
        .await;
    let before = app.student_by_roll("S104").await;

    let res = app
        .post_student(
            &format!("/admin/edit/{}", before.id),
            "Ravi Kumar",
            "S104",
            "ravi@example.com",
            None,
        )
        .await;
    assert_eq!(res.url().path(), "/admin");

    let after = app.student_by_roll("S104").await;
    assert_eq!(after.name, "Ravi Kumar");
    assert_eq!(after.image_file, before.image_file);
    assert!(app.uploads_dir().join(&after.image_file).exists());
}

#[tokio::test]
async fn edit_with_a_new_file_replaces_the_stored_scan() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.post_student("/admin/add", "Ravi", "S105", "ravi@example.com", Some(("scan.png", SCAN_A)))
        .await;
    let before = app.student_by_roll("S105").await;

    app.post_student(
        &format!("/admin/edit/{}", before.id),
        "Ravi",
        "S105",
        "ravi@example.com",
        Some(("scan.png", SCAN_B)),
    )
    .await;

    let after = app.student_by_roll("S105").await;
    assert_ne!(after.image_file, before.image_file);
    assert_eq!(
        std::fs::read(app.uploads_dir().join(&after.image_file)).unwrap(),
        SCAN_B
    );
    assert!(
        !app.uploads_dir().join(&before.image_file).exists(),
        "the replaced scan should be removed"
    );
}

#[tokio::test]
async fn delete_removes_the_record_and_the_stored_scan() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.post_student("/admin/add", "Ravi", "S106", "ravi@example.com", Some(("scan.png", SCAN_A)))
        .await;
    let saved = app.student_by_roll("S106").await;

    let res = app.post_form(&format!("/admin/delete/{}", saved.id), &[]).await;
    assert_eq!(res.url().path(), "/admin");

    let count = student::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(count, 0);
    assert!(!app.uploads_dir().join(&saved.image_file).exists());
}

#[tokio::test]
async fn deleting_a_nonexistent_student_is_not_found() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = app.post_form("/admin/delete/9999", &[]).await;
    assert_eq!(res.status(), 404);
}
