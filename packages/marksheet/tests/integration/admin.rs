use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use marksheet::entity::{student, subject};

use crate::common::{TestApp, student_form};

#[tokio::test]
async fn add_inserts_the_student_and_every_subject_row() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = app.add_student("B100", &[(100, 72), (100, 65)]).await;
    assert_eq!(res.url().path(), "/admin");
    let body = res.text().await.unwrap();
    assert!(body.contains("Student and subjects added successfully."));

    let id = app.student_id_by_roll("B100").await;
    let subject_count = subject::Entity::find()
        .filter(subject::Column::StudentId.eq(id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(subject_count, 2);
}

#[tokio::test]
async fn duplicate_roll_number_fails_at_the_store_layer() {
    let app = TestApp::spawn().await;
    app.login().await;

    let first = app.add_student("B101", &[]).await;
    assert_eq!(first.url().path(), "/admin");

    let mut form = student_form("B101", &[]);
    // Keep the enrollment number unique so only the roll number collides.
    for (key, value) in form.iter_mut() {
        if key == "enrollment_no" {
            *value = "EN-other".to_string();
        }
    }
    let second = app.post_form("/admin/add", &form).await;
    assert_eq!(second.status(), 500);

    let count = student::Entity::find()
        .filter(student::Column::RollNo.eq("B101"))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn malformed_numeric_subject_input_is_a_server_error() {
    let app = TestApp::spawn().await;
    app.login().await;

    let mut form = student_form("B102", &[(100, 72)]);
    for (key, value) in form.iter_mut() {
        if key == "subj_max_exam" {
            *value = "eighty".to_string();
        }
    }
    let res = app.post_form("/admin/add", &form).await;
    assert_eq!(res.status(), 500);

    let count = student::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(count, 0, "no partial record may be left behind");
}

#[tokio::test]
async fn edit_fully_replaces_the_subject_set() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.add_student("B103", &[(100, 70), (100, 60), (100, 50)]).await;
    let id = app.student_id_by_roll("B103").await;

    // Resend only one row; the other two must be gone afterwards.
    let res = app
        .post_form(&format!("/admin/edit/{id}"), &student_form("B103", &[(50, 44)]))
        .await;
    assert_eq!(res.url().path(), "/admin");

    let subjects = subject::Entity::find()
        .filter(subject::Column::StudentId.eq(id))
        .all(&app.db)
        .await
        .unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].max_total, 50);
    assert_eq!(subjects[0].marks_total, 44);
}

#[tokio::test]
async fn edit_overwrites_scalar_fields() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.add_student("B104", &[]).await;
    let id = app.student_id_by_roll("B104").await;

    let mut form = student_form("B104", &[]);
    for (key, value) in form.iter_mut() {
        if key == "result_overall" {
            *value = "Fail".to_string();
        }
    }
    app.post_form(&format!("/admin/edit/{id}"), &form).await;

    let updated = student::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.result_overall, "Fail");
}

#[tokio::test]
async fn edit_page_is_prefilled_with_the_current_record() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.add_student("B109", &[(100, 72)]).await;
    let id = app.student_id_by_roll("B109").await;

    let res = app.get(&format!("/admin/edit/{id}")).await;
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("B109"));
    assert!(body.contains("C0"), "existing subject rows are shown");
}

#[tokio::test]
async fn editing_a_nonexistent_student_is_not_found() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = app
        .post_form("/admin/edit/9999", &student_form("B105", &[]))
        .await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn delete_cascades_to_subject_rows() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.add_student("B106", &[(100, 70), (100, 60), (100, 50)]).await;
    let id = app.student_id_by_roll("B106").await;

    let res = app.post_form(&format!("/admin/delete/{id}"), &[]).await;
    assert_eq!(res.url().path(), "/admin");
    let body = res.text().await.unwrap();
    assert!(body.contains("Student deleted."));
    assert!(!body.contains("B106"), "listing must exclude the deleted student");

    let orphans = subject::Entity::find()
        .filter(subject::Column::StudentId.eq(id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(orphans, 0, "no orphaned subject rows may remain");
}

#[tokio::test]
async fn deleting_a_nonexistent_student_is_not_found() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = app.post_form("/admin/delete/9999", &[]).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn listing_orders_students_newest_first() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.add_student("B107", &[]).await;
    app.add_student("B108", &[]).await;

    let res = app.get("/admin").await;
    let body = res.text().await.unwrap();

    let older = body.find("B107").expect("older student listed");
    let newer = body.find("B108").expect("newer student listed");
    assert!(newer < older, "newest student must come first");
}
