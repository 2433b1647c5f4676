use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use resultdesk_common::flash::{self, Flash};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{student, subject};
use crate::error::AppError;
use crate::extractors::admin::AdminSession;
use crate::models::student::{StudentForm, parse_or_zero_f64, parse_or_zero_i32, parse_subject_rows};
use crate::state::AppState;

/// Admin dashboard: every student, newest first, no paging.
#[instrument(skip_all)]
pub async fn list(
    _session: AdminSession,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let students = student::Entity::find()
        .order_by_desc(student::Column::Id)
        .all(&state.db)
        .await?;

    let (jar, flash) = flash::take(jar);
    let page = state
        .templates
        .render("admin.html", context! { students, flash })?;
    Ok((jar, Html(page)).into_response())
}

/// Blank add form.
#[instrument(skip_all)]
pub async fn add_page(
    _session: AdminSession,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = flash::take(jar);
    let page = state.templates.render(
        "admin_edit.html",
        context! { student => None::<student::Model>, subjects => Vec::<subject::Model>::new(), flash },
    )?;
    Ok((jar, Html(page)).into_response())
}

/// Create a student and all of its subject rows as one unit.
#[instrument(skip_all, fields(roll_no = %form.roll_no))]
pub async fn add(
    _session: AdminSession,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<StudentForm>,
) -> Result<Response, AppError> {
    let rows = parse_subject_rows(&form)?;

    let txn = state.db.begin().await?;

    let new_student = student::ActiveModel {
        name: Set(form.name.trim().to_string()),
        father_name: Set(form.father_name.trim().to_string()),
        mother_name: Set(form.mother_name.trim().to_string()),
        faculty: Set(form.faculty.trim().to_string()),
        roll_no: Set(form.roll_no.trim().to_string()),
        enrollment_no: Set(form.enrollment_no.trim().to_string()),
        course_year: Set(form.course_year.trim().to_string()),
        total_credits_registered: Set(parse_or_zero_i32(&form.total_credits_registered)?),
        total_credits_earned: Set(parse_or_zero_i32(&form.total_credits_earned)?),
        sgpa: Set(parse_or_zero_f64(&form.sgpa)?),
        cgpa: Set(parse_or_zero_f64(&form.cgpa)?),
        result_overall: Set(form.result_overall.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let inserted = new_student.insert(&txn).await?;
    for row in rows {
        row.into_active_model(inserted.id).insert(&txn).await?;
    }

    txn.commit().await?;

    let jar = flash::push(jar, &Flash::success("Student and subjects added successfully."));
    Ok((jar, Redirect::to("/admin")).into_response())
}

/// Edit form pre-filled with the current record.
#[instrument(skip(state, jar, _session), fields(id))]
pub async fn edit_page(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let found = find_student(&state.db, id).await?;
    let subjects = subject::Entity::find()
        .filter(subject::Column::StudentId.eq(found.id))
        .order_by_asc(subject::Column::Id)
        .all(&state.db)
        .await?;

    let (jar, flash) = flash::take(jar);
    let page = state.templates.render(
        "admin_edit.html",
        context! { student => found, subjects, flash },
    )?;
    Ok((jar, Html(page)).into_response())
}

/// Overwrite every scalar field and replace the whole subject set.
///
/// The caller must resend the complete set of subject rows; the existing
/// rows are deleted and the submitted ones inserted in the same
/// transaction.
#[instrument(skip(state, jar, form, _session), fields(id))]
pub async fn edit(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<StudentForm>,
) -> Result<Response, AppError> {
    let rows = parse_subject_rows(&form)?;

    let txn = state.db.begin().await?;

    let existing = find_student(&txn, id).await?;
    let student_id = existing.id;

    let mut active: student::ActiveModel = existing.into();
    active.name = Set(form.name.trim().to_string());
    active.father_name = Set(form.father_name.trim().to_string());
    active.mother_name = Set(form.mother_name.trim().to_string());
    active.faculty = Set(form.faculty.trim().to_string());
    active.roll_no = Set(form.roll_no.trim().to_string());
    active.enrollment_no = Set(form.enrollment_no.trim().to_string());
    active.course_year = Set(form.course_year.trim().to_string());
    active.total_credits_registered = Set(parse_or_zero_i32(&form.total_credits_registered)?);
    active.total_credits_earned = Set(parse_or_zero_i32(&form.total_credits_earned)?);
    active.sgpa = Set(parse_or_zero_f64(&form.sgpa)?);
    active.cgpa = Set(parse_or_zero_f64(&form.cgpa)?);
    active.result_overall = Set(form.result_overall.trim().to_string());
    active.update(&txn).await?;

    subject::Entity::delete_many()
        .filter(subject::Column::StudentId.eq(student_id))
        .exec(&txn)
        .await?;
    for row in rows {
        row.into_active_model(student_id).insert(&txn).await?;
    }

    txn.commit().await?;

    let jar = flash::push(jar, &Flash::success("Student record updated successfully."));
    Ok((jar, Redirect::to("/admin")).into_response())
}

/// Delete a student and all of its subject rows.
#[instrument(skip(state, jar, _session), fields(id))]
pub async fn delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_student(&txn, id).await?;
    subject::Entity::delete_many()
        .filter(subject::Column::StudentId.eq(existing.id))
        .exec(&txn)
        .await?;
    student::Entity::delete_by_id(existing.id).exec(&txn).await?;

    txn.commit().await?;

    let jar = flash::push(jar, &Flash::success("Student deleted."));
    Ok((jar, Redirect::to("/admin")).into_response())
}

async fn find_student<C: ConnectionTrait>(conn: &C, id: i32) -> Result<student::Model, AppError> {
    student::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {id} not found")))
}
