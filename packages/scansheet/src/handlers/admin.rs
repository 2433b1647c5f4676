use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use resultdesk_common::flash::{self, Flash};
use resultdesk_common::upload;
use sea_orm::*;
use tracing::instrument;

use crate::entity::student;
use crate::error::AppError;
use crate::extractors::admin::AdminSession;
use crate::models::student::ScanForm;
use crate::state::AppState;

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(16 * 1024 * 1024) // 16 MB
}

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
        context! { student => None::<student::Model>, flash },
    )?;
    Ok((jar, Html(page)).into_response())
}

/// Create a student with their scanned result image.
///
/// A missing or empty upload rejects the whole request; no record is
/// created without its image.
#[instrument(skip_all)]
pub async fn add(
    _session: AdminSession,
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let form = ScanForm::from_multipart(&mut multipart).await?;

    let Some((original_name, data)) = form.file else {
        let jar = flash::push(jar, &Flash::error("Please choose a result image to upload."));
        return Ok((jar, Redirect::to("/admin/add")).into_response());
    };

    let stored = match upload::stored_filename(&original_name) {
        Ok(stored) => stored,
        Err(e) => {
            let jar = flash::push(jar, &Flash::error(e.message()));
            return Ok((jar, Redirect::to("/admin/add")).into_response());
        }
    };
    state.uploads.save(&stored, &data).await?;

    let new_student = student::ActiveModel {
        name: Set(form.name.trim().to_string()),
        roll_no: Set(form.roll_no.trim().to_string()),
        email: Set(form.email.trim().to_string()),
        image_file: Set(stored),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    new_student.insert(&state.db).await?;

    let jar = flash::push(jar, &Flash::success("Student added successfully."));
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

    let (jar, flash) = flash::take(jar);
    let page = state
        .templates
        .render("admin_edit.html", context! { student => found, flash })?;
    Ok((jar, Html(page)).into_response())
}

/// Overwrite the scalar fields; swap the image only when a new file came in.
#[instrument(skip(state, jar, multipart, _session), fields(id))]
pub async fn edit(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let form = ScanForm::from_multipart(&mut multipart).await?;

    let existing = find_student(&state.db, id).await?;
    let previous_image = existing.image_file.clone();

    let mut active: student::ActiveModel = existing.into();
    active.name = Set(form.name.trim().to_string());
    active.roll_no = Set(form.roll_no.trim().to_string());
    active.email = Set(form.email.trim().to_string());

    let mut replaced = false;
    if let Some((original_name, data)) = form.file {
        let stored = match upload::stored_filename(&original_name) {
            Ok(stored) => stored,
            Err(e) => {
                let jar = flash::push(jar, &Flash::error(e.message()));
                return Ok((jar, Redirect::to(&format!("/admin/edit/{id}"))).into_response());
            }
        };
        state.uploads.save(&stored, &data).await?;
        active.image_file = Set(stored);
        replaced = true;
    }

    active.update(&state.db).await?;

    if replaced {
        remove_stored_file(&state, &previous_image).await;
    }

    let jar = flash::push(jar, &Flash::success("Student record updated successfully."));
    Ok((jar, Redirect::to("/admin")).into_response())
}

/// Delete a student and their stored image.
#[instrument(skip(state, jar, _session), fields(id))]
pub async fn delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let existing = find_student(&state.db, id).await?;

    student::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;
    remove_stored_file(&state, &existing.image_file).await;

    let jar = flash::push(jar, &Flash::success("Student deleted."));
    Ok((jar, Redirect::to("/admin")).into_response())
}

/// Best-effort removal of a stored image; a leftover file is only worth a log line.
async fn remove_stored_file(state: &AppState, stored: &str) {
    if let Err(e) = state.uploads.remove(stored).await {
        tracing::warn!("failed to remove stored image {stored}: {e}");
    }
}

async fn find_student<C: ConnectionTrait>(conn: &C, id: i32) -> Result<student::Model, AppError> {
    student::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {id} not found")))
}
