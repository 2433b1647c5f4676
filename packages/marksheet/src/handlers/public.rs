use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use resultdesk_common::flash::{self, Flash};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{student, subject};
use crate::error::AppError;
use crate::models::student::LookupForm;
use crate::state::AppState;

/// Public result-verification entry page.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let (jar, flash) = flash::take(jar);
    let page = state.templates.render("home.html", context! { flash })?;
    Ok((jar, Html(page)).into_response())
}

/// Look up a student by roll number and render the marks breakdown.
#[instrument(skip(state, jar, form), fields(roll_no = %form.roll_no))]
pub async fn result(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LookupForm>,
) -> Result<Response, AppError> {
    let roll_no = form.roll_no.trim();
    if roll_no.is_empty() {
        let jar = flash::push(jar, &Flash::error("Please enter a valid Roll Number."));
        return Ok((jar, Redirect::to("/")).into_response());
    }

    let Some(found) = student::Entity::find()
        .filter(student::Column::RollNo.eq(roll_no))
        .one(&state.db)
        .await?
    else {
        let jar = flash::push(jar, &Flash::error("No record found for that Roll Number."));
        return Ok((jar, Redirect::to("/")).into_response());
    };

    let subjects = subject::Entity::find()
        .filter(subject::Column::StudentId.eq(found.id))
        .order_by_asc(subject::Column::Id)
        .all(&state.db)
        .await?;

    // Presentational totals, recomputed on every lookup, never persisted.
    let total_max: i64 = subjects.iter().map(|s| i64::from(s.max_total)).sum();
    let total_obt: i64 = subjects.iter().map(|s| i64::from(s.marks_total)).sum();

    let page = state.templates.render(
        "result.html",
        context! { student => found, subjects, total_max, total_obt },
    )?;
    Ok(Html(page).into_response())
}
