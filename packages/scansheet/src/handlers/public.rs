use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use resultdesk_common::flash::{self, Flash};
use sea_orm::*;
use tracing::instrument;

use crate::entity::student;
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

/// Look up a student by roll number and email and render the scanned result.
///
/// Both values must match the same record; the roll number alone is not
/// enough to view a result.
#[instrument(skip(state, jar, form), fields(roll_no = %form.roll_no))]
pub async fn result(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LookupForm>,
) -> Result<Response, AppError> {
    let roll_no = form.roll_no.trim();
    let email = form.email.trim();
    if roll_no.is_empty() || email.is_empty() {
        let jar = flash::push(jar, &Flash::error("Please enter both Roll Number and Email."));
        return Ok((jar, Redirect::to("/")).into_response());
    }

    let Some(found) = student::Entity::find()
        .filter(student::Column::RollNo.eq(roll_no))
        .filter(student::Column::Email.eq(email))
        .one(&state.db)
        .await?
    else {
        let jar = flash::push(
            jar,
            &Flash::error("No record found for that Roll Number and Email."),
        );
        return Ok((jar, Redirect::to("/")).into_response());
    };

    let page = state
        .templates
        .render("result.html", context! { student => found })?;
    Ok(Html(page).into_response())
}
