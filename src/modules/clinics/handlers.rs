use askama::Template;
use axum::{extract::State, http::StatusCode, response::Json, Form};
use serde::Serialize;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{Clinic, ClinicRepository, NewClinic};
use crate::error::AppResult;
use crate::i18n::I18n;
use crate::modules::html::HtmlTemplate;
use crate::session::{RedirectTarget, SessionAccess};

#[derive(Template)]
#[template(path = "clinic_form.html")]
pub struct ClinicFormTemplate {
    pub language: String,
    pub app_name: String,
    pub title: String,
    pub description: String,
    pub user_name: String,
    pub name_label: String,
    pub submit_label: String,
}

/// Shown to logged-in users who have no clinic yet
pub async fn clinic_form(SessionAccess(session): SessionAccess, i18n: I18n) -> HtmlTemplate<ClinicFormTemplate> {
    HtmlTemplate(ClinicFormTemplate {
        language: i18n.language().code().to_string(),
        app_name: i18n.get("app-name"),
        title: i18n.get("clinic-form-title"),
        description: i18n.get("clinic-form-description"),
        user_name: session.user.name,
        name_label: i18n.get("clinic-name"),
        submit_label: i18n.get("clinic-create"),
    })
}

#[derive(Debug, Serialize)]
pub struct ClinicCreated {
    pub message: String,
    pub clinic: Clinic,
    /// Where the client continues once the session is refreshed
    pub redirect_to: &'static str,
}

/// Takes the clinic form as posted by the page, url-encoded
pub async fn create_clinic(
    SessionAccess(session): SessionAccess,
    State(state): State<AppState>,
    i18n: I18n,
    Form(payload): Form<NewClinic>,
) -> AppResult<(StatusCode, Json<ClinicCreated>)> {
    let payload = payload.trimmed();
    payload.validate()?;

    let clinic = ClinicRepository::create_for_user(&state.db, session.user.id, &payload).await?;

    // A user without a plan lands on the subscription page next
    let redirect_to = match session.user.plan {
        Some(_) => "/dashboard",
        None => RedirectTarget::Subscription.path(),
    };

    Ok((
        StatusCode::CREATED,
        Json(ClinicCreated {
            message: i18n.get("clinic-created"),
            clinic,
            redirect_to,
        }),
    ))
}
