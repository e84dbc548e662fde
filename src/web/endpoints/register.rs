//! Registration endpoints.
//!
//! Two endpoints:
//! - `GET /patients/:user_id/register`: form seeded from the user's account
//! - `POST /patients/:user_id/register`: validate, create the patient, continue

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

use crate::pages::{self, RegisterView};
use crate::records::{PatientRegistration, RecordStore};
use crate::validation::{validate_user_form, UserForm};
use crate::web::error::PageError;
use crate::web::types::PortalContext;

/// `GET /patients/:user_id/register`: render the registration form.
///
/// An unknown user gets an empty form rather than an error.
pub async fn show<S: RecordStore>(
    State(ctx): State<PortalContext<S>>,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<Html<String>, PageError> {
    let Path(user_id) = user_id?;
    let user = ctx.store.get_user(&user_id).await?;
    if user.is_none() {
        tracing::info!(%user_id, "No account for registration page, rendering empty form");
    }

    let view = RegisterView::for_user(&user_id, user.as_ref());
    Ok(Html(pages::render_register_page(&view)))
}

/// `POST /patients/:user_id/register`: submit the registration form.
pub async fn submit<S: RecordStore>(
    State(ctx): State<PortalContext<S>>,
    user_id: Result<Path<String>, PathRejection>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Result<Response, PageError> {
    let Path(user_id) = user_id?;
    let Form(form) = form?;

    if let Err(errors) = validate_user_form(&form) {
        tracing::info!(%user_id, failed = errors.errors.len(), "Registration form rejected");
        let html = pages::render_register_page(&RegisterView::rejected(&user_id, form, &errors));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    // Must not fail once the patient is stored.
    let location = HeaderValue::try_from(pages::new_appointment_path(&user_id))
        .map_err(|e| PageError::BadRequest(e.to_string()))?;

    ctx.store
        .register_patient(PatientRegistration {
            user_id: user_id.clone(),
            name: form.name,
            email: form.email,
            phone: form.phone,
        })
        .await?;

    // 303 so the browser follows with a GET.
    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}
