//! Appointment confirmation endpoint.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::datetime::format_date_time;
use crate::pages::{self, SuccessView};
use crate::records::RecordStore;
use crate::web::error::PageError;
use crate::web::types::PortalContext;

#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    #[serde(rename = "appointmentId", default)]
    pub appointment_id: Option<String>,
}

/// `GET /patients/:user_id/new-appointment/success?appointmentId=...`
///
/// Missing or unknown ids render the not-found page with a 404. A
/// physician missing from the roster renders without a portrait. An
/// unreadable query (e.g. a repeated `appointmentId`) gets the 400 page.
pub async fn success<S: RecordStore>(
    State(ctx): State<PortalContext<S>>,
    user_id: Result<Path<String>, PathRejection>,
    query: Result<Query<SuccessQuery>, QueryRejection>,
) -> Result<Response, PageError> {
    let Path(user_id) = user_id?;
    let Query(query) = query?;
    let appointment_id = query.appointment_id.unwrap_or_default();

    let Some(appointment) = ctx.store.get_appointment(&appointment_id).await? else {
        tracing::info!(%user_id, %appointment_id, "Appointment not found");
        let html = pages::render_appointment_not_found(&user_id);
        return Ok((StatusCode::NOT_FOUND, Html(html)).into_response());
    };

    let physician = ctx.roster.find(&appointment.primary_physician);
    if physician.is_none() {
        tracing::warn!(
            appointment_id = %appointment.id,
            physician = %appointment.primary_physician,
            "Physician not on roster"
        );
    }

    let when = format_date_time(appointment.schedule, ctx.display_offset);
    let html = pages::render_success_page(&SuccessView {
        user_id: &user_id,
        appointment: &appointment,
        physician,
        when: &when,
    });

    Ok(Html(html).into_response())
}
