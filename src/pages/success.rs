//! Appointment request confirmation page.

use super::{brand_row, escape_html, new_appointment_href, page_shell, COPYRIGHT};
use crate::datetime::FormattedDateTime;
use crate::records::AppointmentRecord;
use crate::roster::Physician;

const SUCCESS_GIF: &str = "/assets/gifs/success.gif";
const CALENDAR_ICON: &str = "/assets/icons/calendar.svg";

pub struct SuccessView<'a> {
    pub user_id: &'a str,
    pub appointment: &'a AppointmentRecord,
    /// Roster entry for the appointment's physician, when there is one.
    pub physician: Option<&'a Physician>,
    pub when: &'a FormattedDateTime,
}

pub fn render_success_page(view: &SuccessView<'_>) -> String {
    // No roster match: show the name from the record, without a portrait.
    let physician_block = match view.physician {
        Some(physician) => format!(
            r#"<div class="chip"><img class="avatar" src="{image}" alt="Doctor" width="18" height="18"><span>Dr. {name}</span></div>"#,
            image = escape_html(&physician.image),
            name = escape_html(&physician.name),
        ),
        None => format!(
            r#"<div class="chip"><span>Dr. {name}</span></div>"#,
            name = escape_html(&view.appointment.primary_physician),
        ),
    };

    let body = format!(
        r##"<div class="center">
  <div class="card">
    {brand}
    <div class="success-icon"><img src="{gif}" alt="Success" width="72" height="72"></div>
    <h1>Your <span class="accent">appointment request</span> has been successfully submitted!</h1>
    <p class="muted">We will be in touch shortly to confirm.</p>
    <div class="divider"></div>
    <div class="details">
      <span class="label">Requested appointment details:</span>
      {physician}
      <div class="chip"><img src="{calendar}" alt="Calendar" width="16" height="16"><span>{date_time}</span></div>
    </div>
    <a class="btn" href="{href}">New Appointment</a>
    <p class="footer">{copyright}</p>
  </div>
</div>"##,
        brand = brand_row(),
        gif = SUCCESS_GIF,
        physician = physician_block,
        calendar = CALENDAR_ICON,
        date_time = escape_html(&view.when.date_time),
        href = new_appointment_href(view.user_id),
        copyright = COPYRIGHT,
    );

    page_shell("Appointment requested", &body)
}
