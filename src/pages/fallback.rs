//! Fallback pages: missing records, unknown routes, failed renders.

use super::{brand_row, escape_html, new_appointment_href, page_shell, COPYRIGHT};

fn message_page(title: &str, heading: &str, detail: &str, link: Option<(&str, &str)>) -> String {
    let action = link
        .map(|(href, label)| format!(r#"<a class="btn" href="{href}">{label}</a>"#))
        .unwrap_or_default();

    let body = format!(
        r##"<div class="center">
  <div class="card">
    {brand}
    <h1>{heading}</h1>
    <p class="muted">{detail}</p>
    {action}
    <p class="footer">{copyright}</p>
  </div>
</div>"##,
        brand = brand_row(),
        heading = escape_html(heading),
        detail = escape_html(detail),
        action = action,
        copyright = COPYRIGHT,
    );
    page_shell(title, &body)
}

/// Shown when the requested appointment id is empty or unknown.
pub fn render_appointment_not_found(user_id: &str) -> String {
    let href = new_appointment_href(user_id);
    message_page(
        "Appointment not found",
        "We couldn't find that appointment",
        "The confirmation link may be incomplete or the request may have been withdrawn.",
        Some((&href, "New Appointment")),
    )
}

pub fn render_page_not_found() -> String {
    message_page(
        "Page not found",
        "Page not found",
        "The page you are looking for does not exist.",
        None,
    )
}

/// Shown when the request itself could not be read.
pub fn render_bad_request_page() -> String {
    message_page(
        "Bad request",
        "Bad request",
        "The link you followed is malformed. Please check it and try again.",
        None,
    )
}

/// Generic failure page. Never includes error details.
pub fn render_error_page() -> String {
    message_page(
        "Something went wrong",
        "Something went wrong",
        "We couldn't load this page right now. Please try again in a moment.",
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_not_found_links_back() {
        let html = render_appointment_not_found("u1");
        assert!(html.contains("couldn&#x27;t find that appointment"));
        assert!(html.contains(r#"href="/patients/u1/new-appointment""#));
    }

    #[test]
    fn appointment_not_found_link_stays_with_user() {
        let html = render_appointment_not_found("../../evil");
        assert!(html.contains(r#"href="/patients/..%2F..%2Fevil/new-appointment""#));
        assert!(!html.contains("/patients/../"));
    }

    #[test]
    fn bad_request_page_has_title() {
        assert!(render_bad_request_page().contains("<title>Bad request | CarePulse</title>"));
    }

    #[test]
    fn error_page_is_generic() {
        let html = render_error_page();
        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("btn\" href"));
    }

    #[test]
    fn page_not_found_has_title() {
        assert!(render_page_not_found().contains("<title>Page not found | CarePulse</title>"));
    }
}
