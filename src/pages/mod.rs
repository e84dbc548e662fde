//! Server-rendered HTML pages.
//!
//! Pages are self-contained strings: one shared stylesheet, no scripts,
//! assets referenced under `/assets/`. Every value that originates from a
//! record or a form is passed through `escape_html`.

pub mod fallback;
pub mod register;
pub mod success;

pub use fallback::{
    render_appointment_not_found, render_bad_request_page, render_error_page, render_page_not_found,
};
pub use register::{render_register_page, RegisterView};
pub use success::{render_success_page, SuccessView};

use std::sync::LazyLock;

use reqwest::Url;

use crate::config::APP_NAME;

pub const LOGO_FULL: &str = "/assets/icons/logo-full.svg";
pub const LOGO_ICON: &str = "/assets/icons/logo-icon.svg";
pub const COPYRIGHT: &str = "© 2024 CarePulse";

// Only the path of this URL is ever used.
static PORTAL_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://portal.invalid/").expect("valid base url"));

/// `/patients/{user_id}/{rest..}` with every segment percent-encoded.
///
/// The user id stays one path segment whatever it contains, so a link
/// built from it cannot point at another patient's pages. The result is
/// plain ASCII and safe for a `Location` header.
pub fn patient_path(user_id: &str, rest: &[&str]) -> String {
    let mut url = PORTAL_BASE.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .clear()
            .push("patients")
            .push(user_id)
            .extend(rest);
    }
    url.path().to_string()
}

/// Redirect target for starting a new appointment request.
pub fn new_appointment_path(user_id: &str) -> String {
    patient_path(user_id, &["new-appointment"])
}

/// `new_appointment_path`, escaped for an `href` attribute.
pub fn new_appointment_href(user_id: &str) -> String {
    escape_html(&new_appointment_path(user_id))
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
*,*::before,*::after{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#0b0f14;color:#e5e7eb;min-height:100vh}
a{color:inherit}
.center{display:flex;min-height:100vh;align-items:center;justify-content:center;padding:16px}
.card{width:100%;max-width:36rem;text-align:center}
.brand{display:flex;align-items:center;justify-content:center;gap:8px;margin-bottom:40px;font-weight:600;font-size:1.125rem;color:#fff}
.success-icon{margin:0 auto 32px;display:flex;align-items:center;justify-content:center;width:80px;height:80px;border-radius:9999px;background:rgba(16,185,129,.2)}
h1{font-size:1.5rem;font-weight:600;color:#fff;margin:0 0 12px}
.accent{color:#34d399}
.muted{color:#9ca3af;font-size:.875rem;margin:0 0 40px}
.divider{margin:0 auto 24px;height:1px;width:75%;background:rgba(255,255,255,.1)}
.details{display:flex;flex-wrap:wrap;align-items:center;justify-content:center;gap:24px;margin-bottom:40px;font-size:.875rem;color:#d1d5db}
.details .label{color:#6b7280}
.chip{display:flex;align-items:center;gap:8px}
.chip img.avatar{border-radius:9999px}
.btn{display:inline-block;border:none;border-radius:8px;background:#10b981;color:#fff;padding:8px 24px;font-size:.875rem;font-weight:500;text-decoration:none;cursor:pointer}
.btn:hover{background:#059669}
.btn-block{display:block;width:100%;padding:12px}
.footer{margin-top:40px;font-size:.75rem;color:#6b7280}
.split{display:flex;height:100vh;max-height:100vh}
.split .form-side{flex:1;overflow-y:auto;padding:40px 24px}
.split .form-inner{max-width:860px;margin:0 auto}
.split .side-img{display:block;max-width:360px;height:100%;object-fit:cover}
.logo-full{height:40px;width:auto;margin-bottom:48px}
.form h2{font-size:1.125rem;color:#fff;margin:32px 0 16px}
.field{margin-bottom:20px;text-align:left}
.field label{display:block;font-size:.875rem;color:#9ca3af;margin-bottom:6px}
.field input{width:100%;padding:12px;border-radius:8px;border:1px solid #1f2937;background:#131619;color:#fff;font-size:.9rem}
.field.invalid input{border-color:#f87171}
.field .error{margin:6px 0 0;font-size:.8rem;color:#f87171}
.notice{border-radius:8px;padding:12px 16px;margin-bottom:24px;font-size:.875rem;background:rgba(248,113,113,.1);color:#fca5a5}
.copyright{font-size:.875rem;color:#6b7280;padding:48px 0}
@media (max-width:900px){.split .side-img{display:none}}
"#;

/// Wrap `body` in the shared document shell.
pub(crate) fn page_shell(title: &str, body: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {app}</title>
<link rel="icon" href="/assets/icons/logo-icon.svg">
<style>{style}</style>
</head>
<body>
{body}
</body>
</html>"##,
        title = escape_html(title),
        app = APP_NAME,
        style = STYLE,
        body = body,
    )
}

/// Logo + product name row used on the centered pages.
pub(crate) fn brand_row() -> String {
    format!(
        r#"<div class="brand"><img src="{LOGO_ICON}" alt="{APP_NAME}" width="28" height="28"><span>{APP_NAME}</span></div>"#
    )
}
