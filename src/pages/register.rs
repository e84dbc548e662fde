//! Registration page: the patient form seeded from the user's account.

use super::{escape_html, page_shell, patient_path, COPYRIGHT, LOGO_FULL};
use crate::records::UserRecord;
use crate::validation::{Field, UserForm, ValidationErrors};

const SIDE_IMAGE: &str = "/assets/images/register-img.png";

/// Everything the registration page shows.
#[derive(Debug, Clone, Default)]
pub struct RegisterView<'a> {
    pub user_id: &'a str,
    /// Current field values. Empty for an unknown user.
    pub form: UserForm,
    /// Per-field messages from a rejected submission.
    pub errors: Option<&'a ValidationErrors>,
}

impl<'a> RegisterView<'a> {
    /// Seed from an account, or start empty when there is none.
    pub fn for_user(user_id: &'a str, user: Option<&UserRecord>) -> Self {
        let form = user
            .map(|u| UserForm {
                name: u.name.clone(),
                email: u.email.clone(),
                phone: u.phone.clone(),
            })
            .unwrap_or_default();
        Self {
            user_id,
            form,
            errors: None,
        }
    }

    /// Re-show a rejected submission.
    pub fn rejected(user_id: &'a str, form: UserForm, errors: &'a ValidationErrors) -> Self {
        Self {
            user_id,
            form,
            errors: Some(errors),
        }
    }
}

pub fn render_register_page(view: &RegisterView<'_>) -> String {
    let notice = match view.errors {
        Some(_) => r#"<div class="notice" role="alert">Please correct the highlighted fields.</div>"#,
        None => "",
    };

    let fields = [
        input_field(view, Field::Name, "Full name", "text", &view.form.name, "John Doe"),
        input_field(view, Field::Email, "Email address", "email", &view.form.email, "johndoe@gmail.com"),
        input_field(view, Field::Phone, "Phone number", "tel", &view.form.phone, "+1 555 123 4567"),
    ]
    .join("\n");

    let body = format!(
        r##"<div class="split">
  <section class="form-side">
    <div class="form-inner">
      <img src="{logo}" alt="patient" class="logo-full">
      <form class="form" method="post" action="{action}" novalidate>
        <h1>Welcome 👋</h1>
        <p class="muted">Let us know more about yourself.</p>
        {notice}
        <h2>Personal Information</h2>
{fields}
        <button type="submit" class="btn btn-block">Submit and Continue</button>
      </form>
      <p class="copyright">{copyright}</p>
    </div>
  </section>
  <img src="{side}" alt="patient" class="side-img">
</div>"##,
        logo = LOGO_FULL,
        action = escape_html(&patient_path(view.user_id, &["register"])),
        notice = notice,
        fields = fields,
        copyright = COPYRIGHT,
        side = SIDE_IMAGE,
    );

    page_shell("Register", &body)
}

fn input_field(
    view: &RegisterView<'_>,
    field: Field,
    label: &str,
    input_type: &str,
    value: &str,
    placeholder: &str,
) -> String {
    let name = field.as_str();
    let message = view.errors.and_then(|e| e.message_for(field));
    let (class, error) = match message {
        Some(msg) => (
            "field invalid",
            format!(r#"<p class="error" id="{name}-error">{}</p>"#, escape_html(msg)),
        ),
        None => ("field", String::new()),
    };

    format!(
        r#"        <div class="{class}">
          <label for="{name}">{label}</label>
          <input id="{name}" name="{name}" type="{input_type}" value="{value}" placeholder="{placeholder}">
          {error}
        </div>"#,
        value = escape_html(value),
        placeholder = escape_html(placeholder),
    )
}
