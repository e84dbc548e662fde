//! Field rules for the patient registration form.
//! Pure and synchronous; the web layer maps failures onto the form.

use std::sync::LazyLock;

use phonenumber::country;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
pub const NAME_TOO_LONG: &str = "Name must be at most 50 characters.";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const INVALID_PHONE: &str = "Invalid phone number";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Candidate values as submitted by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every failing field, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} form field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn has(&self, field: Field) -> bool {
        self.message_for(field).is_some()
    }
}

/// Registration form rules.
///
/// Phone numbers are checked against libphonenumber metadata. Without a
/// default region a number must be written in international form (`+…`).
#[derive(Debug, Clone, Default)]
pub struct UserFormSchema {
    default_region: Option<country::Id>,
}

impl UserFormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept national numbers for `region` as well.
    pub fn with_default_region(region: country::Id) -> Self {
        Self {
            default_region: Some(region),
        }
    }

    pub fn validate(&self, form: &UserForm) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if let Some(message) = check_name(&form.name) {
            errors.push(FieldError {
                field: Field::Name,
                message,
            });
        }
        if !is_valid_email(&form.email) {
            errors.push(FieldError {
                field: Field::Email,
                message: INVALID_EMAIL,
            });
        }
        if !is_valid_phone_number(&form.phone, self.default_region) {
            errors.push(FieldError {
                field: Field::Phone,
                message: INVALID_PHONE,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

/// Validate with the default schema (international phone numbers only).
pub fn validate_user_form(form: &UserForm) -> Result<(), ValidationErrors> {
    UserFormSchema::new().validate(form)
}

fn check_name(name: &str) -> Option<&'static str> {
    let len = name.chars().count();
    if len < NAME_MIN_CHARS {
        Some(NAME_TOO_SHORT)
    } else if len > NAME_MAX_CHARS {
        Some(NAME_TOO_LONG)
    } else {
        None
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone_number(phone: &str, default_region: Option<country::Id>) -> bool {
    match phonenumber::parse(default_region, phone) {
        Ok(number) => phonenumber::is_valid(&number),
        Err(_) => false,
    }
}
