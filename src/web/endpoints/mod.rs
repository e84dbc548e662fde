//! Route handlers, one module per page or feature.

pub mod appointments;
pub mod health;
pub mod register;

use crate::web::error::PageError;

/// Fallback for unknown routes.
pub async fn not_found() -> PageError {
    PageError::NotFound
}
