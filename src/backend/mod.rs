//! Managed backend client.
//!
//! One `Backend` is built at startup from `BackendConfig` and shared
//! read-only for the life of the process. It hands out four resource
//! handles, each a cheap clone of the same authenticated HTTP client:
//! - `databases()`: document records (patients, appointments)
//! - `storage()`: file buckets
//! - `users()`: identity accounts
//! - `messaging()`: notification messages
//!
//! There is no retry, token refresh or reconnect logic.

pub mod client;
pub mod resources;

#[cfg(test)]
pub(crate) mod fake;

pub use client::Backend;
pub use resources::{
    is_valid_id, Databases, FileRecord, MessageRecord, Messaging, Storage, Users, UNIQUE_ID,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend is not reachable at {0}")]
    Connection(String),

    #[error("Backend returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Invalid backend endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid header value for {0}")]
    InvalidCredential(&'static str),

    #[error("{0} is not configured")]
    MissingCollection(&'static str),

    #[error("Internal lock error")]
    LockPoisoned,
}
