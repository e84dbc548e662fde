//! Portal middleware.

pub mod access_log;
