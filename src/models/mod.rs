//! Data models.

pub mod bookmark;
pub mod channel;
pub mod config;
pub mod programme;
pub mod record;
