//! Core guide logic.

pub mod aggregate;
pub mod bookmarks;
pub mod guide;
pub mod parser;
pub mod search;
pub mod timeline;
