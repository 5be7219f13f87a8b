//! TV Guide Library
//!
//! In-memory model of an electronic programme guide: programme entries,
//! channel timelines, bookmark match binding, search and descriptions.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod utils;

pub use error::{Error, Result};
