//! Text generators.

pub mod description;
