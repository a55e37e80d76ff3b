//! Shared domain types for the Runetrack project.

pub mod config;
pub mod game;
pub mod session;

mod errors;

pub use errors::{Result, TrackerError};
