//! Core module for curriculum data and plan operations

pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod report;

/// Returns the current version of the `MallaPlanner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
