//! Shared library for `MallaPlanner`
//! Contains the dataset model, plan operations, chat relay and HTTP server used by the CLI

pub mod core;
pub mod logger;
pub mod server;

pub use core::{config, get_version};
