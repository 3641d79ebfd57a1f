//! CLI command handlers for `mallaplanner`.
//!
//! Each command is implemented in its own submodule.

pub mod catalog;
pub mod config;
pub mod malla;
pub mod serve;

use malla_planner::config::Config;
use malla_planner::core::models::MallasDataset;
use malla_planner::error;

/// Load the dataset named by `data.mallas_file`, exiting with a message on failure
pub fn load_dataset_or_exit(config: &Config) -> MallasDataset {
    match MallasDataset::load(&config.data.mallas_file) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load {}: {e}", config.data.mallas_file);
            eprintln!("✗ Could not load dataset '{}': {e}", config.data.mallas_file);
            std::process::exit(1);
        }
    }
}
