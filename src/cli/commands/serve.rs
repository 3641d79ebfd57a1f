//! Serve command handler

use malla_planner::config::Config;
use malla_planner::error;
use malla_planner::server::{self, AppState};

/// Load the dataset, then serve the HTTP API until Ctrl-C
pub fn run(config: &Config) {
    let dataset = super::load_dataset_or_exit(config);

    let state = match AppState::from_config(config, dataset) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("✗ Failed to initialize server: {e}");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("✗ Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(server::serve(config, state)) {
        error!("Server stopped: {e}");
        eprintln!("✗ Server error: {e}");
        std::process::exit(1);
    }
}
