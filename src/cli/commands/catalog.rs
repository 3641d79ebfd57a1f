//! Catalog command handler

use malla_planner::config::Config;
use malla_planner::core::planner::catalog;

/// Print every major and minor in the dataset
pub fn run(config: &Config) {
    let dataset = super::load_dataset_or_exit(config);
    let listing = catalog(&dataset);

    println!("Majors ({}):", listing.majors.len());
    for major in &listing.majors {
        println!(
            "  {:<10} {} (v{})",
            major.codigo.as_deref().unwrap_or("-"),
            major.nombre,
            major.version.as_deref().unwrap_or("?")
        );
    }

    println!("\nMinors ({}):", listing.minors.len());
    for minor in &listing.minors {
        println!(
            "  {:<10} {} [{}]",
            minor.codigo.as_deref().unwrap_or("-"),
            minor.nombre,
            minor.tipo.as_deref().unwrap_or("-")
        );
    }
}
