//! Malla command handler

use malla_planner::config::Config;
use malla_planner::core::planner::{build_malla, SemesterBoard};
use malla_planner::core::report::{BoardContext, ReportFormat};
use malla_planner::{info, verbose};
use std::path::{Path, PathBuf};

/// Build the plan for `major` (and `minor`) and print or write its semester board
pub fn run(
    config: &Config,
    major: &str,
    minor: Option<&str>,
    format: ReportFormat,
    output: Option<&Path>,
) {
    let dataset = super::load_dataset_or_exit(config);

    let malla = match build_malla(&dataset, Some(major), minor) {
        Ok(malla) => malla,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };
    verbose!("{}: {} courses", malla.nombre, malla.ramos.len());

    let board = SemesterBoard::from_ramos(malla.ramos);
    let ctx = BoardContext {
        title: &malla.nombre,
        board: &board,
    };
    let reporter = format.reporter();

    match output.map(|path| output_path(path, format)) {
        Some(path) => match reporter.generate(&ctx, &path) {
            Ok(()) => {
                info!("Wrote {format} board to {}", path.display());
                println!("✓ Board written to {}", path.display());
            }
            Err(e) => {
                eprintln!("✗ Failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => match reporter.render(&ctx) {
            Ok(content) => print!("{content}"),
            Err(e) => {
                eprintln!("✗ Failed to render board: {e}");
                std::process::exit(1);
            }
        },
    }
}

/// `path`, with the format's extension when it has none
fn output_path(path: &Path, format: ReportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_gets_format_extension() {
        assert_eq!(
            output_path(Path::new("out/board"), ReportFormat::Markdown),
            PathBuf::from("out/board.md")
        );
        assert_eq!(
            output_path(Path::new("board"), ReportFormat::Text),
            PathBuf::from("board.txt")
        );
        assert_eq!(
            output_path(Path::new("board.markdown"), ReportFormat::Markdown),
            PathBuf::from("board.markdown")
        );
    }
}
