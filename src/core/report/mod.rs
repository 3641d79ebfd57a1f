//! Rendering of a semester board for the terminal and for Markdown files

pub mod markdown;
pub mod text;

pub use markdown::MarkdownReporter;
pub use text::TextReporter;

use crate::core::models::Ramo;
use crate::core::planner::SemesterBoard;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported board formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text columns for the terminal
    Text,
    /// Markdown tables
    Markdown,
}

impl ReportFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }

    /// Reporter for this format
    #[must_use]
    pub fn reporter(&self) -> Box<dyn ReportGenerator> {
        match self {
            Self::Text => Box::new(TextReporter),
            Self::Markdown => Box::new(MarkdownReporter),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Data needed to render a board
#[derive(Debug, Clone, Copy)]
pub struct BoardContext<'a> {
    /// Plan title
    pub title: &'a str,
    /// The board itself
    pub board: &'a SemesterBoard,
}

/// A board renderer
pub trait ReportGenerator {
    /// Render to a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &BoardContext) -> Result<String, Box<dyn Error>>;

    /// Render and write to `output_path`
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn generate(&self, ctx: &BoardContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}

/// Code shown on a course card; elective slots without one show "Lista"
fn card_code(ramo: &Ramo) -> &str {
    ramo.id().unwrap_or("Lista")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("md".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("TEXT".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Markdown.extension(), "md");
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.md");
        let board = SemesterBoard::default();
        ReportFormat::Markdown
            .reporter()
            .generate(
                &BoardContext {
                    title: "Vacía",
                    board: &board,
                },
                &path,
            )
            .unwrap();
        assert!(fs::read_to_string(path).unwrap().contains("# Vacía"));
    }
}
