//! Markdown board renderer

use super::{card_code, BoardContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Renders one table per semester
pub struct MarkdownReporter;

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &BoardContext) -> Result<String, Box<dyn Error>> {
        let mut out = String::new();
        writeln!(out, "# {}", ctx.title)?;
        writeln!(out)?;
        writeln!(out, "Total credits: {}", ctx.board.total_credits())?;

        for column in ctx.board.columns() {
            writeln!(out)?;
            writeln!(out, "## Semestre {} ({} cr)", column.semestre, column.creditos)?;
            writeln!(out)?;
            out.push_str("| Sigla | Curso | Créditos | Bloque |\n");
            out.push_str("|---|---|---|---|\n");
            for ramo in column.ramos {
                writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    card_code(ramo),
                    ramo.nombre,
                    ramo.credits(),
                    ramo.bloque.as_deref().unwrap_or("-")
                )?;
            }
        }

        let unscheduled = ctx.board.unscheduled();
        if !unscheduled.is_empty() {
            writeln!(out)?;
            writeln!(out, "## Sin semestre")?;
            writeln!(out)?;
            for ramo in unscheduled {
                writeln!(out, "- {} {}", card_code(ramo), ramo.nombre)?;
            }
        }

        Ok(out)
    }
}
