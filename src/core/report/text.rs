//! Plain text board renderer

use super::{card_code, BoardContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Renders the board as an indented list
pub struct TextReporter;

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &BoardContext) -> Result<String, Box<dyn Error>> {
        let mut out = String::new();
        writeln!(out, "=== {} ===", ctx.title)?;

        for column in ctx.board.columns() {
            writeln!(out, "\nSemestre {} ({} cr)", column.semestre, column.creditos)?;
            for ramo in column.ramos {
                writeln!(
                    out,
                    "  {:<10} {} ({} cr)",
                    card_code(ramo),
                    ramo.nombre,
                    ramo.credits()
                )?;
            }
        }

        let unscheduled = ctx.board.unscheduled();
        if !unscheduled.is_empty() {
            writeln!(out, "\nSin semestre")?;
            for ramo in unscheduled {
                writeln!(out, "  {:<10} {}", card_code(ramo), ramo.nombre)?;
            }
        }

        writeln!(out, "\nTotal: {} cr", ctx.board.total_credits())?;
        Ok(out)
    }
}
