//! Completion tracking over a plan

use crate::core::models::{Ramo, RequisiteKind};
use serde::Serialize;
use std::collections::HashSet;

/// Student progress through a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Credits of completed courses
    pub creditos_aprobados: f64,
    /// Credits of the whole plan
    pub creditos_totales: f64,
    /// Ids of completed courses found in the plan, in plan order
    pub aprobados: Vec<String>,
    /// Ids of courses not yet completed whose prerequisites are all completed
    pub disponibles: Vec<String>,
    /// Number of courses not yet completed
    pub pendientes: usize,
}

fn is_completed(ramo: &Ramo, completed: &HashSet<&str>) -> bool {
    ramo.id().is_some_and(|id| completed.contains(id))
        || ramo.sigla().is_some_and(|s| completed.contains(s))
}

/// Summarize progress given the ids or siglas the student has completed
///
/// Completed ids that are not in the plan are ignored. Corequisites never
/// block availability since they may be taken in the same term.
#[must_use]
pub fn progress(ramos: &[Ramo], completed: &[String]) -> Progress {
    let completed: HashSet<&str> = completed.iter().map(String::as_str).collect();
    let mut summary = Progress::default();

    for ramo in ramos {
        summary.creditos_totales += ramo.credits();

        if is_completed(ramo, &completed) {
            summary.creditos_aprobados += ramo.credits();
            if let Some(id) = ramo.id().or_else(|| ramo.sigla()) {
                summary.aprobados.push(id.to_string());
            }
            continue;
        }

        summary.pendientes += 1;
        let ready = ramo
            .requirements()
            .iter()
            .filter(|req| req.kind == Some(RequisiteKind::Requisito))
            .filter_map(|req| req.sigla.as_deref())
            .all(|sigla| completed.contains(sigla));
        if ready {
            if let Some(id) = ramo.id() {
                summary.disponibles.push(id.to_string());
            }
        }
    }

    summary
}
