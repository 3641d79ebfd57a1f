//! Prerequisite, corequisite and unlock sets for a selected course

use crate::core::models::{Ramo, RequisiteKind};
use serde::Serialize;
use std::collections::BTreeSet;

/// Courses related to the selected one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequisiteSets {
    /// Siglas that must be passed before the selected course
    pub prerequisitos: BTreeSet<String>,
    /// Siglas to be taken together with the selected course
    pub corequisitos: BTreeSet<String>,
    /// `CodSigla` of courses that list the selected course as a requirement
    pub desbloquea: BTreeSet<String>,
}

impl RequisiteSets {
    /// Whether no relationship was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prerequisitos.is_empty() && self.corequisitos.is_empty() && self.desbloquea.is_empty()
    }
}

/// Compute the requisite sets of `selected` (a `CodSigla` or `CodLista`)
///
/// One pass over the plan finds both the selected course and every course it
/// unlocks. An id that matches no course yields only the unlock set.
#[must_use]
pub fn requisite_sets(ramos: &[Ramo], selected: &str) -> RequisiteSets {
    let mut sets = RequisiteSets::default();
    let mut found: Option<&Ramo> = None;

    for ramo in ramos {
        if found.is_none()
            && (ramo.cod_sigla.as_deref() == Some(selected)
                || ramo.cod_lista.as_deref() == Some(selected))
        {
            found = Some(ramo);
        }

        let Some(cod_sigla) = ramo.cod_sigla.as_deref().filter(|s| !s.is_empty()) else {
            continue;
        };
        let unlocked = ramo
            .requirements()
            .iter()
            .any(|req| req.sigla.as_deref() == Some(selected) && req.is_blocking());
        if unlocked {
            sets.desbloquea.insert(cod_sigla.to_string());
        }
    }

    if let Some(course) = found {
        for req in course.requirements() {
            let Some(sigla) = req.sigla.as_deref().filter(|s| !s.is_empty()) else {
                continue;
            };
            match req.kind {
                Some(RequisiteKind::Requisito) => {
                    sets.prerequisitos.insert(sigla.to_string());
                }
                Some(RequisiteKind::Corequisito) => {
                    sets.corequisitos.insert(sigla.to_string());
                }
                _ => {}
            }
        }
    }

    sets
}
