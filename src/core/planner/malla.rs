//! Course plan for a major, optionally combined with a minor

use crate::core::error::{MallaError, Result};
use crate::core::models::{MallasDataset, Ramo};
use crate::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A student's course plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Malla {
    /// Plan title, e.g. "Ingeniería Civil con minor Computación"
    #[serde(rename = "Nombre")]
    pub nombre: String,
    /// Courses in the plan
    #[serde(rename = "Ramos")]
    pub ramos: Vec<Ramo>,
}

/// Build the plan for a major name and an optional minor name
///
/// Major courses come first, then minor courses, deduplicated with
/// [`dedupe_by_sigla`]. An unknown minor contributes no courses.
///
/// # Errors
/// - [`MallaError::MissingParameter`] if `major` is absent or empty
/// - [`MallaError::UnknownMajor`] if no major has that exact name
pub fn build_malla(dataset: &MallasDataset, major: Option<&str>, minor: Option<&str>) -> Result<Malla> {
    let major = major
        .filter(|m| !m.is_empty())
        .ok_or(MallaError::MissingParameter("major"))?;
    let minor = minor.filter(|m| !m.is_empty());

    let cod_major = dataset
        .find_major_by_name(major)
        .and_then(|m| m.codigo.as_deref())
        .ok_or_else(|| MallaError::UnknownMajor(major.to_string()))?;
    let cod_minor = minor
        .and_then(|name| dataset.find_minor_by_name(name))
        .and_then(|m| m.codigo.as_deref());

    debug!(
        "Codes found -> Major: {cod_major}, Minor: {}",
        cod_minor.unwrap_or("-")
    );

    let mut combined: Vec<Ramo> = dataset.major_courses(cod_major).to_vec();
    if let Some(cod_minor) = cod_minor {
        combined.extend_from_slice(dataset.minor_courses(cod_minor));
    }

    let ramos = dedupe_by_sigla(combined);
    debug!("Total unique ramos: {}", ramos.len());

    let nombre = match minor {
        Some(minor) => format!("{major} con minor {minor}"),
        None => major.to_string(),
    };

    Ok(Malla { nombre, ramos })
}

/// Deduplicate courses by `Sigla`
///
/// Courses with a sigla keep the position of their first appearance and the
/// record of their last appearance. Courses without a sigla follow, in order.
#[must_use]
pub fn dedupe_by_sigla(ramos: Vec<Ramo>) -> Vec<Ramo> {
    let mut with_sigla: Vec<Ramo> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut without_sigla = Vec::new();

    for ramo in ramos {
        let Some(sigla) = ramo.sigla().map(str::to_string) else {
            without_sigla.push(ramo);
            continue;
        };
        if let Some(&idx) = position.get(&sigla) {
            with_sigla[idx] = ramo;
        } else {
            position.insert(sigla, with_sigla.len());
            with_sigla.push(ramo);
        }
    }

    with_sigla.extend(without_sigla);
    with_sigla
}
