//! Major/minor listing returned to the selection screen

use crate::core::models::MallasDataset;
use serde::Serialize;

/// A major in the listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MajorEntry {
    /// Major code
    pub codigo: Option<String>,
    /// Display name
    pub nombre: String,
    /// Curriculum version
    pub version: Option<String>,
}

/// A minor in the listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinorEntry {
    /// Minor code
    pub codigo: Option<String>,
    /// Display name
    pub nombre: String,
    /// Minor type
    pub tipo: Option<String>,
    /// Curriculum version
    pub version: Option<String>,
}

/// Every major and minor the student can pick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Majors in dataset order
    pub majors: Vec<MajorEntry>,
    /// Minors in dataset order
    pub minors: Vec<MinorEntry>,
}

/// Build the listing from the dataset
#[must_use]
pub fn catalog(dataset: &MallasDataset) -> Catalog {
    let majors = dataset
        .majors()
        .iter()
        .map(|m| MajorEntry {
            codigo: m.codigo.clone(),
            nombre: m.nombre.clone(),
            version: m.version.clone(),
        })
        .collect();

    let minors = dataset
        .minors()
        .iter()
        .map(|m| MinorEntry {
            codigo: m.codigo.clone(),
            nombre: m.nombre.clone(),
            tipo: m.tipo.clone(),
            version: m.version.clone(),
        })
        .collect();

    Catalog { majors, minors }
}
