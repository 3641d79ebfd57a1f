//! Major and minor listings

use super::lenient;
use serde::{Deserialize, Serialize};

/// A major as listed in `getListadoMajor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorInfo {
    /// Major code (e.g. "M001")
    #[serde(rename = "CodMajor", default, deserialize_with = "lenient::string_or_number")]
    pub codigo: Option<String>,
    /// Display name, used for lookups
    #[serde(rename = "Nombre", default)]
    pub nombre: String,
    /// Curriculum version
    #[serde(
        rename = "VersionMajor",
        default,
        deserialize_with = "lenient::string_or_number"
    )]
    pub version: Option<String>,
}

/// A minor as listed in `getListadoMinor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorInfo {
    /// Minor code (e.g. "N104")
    #[serde(rename = "CodMinor", default, deserialize_with = "lenient::string_or_number")]
    pub codigo: Option<String>,
    /// Display name, used for lookups
    #[serde(rename = "Nombre", default)]
    pub nombre: String,
    /// Minor type (e.g. "Amplitud", "Profundidad")
    #[serde(rename = "TipoMinor", default)]
    pub tipo: Option<String>,
    /// Curriculum version
    #[serde(
        rename = "VersionMinor",
        default,
        deserialize_with = "lenient::string_or_number"
    )]
    pub version: Option<String>,
}

impl MajorInfo {
    /// Create a listing entry
    #[must_use]
    pub fn new(codigo: &str, nombre: &str) -> Self {
        Self {
            codigo: Some(codigo.to_string()),
            nombre: nombre.to_string(),
            version: None,
        }
    }
}

impl MinorInfo {
    /// Create a listing entry
    #[must_use]
    pub fn new(codigo: &str, nombre: &str) -> Self {
        Self {
            codigo: Some(codigo.to_string()),
            nombre: nombre.to_string(),
            tipo: None,
            version: None,
        }
    }
}
