//! Course record ("ramo") as it appears in the curriculum export

use super::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of a requirement edge between two courses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequisiteKind {
    /// Must be passed before taking the course
    Requisito,
    /// Must be taken in the same term (or before)
    Corequisito,
    /// Any other label found in the export, kept verbatim
    Other(String),
}

impl From<String> for RequisiteKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Requisito" => Self::Requisito,
            "Corequisito" => Self::Corequisito,
            _ => Self::Other(value),
        }
    }
}

impl From<RequisiteKind> for String {
    fn from(kind: RequisiteKind) -> Self {
        match kind {
            RequisiteKind::Requisito => "Requisito".to_string(),
            RequisiteKind::Corequisito => "Corequisito".to_string(),
            RequisiteKind::Other(label) => label,
        }
    }
}

/// One entry of `Requisitos.Cursos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisite {
    /// Sigla of the required course
    #[serde(rename = "Sigla", default, skip_serializing_if = "Option::is_none")]
    pub sigla: Option<String>,
    /// Relationship kind
    #[serde(
        rename = "TipoRequisito",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<RequisiteKind>,
    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Requisite {
    /// Create a requirement on `sigla` of the given kind
    #[must_use]
    pub fn new(sigla: &str, kind: RequisiteKind) -> Self {
        Self {
            sigla: Some(sigla.to_string()),
            kind: Some(kind),
            extra: Map::new(),
        }
    }

    /// Whether this entry is a prerequisite or corequisite (the kinds that unlock courses)
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(
            self.kind,
            Some(RequisiteKind::Requisito | RequisiteKind::Corequisito)
        )
    }
}

/// The `Requisitos` block of a course
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requisitos {
    /// Course requirements
    #[serde(rename = "Cursos", default, skip_serializing_if = "Vec::is_empty")]
    pub cursos: Vec<Requisite>,
    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A course in a suggested plan
///
/// Only the fields the planner reads are typed. Everything else in the export
/// record lands in `extra` and is serialized back unchanged, so API clients see
/// the exported record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ramo {
    /// Course name
    #[serde(rename = "Nombre", default)]
    pub nombre: String,

    /// Catalog sigla used for deduplication and requirement references
    #[serde(rename = "Sigla", default, skip_serializing_if = "Option::is_none")]
    pub sigla: Option<String>,

    /// Sigla used as the course identifier on the board
    #[serde(rename = "CodSigla", default, skip_serializing_if = "Option::is_none")]
    pub cod_sigla: Option<String>,

    /// Identifier of an elective list slot (courses without a fixed sigla)
    #[serde(rename = "CodLista", default, skip_serializing_if = "Option::is_none")]
    pub cod_lista: Option<String>,

    /// Credits, kept as exported
    #[serde(rename = "Creditos", default, skip_serializing_if = "Option::is_none")]
    pub creditos: Option<Value>,

    /// Planned semester, kept as exported (`null` included)
    #[serde(
        rename = "SemestreBloque",
        default,
        deserialize_with = "lenient::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub semestre: Option<Value>,

    /// Position within the semester, kept as exported
    #[serde(
        rename = "OrdenSemestre",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub orden: Option<Value>,

    /// Academic block (e.g. "Matemáticas", "Formación General")
    #[serde(
        rename = "BloqueAcademico",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bloque: Option<String>,

    /// Requirement block
    #[serde(
        rename = "Requisitos",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub requisitos: Option<Requisitos>,

    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ramo {
    /// Create a course with only a name
    #[must_use]
    pub fn new(nombre: &str) -> Self {
        Self {
            nombre: nombre.to_string(),
            sigla: None,
            cod_sigla: None,
            cod_lista: None,
            creditos: None,
            semestre: None,
            orden: None,
            bloque: None,
            requisitos: None,
            extra: Map::new(),
        }
    }

    /// Create a course whose `Sigla` and `CodSigla` are both `sigla`
    #[must_use]
    pub fn with_sigla(nombre: &str, sigla: &str) -> Self {
        let mut ramo = Self::new(nombre);
        ramo.sigla = Some(sigla.to_string());
        ramo.cod_sigla = Some(sigla.to_string());
        ramo
    }

    /// Board identifier: `CodSigla`, falling back to `CodLista`
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.cod_sigla
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.cod_lista.as_deref().filter(|s| !s.is_empty()))
    }

    /// Non-empty `Sigla`, if any
    #[must_use]
    pub fn sigla(&self) -> Option<&str> {
        self.sigla.as_deref().filter(|s| !s.is_empty())
    }

    /// Credits as a number (0 when absent or not numeric)
    #[must_use]
    pub fn credits(&self) -> f64 {
        self.creditos.as_ref().and_then(lenient::as_f64).unwrap_or(0.0)
    }

    /// Planned semester, when the exported value is a non-negative integer
    #[must_use]
    pub fn semester(&self) -> Option<u32> {
        self.semestre.as_ref().and_then(lenient::as_u32)
    }

    /// Plan the course in `semestre`
    pub fn set_semester(&mut self, semestre: u32) {
        self.semestre = Some(Value::from(semestre));
    }

    /// Position within the semester, if numeric
    #[must_use]
    pub fn order(&self) -> Option<f64> {
        self.orden.as_ref().and_then(lenient::as_f64)
    }

    /// Requirement entries (empty when the course has none)
    #[must_use]
    pub fn requirements(&self) -> &[Requisite] {
        self.requisitos
            .as_ref()
            .map(|r| r.cursos.as_slice())
            .unwrap_or_default()
    }

    /// Add a requirement entry
    pub fn add_requirement(&mut self, sigla: &str, kind: RequisiteKind) {
        self.requisitos
            .get_or_insert_with(Requisitos::default)
            .cursos
            .push(Requisite::new(sigla, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_export_record() {
        let ramo: Ramo = serde_json::from_value(json!({
            "Nombre": "Cálculo II",
            "Sigla": "MAT1620",
            "CodSigla": "MAT1620",
            "Creditos": 10,
            "SemestreBloque": 2,
            "OrdenSemestre": 1,
            "BloqueAcademico": "Matemáticas",
            "Requisitos": { "Cursos": [ { "Sigla": "MAT1610", "TipoRequisito": "Requisito" } ] },
            "Vacantes": 120
        }))
        .unwrap();

        assert_eq!(ramo.id(), Some("MAT1620"));
        assert!((ramo.credits() - 10.0).abs() < f64::EPSILON);
        assert_eq!(ramo.semester(), Some(2));
        assert_eq!(ramo.requirements().len(), 1);
        assert_eq!(ramo.requirements()[0].kind, Some(RequisiteKind::Requisito));
        assert_eq!(ramo.extra.get("Vacantes"), Some(&json!(120)));
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let source = json!({
            "Nombre": "Optativo de Profundización",
            "CodLista": "L-OPT",
            "Creditos": "10",
            "Programa": { "Horas": 3 }
        });
        let ramo: Ramo = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&ramo).unwrap(), source);
    }

    #[test]
    fn test_semester_value_round_trips() {
        for raw in [json!("3"), json!(null), json!("Verano"), json!(2.5)] {
            let source = json!({ "Nombre": "Taller", "SemestreBloque": raw });
            let ramo: Ramo = serde_json::from_value(source.clone()).unwrap();
            assert_eq!(serde_json::to_value(&ramo).unwrap(), source);
        }

        let ramo: Ramo = serde_json::from_value(json!({ "Nombre": "Taller", "SemestreBloque": "3" })).unwrap();
        assert_eq!(ramo.semester(), Some(3));
        let ramo: Ramo = serde_json::from_value(json!({ "Nombre": "Taller", "SemestreBloque": "Verano" })).unwrap();
        assert_eq!(ramo.semester(), None);
        assert!(ramo.semestre.is_some());
    }

    #[test]
    fn test_set_semester_writes_number() {
        let mut ramo = Ramo::new("Taller");
        assert!(serde_json::to_value(&ramo).unwrap().get("SemestreBloque").is_none());
        ramo.set_semester(4);
        assert_eq!(serde_json::to_value(&ramo).unwrap()["SemestreBloque"], 4);
    }

    #[test]
    fn test_id_falls_back_to_cod_lista() {
        let mut ramo = Ramo::new("Teológico");
        assert_eq!(ramo.id(), None);
        ramo.cod_lista = Some("L-TEO".to_string());
        assert_eq!(ramo.id(), Some("L-TEO"));
        ramo.cod_sigla = Some(String::new());
        assert_eq!(ramo.id(), Some("L-TEO"));
    }

    #[test]
    fn test_other_requisite_kind_kept_verbatim() {
        let req: Requisite =
            serde_json::from_value(json!({ "Sigla": "X", "TipoRequisito": "Restriccion" })).unwrap();
        assert_eq!(req.kind, Some(RequisiteKind::Other("Restriccion".to_string())));
        assert!(!req.is_blocking());
        assert_eq!(serde_json::to_value(&req).unwrap()["TipoRequisito"], "Restriccion");
    }

    #[test]
    fn test_add_requirement_creates_block() {
        let mut ramo = Ramo::with_sigla("Física II", "FIS1533");
        ramo.add_requirement("FIS1523", RequisiteKind::Requisito);
        ramo.add_requirement("MAT1620", RequisiteKind::Corequisito);
        assert_eq!(ramo.requirements().len(), 2);
        assert!(ramo.requirements().iter().all(Requisite::is_blocking));
    }
}
