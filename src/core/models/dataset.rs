//! In-memory curriculum dataset loaded from the `mallas.json` export

use super::{lenient, MajorInfo, MinorInfo, Ramo};
use crate::core::error::{MallaError, Result};
use crate::{debug, info, warn};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// `CodMinor` value marking the suggested plan of a major on its own
pub const NO_MINOR: &str = "N";

/// Key of the single query result stored in each export section
const LISTING_KEY: &str = "{}";

/// Key of a `getMallaSugerida` entry, decoded from its JSON-encoded string form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct MallaKey {
    /// Major code
    #[serde(rename = "CodMajor", default, deserialize_with = "lenient::string_or_number")]
    pub cod_major: Option<String>,
    /// Minor code (`"N"` for the major-only plan)
    #[serde(rename = "CodMinor", default, deserialize_with = "lenient::string_or_number")]
    pub cod_minor: Option<String>,
}

impl MallaKey {
    /// Build a key from its two codes
    #[must_use]
    pub fn new(cod_major: &str, cod_minor: &str) -> Self {
        Self {
            cod_major: Some(cod_major.to_string()),
            cod_minor: Some(cod_minor.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(rename = "getListadoMajor", default)]
    majors: HashMap<String, Vec<MajorInfo>>,
    #[serde(rename = "getListadoMinor", default)]
    minors: HashMap<String, Vec<MinorInfo>>,
    #[serde(rename = "getMallaSugerida", default, deserialize_with = "in_document_order")]
    sugerida: Vec<(String, Vec<Ramo>)>,
}

/// Read a JSON object as `(key, value)` pairs, in the order they appear
fn in_document_order<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, Vec<Ramo>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, Vec<Ramo>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object of suggested plans")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// Majors, minors and suggested course plans
///
/// Suggested plans keep the order of the export. When several plans match a
/// lookup, the one appearing last in the file wins.
#[derive(Debug, Clone, Default)]
pub struct MallasDataset {
    majors: Vec<MajorInfo>,
    minors: Vec<MinorInfo>,
    plans: Vec<(MallaKey, Vec<Ramo>)>,
}

impl MallasDataset {
    /// Build a dataset from already-decoded parts
    #[must_use]
    pub fn new(
        majors: Vec<MajorInfo>,
        minors: Vec<MinorInfo>,
        plans: Vec<(MallaKey, Vec<Ramo>)>,
    ) -> Self {
        Self {
            majors,
            minors,
            plans,
        }
    }

    /// Load the dataset from a JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid export
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let dataset = Self::from_json(&content)?;
        info!(
            "Loaded {} majors, {} minors and {} suggested plans from {}",
            dataset.majors.len(),
            dataset.minors.len(),
            dataset.plans.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse the dataset from the JSON export text
    ///
    /// Suggested-plan keys that are not valid JSON objects are skipped with a warning.
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or a section has the wrong shape
    pub fn from_json(content: &str) -> Result<Self> {
        if !content.trim_start().starts_with('{') {
            return Err(MallaError::Dataset {
                message: "top-level value must be a JSON object".to_string(),
            });
        }
        // parsed straight from text so plan order survives
        let mut raw: RawDataset = serde_json::from_str(content)?;

        let majors = raw.majors.remove(LISTING_KEY).unwrap_or_default();
        let minors = raw.minors.remove(LISTING_KEY).unwrap_or_default();

        let mut plans = Vec::with_capacity(raw.sugerida.len());
        for (key, ramos) in raw.sugerida {
            match serde_json::from_str::<MallaKey>(&key) {
                Ok(parsed) => plans.push((parsed, ramos)),
                Err(e) => warn!("Skipping suggested plan with unreadable key {key:?}: {e}"),
            }
        }

        Ok(Self::new(majors, minors, plans))
    }

    /// All majors in listing order
    #[must_use]
    pub fn majors(&self) -> &[MajorInfo] {
        &self.majors
    }

    /// All minors in listing order
    #[must_use]
    pub fn minors(&self) -> &[MinorInfo] {
        &self.minors
    }

    /// Number of suggested plans
    #[must_use]
    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }

    /// Find a major by its exact display name
    #[must_use]
    pub fn find_major_by_name(&self, nombre: &str) -> Option<&MajorInfo> {
        self.majors.iter().find(|m| m.nombre == nombre)
    }

    /// Find a minor by its exact display name
    #[must_use]
    pub fn find_minor_by_name(&self, nombre: &str) -> Option<&MinorInfo> {
        self.minors.iter().find(|m| m.nombre == nombre)
    }

    /// Last plan in file order whose key satisfies `matches`
    fn last_plan(&self, matches: impl Fn(&MallaKey) -> bool) -> &[Ramo] {
        self.plans
            .iter()
            .rev()
            .find(|(key, _)| matches(key))
            .map(|(_, ramos)| ramos.as_slice())
            .unwrap_or_default()
    }

    /// Courses of the major-only plan (`CodMinor == "N"`)
    #[must_use]
    pub fn major_courses(&self, cod_major: &str) -> &[Ramo] {
        let wanted = MallaKey::new(cod_major, NO_MINOR);
        let ramos = self.last_plan(|key| *key == wanted);
        debug!("Found {} ramos for major {cod_major}", ramos.len());
        ramos
    }

    /// Courses of the last plan in the file carrying this minor code, whatever its major
    #[must_use]
    pub fn minor_courses(&self, cod_minor: &str) -> &[Ramo] {
        let ramos = self.last_plan(|key| key.cod_minor.as_deref() == Some(cod_minor));
        debug!("Found {} ramos for minor {cod_minor}", ramos.len());
        ramos
    }
}
