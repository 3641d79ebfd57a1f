//! Extraction of the JSON suggestion block embedded in a model answer

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// First `{` through last `}`, across lines
static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON block pattern is valid"));

/// Typed view of the suggestion block the prompt asks for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSuggestion {
    /// Suggested course names or siglas
    #[serde(default)]
    pub cursos_sugeridos: Vec<String>,
    /// Short rationale
    #[serde(default)]
    pub explicacion: String,
}

impl CourseSuggestion {
    /// Interpret an extracted block, if it has the expected shape
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Find and parse the JSON object embedded in `answer`
///
/// The span runs from the first `{` to the last `}`. Returns `None` when there
/// is no such span or it is not valid JSON.
#[must_use]
pub fn extract_suggestion(answer: &str) -> Option<Value> {
    let block = JSON_BLOCK.find(answer)?;
    serde_json::from_str(block.as_str()).ok()
}
