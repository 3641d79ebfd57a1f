//! Prompt construction for the study advisor

use serde_json::Value;

/// Build the advisor prompt from the student's question and plan data
///
/// The plan data is embedded as pretty-printed JSON. The model is asked to
/// append a `cursos_sugeridos`/`explicacion` JSON object when it recommends
/// courses, which [`extract_suggestion`](super::extract_suggestion) picks up.
#[must_use]
pub fn build_prompt(message: &str, data_malla: &Value) -> String {
    let student = serde_json::to_string_pretty(data_malla).unwrap_or_else(|_| "null".to_string());

    format!(
        "Eres un consejero académico universitario.\n\
         \n\
         Datos del estudiante y su malla curricular:\n\
         {student}\n\
         \n\
         Pregunta del estudiante: {message}\n\
         \n\
         Responde en un tono cercano y conversacional. Si recomiendas cursos, termina \
         tu respuesta con un único objeto JSON con este formato:\n\
         {{\n  \"cursos_sugeridos\": [\"SIGLA1\", \"SIGLA2\"],\n  \"explicacion\": \"Texto breve\"\n}}\n"
    )
}
