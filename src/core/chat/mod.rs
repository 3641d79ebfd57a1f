//! Study-advisor chat relay
//!
//! A question and the student's plan are turned into a prompt, sent to a hosted
//! language model, and the answer is returned together with any JSON course
//! suggestion embedded in it.

pub mod gemini;
pub mod prompt;
pub mod suggestion;

pub use gemini::GeminiClient;
pub use prompt::build_prompt;
pub use suggestion::{extract_suggestion, CourseSuggestion};

use crate::core::error::{MallaError, Result};
use crate::{debug, error};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// A text-generation backend
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate an answer for a single-turn prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Stand-in model used when no API key is configured; every call fails
#[derive(Debug, Clone)]
pub struct UnconfiguredModel {
    /// Environment variable the key was expected in
    pub api_key_env: String,
}

#[async_trait]
impl ChatModel for UnconfiguredModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(MallaError::MissingApiKey(self.api_key_env.clone()))
    }
}

/// Answer returned to the chat panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    /// Full model answer
    pub respuesta: String,
    /// JSON block found in the answer, if any
    #[serde(rename = "cursosRecomendados")]
    pub cursos_recomendados: Option<Value>,
}

/// Builds prompts, calls the model and post-processes answers
#[derive(Clone)]
pub struct ChatService {
    model: Arc<dyn ChatModel>,
}

impl ChatService {
    /// Wrap a model
    #[must_use]
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Ask a question about the student's plan
    ///
    /// # Errors
    /// Propagates model failures (network, upstream status, missing key)
    pub async fn ask(&self, message: &str, data_malla: &Value) -> Result<ChatReply> {
        let prompt = build_prompt(message, data_malla);
        debug!("Sending chat prompt ({} chars)", prompt.len());

        let respuesta = self.model.generate(&prompt).await.map_err(|e| {
            error!("Chat model failed: {e}");
            e
        })?;

        let cursos_recomendados = extract_suggestion(&respuesta);
        match cursos_recomendados.as_ref().map(CourseSuggestion::from_value) {
            None => debug!("No JSON suggestion found in chat answer"),
            Some(None) => debug!("Chat answer carries JSON in an unexpected shape"),
            Some(Some(suggestion)) => debug!(
                "Chat answer suggests {} courses",
                suggestion.cursos_sugeridos.len()
            ),
        }

        Ok(ChatReply {
            respuesta,
            cursos_recomendados,
        })
    }
}
