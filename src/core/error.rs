//! Error type shared by dataset loading, plan building and the chat relay

use thiserror::Error;

/// Errors produced by `MallaPlanner` operations
#[derive(Error, Debug)]
pub enum MallaError {
    /// Reading a dataset or config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset parsed as JSON but is missing an expected section
    #[error("Dataset error: {message}")]
    Dataset {
        /// What was wrong with the dataset
        message: String,
    },

    /// A required request parameter was absent or empty
    #[error("El parámetro \"{0}\" es requerido")]
    MissingParameter(&'static str),

    /// The request body was not valid JSON or did not match the expected shape
    #[error("Cuerpo de la solicitud inválido: {0}")]
    BadRequest(String),

    /// No major with the given name exists in the dataset
    #[error("Major con nombre \"{0}\" no encontrado.")]
    UnknownMajor(String),

    /// The upstream language model answered with a non-success status
    #[error("Chat upstream returned {status}: {body}")]
    ChatUpstream {
        /// HTTP status code returned upstream
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The upstream language model answered without any text
    #[error("Chat upstream returned no text candidates")]
    EmptyAnswer,

    /// No API key is configured for the language model
    #[error("No API key configured for the chat model (set {0})")]
    MissingApiKey(String),

    /// The HTTP client failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MallaError>;
