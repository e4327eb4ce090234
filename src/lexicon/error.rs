use crate::type_system::TypeSyntaxError;
use thiserror::Error;

/// Failures while loading a lexicon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    #[error("Lexicon category '{category}' is not a valid type: {source}")]
    InvalidType {
        category: String,
        #[source]
        source: TypeSyntaxError,
    },
    #[error("Could not read lexicon '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Malformed lexicon JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for LexiconError {
    fn from(e: serde_json::Error) -> Self {
        LexiconError::Json(e.to_string())
    }
}
