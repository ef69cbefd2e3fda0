//! Errors raised while turning exported documents into rows

use super::FieldError;

/// Error type for parsing exported row data.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value was neither an array nor an object of documents.
    #[error("expected an array or an object of documents, got {0}")]
    UnexpectedShape(&'static str),

    /// A document could not be converted into a typed row.
    #[error("document {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: FieldError,
    },
}

impl DatasetError {
    /// Creates a row conversion error for the document at `index`.
    pub fn row(index: usize, source: FieldError) -> Self {
        Self::Row { index, source }
    }
}
