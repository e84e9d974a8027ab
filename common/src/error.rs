//! Error types shared by the template engine.
//!
//! Validation problems with a template (`FormError::InvalidTemplate`) and the
//! repository bound (`FormError::TemplateLimitReached`) are kept apart from
//! storage failures (`FormError::Persistence`): the former need a further edit
//! before a retry can succeed, the latter can simply be retried.

use crate::model::template::TemplateIssue;

/// Failure reported by a [`BlobStore`](crate::storage::BlobStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps any backend error (SQLite, I/O, ...) into a `StorageError`.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// A collection could not be written through to the blob store.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: StorageError,
    },
}

/// Errors raised by template commits and repository writes.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("template cannot be saved: {0}")]
    InvalidTemplate(TemplateIssue),
    #[error("the limit of {limit} templates has been reached")]
    TemplateLimitReached { limit: usize },
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl FormError {
    /// `true` when repeating the same call without any further edit may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

/// An enum option list that breaks the non-empty / distinct rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("an enum field needs at least one option")]
    Empty,
    #[error("option {index} is blank")]
    Blank { index: usize },
    #[error("option `{0}` is listed more than once")]
    Duplicate(String),
}

/// A partial field spec that cannot be completed into a field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldSpecError {
    #[error("enum fields must be created with their options")]
    MissingOptions,
}
