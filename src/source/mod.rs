//! Content sources: where raw documents come from.
//!
//! [`ContentSource`] abstracts the repository API so the loader can be fed a
//! live HTTP client, a recorded payload, or a test double. Sources return raw
//! JSON; validation happens in the loader.

mod fixture;
mod http;

pub use fixture::FixtureSet;
pub use http::CmsClient;

use crate::schema::DocumentType;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no repository configured")]
    MissingRepository,

    #[error("repository request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("unexpected repository payload: {0}")]
    Payload(String),
}

/// A store of raw CMS documents, queried by type and uid.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// All documents of one type, in repository order.
    async fn get_all_by_type(&self, doc_type: DocumentType) -> Result<Vec<Value>, SourceError>;

    /// One document by uid, or [`SourceError::NotFound`].
    async fn get_by_uid(&self, doc_type: DocumentType, uid: &str) -> Result<Value, SourceError>;

    /// The one document of a singleton type.
    async fn get_single(&self, doc_type: DocumentType) -> Result<Value, SourceError>;
}
