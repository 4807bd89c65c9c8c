//! Document store interface.
//!
//! # Effect Classification
//!
//! - **Category**: External collaborator
//! - **Implementation**: host-provided; in-memory fake in `escra-testkit`
//! - **Usage**: contract submission materializes every pending document here

use crate::document::{FileRef, StoredDocument};
use crate::identifiers::{ContractId, DocumentId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum DocumentStoreError {
    #[error("Document rejected: {reason}")]
    Rejected { reason: String },
    #[error("Document not found: {id}")]
    NotFound { id: DocumentId },
    #[error("Document store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<DocumentStoreError> for crate::EscraError {
    fn from(err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::Rejected { reason } => crate::EscraError::invalid(reason),
            DocumentStoreError::NotFound { id } => {
                crate::EscraError::not_found(format!("document {id}"))
            }
            DocumentStoreError::Unavailable { reason } => crate::EscraError::storage(reason),
        }
    }
}

/// Arguments for [`DocumentStore::add_document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub file: FileRef,
    pub contract_id: ContractId,
    pub contract_title: String,
    pub uploader: String,
    pub assignee: Option<String>,
    pub document_type: Option<String>,
}

/// External document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document and return its store-assigned id.
    async fn add_document(&self, document: NewDocument) -> Result<DocumentId, DocumentStoreError>;

    /// List every stored document.
    async fn all_documents(&self) -> Result<Vec<StoredDocument>, DocumentStoreError>;

    /// Delete a document.
    async fn remove_document(&self, id: &DocumentId) -> Result<(), DocumentStoreError>;

    /// Change a document's display name.
    async fn update_document_name(
        &self,
        id: &DocumentId,
        name: &str,
    ) -> Result<(), DocumentStoreError>;
}
