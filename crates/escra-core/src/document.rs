//! # Document Metadata

use crate::identifiers::{ContractId, DocumentId};
use serde::{Deserialize, Serialize};

/// Reference to a user-selected file.
///
/// Content bytes stay with the caller; the core only reasons about metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef {
    /// File name including extension
    pub name: String,
    /// MIME type reported by the picker
    pub mime_type: String,
    /// Size in bytes
    pub size_bytes: u64,
}

impl FileRef {
    /// Create a file reference.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// A document as held by the document store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    /// Display name
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub contract_id: Option<ContractId>,
    pub contract_title: Option<String>,
    pub uploaded_by: Option<String>,
    pub assignee: Option<String>,
    /// User-chosen document type (e.g. "Disclosure")
    pub document_type: Option<String>,
}
